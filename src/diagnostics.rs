//! End-to-end checks against a live backend.
//!
//! Runs the health probe and each AI module once, in a fixed order, and
//! reports every outcome. A failing check never stops the ones after it.

use serde_json::Value;

use crate::api::ApiClient;
use crate::error::ApiError;

/// Default message for the text checks: hostile on purpose, so sentiment and
/// rephrasing have something to work with.
pub const DEFAULT_TEST_MESSAGE: &str =
    "Tu ne comprends jamais rien ! C'est toujours pareil avec toi.";

/// Sample judgment text for the legal document check.
pub const SAMPLE_JUDGMENT: &str = "\
TRIBUNAL JUDICIAIRE DE PARIS
JUGEMENT DU 15 JANVIER 2024

Affaire: Divorce par consentement mutuel
Demandeurs: M. Pierre MARTIN et Mme Marie DUBOIS

ORDONNE:
- La garde alternée de l'enfant Lucas MARTIN (8 ans)
- Pension alimentaire: 450€ par mois
- Droit de visite: week-ends alternés

Fait à Paris, le 15 janvier 2024
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Health,
    Sentiment,
    Rephrasing,
    MirrorMode,
    LegalDocument,
}

impl Check {
    pub const ALL: [Check; 5] = [
        Check::Health,
        Check::Sentiment,
        Check::Rephrasing,
        Check::MirrorMode,
        Check::LegalDocument,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Check::Health => "health",
            Check::Sentiment => "sentiment analysis",
            Check::Rephrasing => "message rephrasing",
            Check::MirrorMode => "mirror mode",
            Check::LegalDocument => "legal document processing",
        }
    }

    async fn run(self, client: &ApiClient, message: &str) -> Result<Value, ApiError> {
        match self {
            Check::Health => client.health_check().await,
            Check::Sentiment => client.analyze_sentiment(message).await,
            Check::Rephrasing => client.rephrase_message(message, None, false).await,
            Check::MirrorMode => client.get_mirror_feedback(message).await,
            Check::LegalDocument => client.process_legal_document(SAMPLE_JUDGMENT, None).await,
        }
    }
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub check: Check,
    /// The backend's JSON on success, the error message on failure.
    pub result: Result<Value, String>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every check in order and collect the outcomes.
pub async fn run_checks(client: &ApiClient, message: &str) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::with_capacity(Check::ALL.len());
    for check in Check::ALL {
        let result = check.run(client, message).await.map_err(|e| e.to_string());
        match &result {
            Ok(_) => log::info!("check '{}' passed", check.name()),
            Err(e) => log::warn!("check '{}' failed: {}", check.name(), e),
        }
        outcomes.push(CheckOutcome { check, result });
    }
    outcomes
}
