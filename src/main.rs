//! `leo`: command-line access to the Léo backend.
//!
//! Calls one API operation per invocation and prints the JSON result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use leo_client::diagnostics::{self, DEFAULT_TEST_MESSAGE};
use leo_client::{ApiClient, ApiError, ClientConfig, DocumentUpload, NewUser, TokenStoreKind};

#[derive(Parser, Debug)]
#[command(name = "leo", version, about = "Léo mediation backend client")]
struct Args {
    /// Backend base URL (overrides LEO_API_URL / VITE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Where the session token is kept: keyring, file or memory
    #[arg(long, global = true)]
    store: Option<TokenStoreKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is up
    Health,
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and store the session token
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "pro")]
        role: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show whether a session token is held
    Status,
    /// Show the logged-in user's profile
    Profile,
    /// Analyze the sentiment of a message
    Sentiment { message: String },
    /// Rephrase a message in a calmer tone
    Rephrase {
        message: String,
        #[arg(long)]
        context: Option<String>,
        /// Keep the rephrasing in the message history
        #[arg(long)]
        save: bool,
    },
    /// Suggest replies to a received message
    Respond {
        message: String,
        #[arg(long)]
        context: Option<String>,
    },
    /// Emotional feedback on a draft before sending it
    Mirror { message: String },
    /// Extract decisions from the text of a legal document
    Legal {
        text: String,
        #[arg(long)]
        path: Option<String>,
    },
    /// Upload a legal document file for extraction
    Upload { file: PathBuf },
    /// List processed judgments
    Judgments,
    /// Show the message history
    History,
    /// Delete the message history
    DeleteHistory,
    /// Run the integration checks against the backend
    Check {
        #[arg(long, default_value = DEFAULT_TEST_MESSAGE)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(store) = args.store {
        config.token_store = store;
    }
    log::debug!("Using backend {}", config.api_url);

    let client = match ApiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&client, args.command).await {
        Ok(Some(value)) => {
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", value),
            }
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ApiClient, command: Command) -> Result<Option<Value>, ApiError> {
    let value = match command {
        Command::Health => client.health_check().await?,
        Command::Login { email, password } => json!(client.login(&email, &password).await?),
        Command::Register {
            username,
            email,
            password,
            role,
        } => {
            let user = NewUser {
                username,
                email,
                password,
                role,
            };
            json!(client.register(&user).await?)
        }
        Command::Logout => {
            client.logout().await;
            return Ok(None);
        }
        Command::Status => json!({ "authenticated": client.is_authenticated().await }),
        Command::Profile => client.get_profile().await?,
        Command::Sentiment { message } => client.analyze_sentiment(&message).await?,
        Command::Rephrase {
            message,
            context,
            save,
        } => {
            client
                .rephrase_message(&message, context.as_deref(), save)
                .await?
        }
        Command::Respond { message, context } => {
            client
                .generate_responses(&message, context.as_deref())
                .await?
        }
        Command::Mirror { message } => client.get_mirror_feedback(&message).await?,
        Command::Legal { text, path } => {
            client
                .process_legal_document(&text, path.as_deref())
                .await?
        }
        Command::Upload { file } => {
            let upload = DocumentUpload::from_path(&file).await?;
            client.upload_legal_document(upload).await?
        }
        Command::Judgments => client.get_judgments().await?,
        Command::History => client.get_message_history().await?,
        Command::DeleteHistory => client.delete_message_history().await?,
        Command::Check { message } => return run_checks(client, &message).await,
    };
    Ok(Some(value))
}

async fn run_checks(client: &ApiClient, message: &str) -> Result<Option<Value>, ApiError> {
    let outcomes = diagnostics::run_checks(client, message).await;
    let failed = outcomes.iter().filter(|o| !o.passed()).count();

    for outcome in &outcomes {
        match &outcome.result {
            Ok(data) => println!("[ok]    {}: {}", outcome.check.name(), data),
            Err(e) => println!("[error] {}: {}", outcome.check.name(), e),
        }
    }

    if failed > 0 {
        return Err(ApiError::Request {
            message: format!("{} of {} checks failed", failed, outcomes.len()),
        });
    }
    Ok(None)
}
