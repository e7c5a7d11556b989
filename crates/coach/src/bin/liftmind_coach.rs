use clap::{Parser, Subcommand};
use coach::{ActionParser, DeepSeekClient, PromptBuilder};
use std::path::PathBuf;
use storage::models::ExerciseEntry;
use storage::services::workout_metrics::compute_workout_metrics;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

#[derive(Parser)]
#[command(name = "liftmind-coach")]
#[command(about = "LiftMind AI coach tooling", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the action from a coach reply (reads stdin when no file is given)
    Parse { file: Option<PathBuf> },

    /// Compute workout metrics from a JSON array of exercises
    Metrics { file: Option<PathBuf> },

    /// Send one message to the coach and print the parsed reply
    Chat {
        message: String,

        #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(long, env = "DEEPSEEK_API_URL")]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("liftmind_coach={},coach={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Parse { file } => {
            let reply = read_input(file).await?;
            let parsed = ActionParser::parse(&reply);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Commands::Metrics { file } => {
            let input = read_input(file).await?;
            let exercises: Vec<ExerciseEntry> = serde_json::from_str(&input)?;
            for (index, entry) in exercises.iter().enumerate() {
                entry
                    .validate()
                    .map_err(|e| format!("Exercise #{} is invalid: {}", index + 1, e))?;
            }
            let metrics = compute_workout_metrics(&exercises);
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        Commands::Chat {
            message,
            api_key,
            api_url,
        } => {
            let client = DeepSeekClient::new(api_key, api_url)?;
            let reply = client
                .chat(&PromptBuilder::system_prompt(""), &[], &message)
                .await?;
            let parsed = ActionParser::parse(&reply);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}

async fn read_input(file: Option<PathBuf>) -> Result<String, Box<dyn std::error::Error>> {
    match file {
        Some(path) => {
            tracing::debug!("Reading {}", path.display());
            Ok(tokio::fs::read_to_string(&path).await?)
        }
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            Ok(buffer)
        }
    }
}
