//! spamcheck: spam classification service and CLI
//!
//! # Usage
//!
//! ```bash
//! # Serve the HTTP API
//! spamcheck --config spamcheck.toml serve
//!
//! # Classify a single message
//! spamcheck classify "Congratulations, you have won a free prize"
//!
//! # Show model statistics
//! spamcheck stats
//! ```

use clap::{Parser, Subcommand};
use classifier_rs::SpamClassifier;
use spamcheck_rs::{ApiServer, Config, HistoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spamcheck")]
#[command(about = "Naive Bayes spam classifier", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,
    /// Classify a message and print the result
    Classify {
        /// Message text
        text: String,
    },
    /// Print statistics of the trained model
    Stats,
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.logging.level;
        format!(
            "spamcheck_rs={level},spamcheck={level},classifier_rs={level},tower_http={level}"
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    init_logging(&config);

    info!("Starting spamcheck v{}", env!("CARGO_PKG_VERSION"));
    match &config.classifier.corpus_path {
        Some(path) => info!("Loading corpus from {}", path.display()),
        None => info!("No corpus configured, using the builtin corpus"),
    }

    // Training failures are fatal: never serve without a model
    let corpus = config.load_corpus()?;
    let classifier = Arc::new(SpamClassifier::trained(&corpus, config.training_mode())?);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Classify { text } => {
            let result = classifier.predict(&text)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Stats => {
            let summary = classifier.summary()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Serve => {
            let history = HistoryStore::connect(&config.storage.database_url).await?;
            history.init_db().await?;

            let server = ApiServer::new(
                classifier,
                history,
                config.history.clone(),
                config.server.listen_addr.clone(),
            );
            server.run().await?;
        }
    }

    Ok(())
}
