use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::logging;
use cli::session::{self, Interaction};
use std::path::PathBuf;
use std::process::ExitCode;
use supplier_risk_core::config;
use supplier_risk_core::pipeline::Services;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let cfg = config::load(cli.config.as_deref())?;
    let services = Services::from_config(cfg)?;

    let (interaction, outcome) = run(&services, cli.command).await;
    match outcome {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = ?err, "interaction failed");
            eprintln!("{}", session::user_message(interaction, &err));
            Ok(ExitCode::FAILURE)
        }
    }
}

#[derive(Parser)]
#[command(name = "supplier-risk")]
#[command(about = "Supplier risk & delay dashboard", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Supplier delays, survey challenges, locations and insolvency signals
    Overview,
    /// Analyze a supplier PDF: keyword view, measures and summary export
    Analyze {
        /// PDF report to analyze
        file: PathBuf,
        /// Directory to write risk_summary.txt into
        #[arg(long)]
        out: Option<PathBuf>,
        /// Number of keywords to show
        #[arg(long, default_value_t = 30)]
        top: usize,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify a supplier report or news article
    Classify {
        /// Text to classify
        text: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Send (or simulate) an alert email
    Alert {
        /// Destination address
        #[arg(long, default_value = "")]
        to: String,
        /// Subject line; defaults to alerts.subject from config
        #[arg(long)]
        subject: Option<String>,
        /// Message body
        #[arg(long, default_value = "Supplier risk threshold exceeded.")]
        message: String,
    },
    /// Extended survey insights; optionally export Full_Survey.pdf
    Survey {
        /// Directory to write Full_Survey.pdf into
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

async fn run(services: &Services, command: Commands) -> (Interaction, Result<String>) {
    match command {
        Commands::Overview => (
            Interaction::Overview,
            Ok(session::overview(services, chrono::Local::now())),
        ),
        Commands::Analyze {
            file,
            out,
            top,
            json,
        } => {
            let result = session::analyze(services, &file, out.as_deref(), top)
                .await
                .and_then(|analysis| {
                    if json {
                        Ok(serde_json::to_string_pretty(&analysis)? + "\n")
                    } else {
                        Ok(session::render_analysis(&analysis, top, chrono::Local::now()))
                    }
                });
            (Interaction::Analyze, result)
        }
        Commands::Classify { text, json } => {
            let result = session::classify(services, &text)
                .await
                .and_then(|res| {
                    if json {
                        Ok(serde_json::to_string_pretty(&res)? + "\n")
                    } else {
                        Ok(session::render_classification(&res))
                    }
                });
            (Interaction::Classify, result)
        }
        Commands::Alert {
            to,
            subject,
            message,
        } => {
            let result = session::alert(services, &to, subject.as_deref(), &message)
                .await
                .map(|outcome| session::render_alert(&outcome));
            (Interaction::Alert, result)
        }
        Commands::Survey { export } => (
            Interaction::Survey,
            session::survey(services, export.as_deref(), chrono::Local::now()),
        ),
    }
}
