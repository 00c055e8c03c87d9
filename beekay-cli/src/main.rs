use anyhow::{bail, Context, Result};
use beekay_chat::{Session, SessionConfig};
use beekay_core::{ReportRequest, SystemClock};
use beekay_ingest::load_entries_csv;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod chat;
mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "beekay", version, about = "Conversational bookkeeping assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat on stdin/stdout
    Chat {
        /// Seed the entry store from a CSV file
        #[arg(long)]
        entries: Option<PathBuf>,
    },

    /// Classify one message and print the assistant's reply
    Say {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,

        /// Seed the entry store from a CSV file
        #[arg(long)]
        entries: Option<PathBuf>,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a report from a CSV of entries and export it as text
    Report {
        /// Full month name (with --year)
        #[arg(long, requires = "year", conflicts_with_all = ["from", "to"])]
        month: Option<String>,

        #[arg(long, requires = "month")]
        year: Option<String>,

        /// First day, YYYY-MM-DD (with --to)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day, inclusive
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,

        /// Only entries in this category
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        entries: Option<PathBuf>,

        /// Write here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.beekay/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg.log.level);

    match cli.command {
        Command::Chat { entries } => {
            let session = open_session(&cfg, cfg.session_config(), entries.as_deref())?;
            chat::run_chat(session, cfg.export.dir.clone()).await?;
        }

        Command::Say { text, entries, json } => {
            let session = open_session(&cfg, instant(), entries.as_deref())?;
            let text = text.join(" ");
            let Some(reply) = session.submit_and_wait(&text).await else {
                bail!("nothing to say");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&reply).context("serialize reply")?);
            } else {
                println!("{}", chat::format_reply(&reply));
            }
        }

        Command::Report {
            month,
            year,
            from,
            to,
            category,
            entries,
            out,
        } => {
            let session = open_session(&cfg, instant(), entries.as_deref())?;
            let mut request = match (month, year, from, to) {
                (Some(month), Some(year), _, _) => ReportRequest::monthly(month, year),
                (_, _, Some(from), Some(to)) => {
                    if from > to {
                        bail!("--from {from} is after --to {to}");
                    }
                    ReportRequest::custom(from, to)
                }
                _ => ReportRequest::default(),
            };
            if let Some(category) = category {
                request = request.with_category(category);
            }

            let report = session.request_report(&request);
            let (_, text) = session
                .export_report(&report.id)
                .context("report vanished before export")?;

            match out {
                Some(path) => {
                    std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
                    println!("Wrote {} ({} entries)", path.display(), report.entries.len());
                }
                None => println!("{text}"),
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Logs go to stderr; stdout carries replies only.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            ["beekay", "beekay_core", "beekay_ingest", "beekay_rules", "beekay_chat"]
                .iter()
                .map(|target| format!("{target}={level}"))
                .collect::<Vec<_>>()
                .join(","),
        )
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn instant() -> SessionConfig {
    SessionConfig {
        processing_delay: Duration::ZERO,
    }
}

fn open_session(cfg: &config::Config, session_cfg: SessionConfig, entries: Option<&Path>) -> Result<Session> {
    let clock = SystemClock::new(cfg.timezone()?);
    let session = Session::new(Arc::new(clock), session_cfg);

    if let Some(path) = entries {
        if !path.exists() {
            bail!("CSV not found: {} (pass --entries <path>)", path.display());
        }
        let seeded = load_entries_csv(path, session.context())
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(count = seeded.len(), path = %path.display(), "loaded entries");
        session.seed(seeded);
    }

    Ok(session)
}
