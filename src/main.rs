use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quizdrill::progress::ProgressStore;
use quizdrill::session::summarize_all;
use quizdrill::{App, Config, Repository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quizdrill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bank index document (overrides the config file)
    #[arg(short, long, global = true)]
    bank_index: Option<PathBuf>,

    /// Questions per session (overrides the config file)
    #[arg(short, long, global = true)]
    session_size: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every question bank and report the pool size
    Check,
    /// Print the all-time topic ranking
    Summary,
    /// Delete all recorded progress
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(path) = cli.bank_index {
        config.bank_index = path;
    }
    if let Some(size) = cli.session_size {
        config.session_size = size;
    }
    let data_dir = config.data_dir()?;

    match cli.command {
        Some(Commands::Check) => {
            init_logging(None)?;
            let repository = Repository::load(&config.bank_index).await?;
            println!("{} questions loaded from {}", repository.len(), config.bank_index.display());
        }
        Some(Commands::Summary) => {
            init_logging(None)?;
            let state = ProgressStore::new(&data_dir).load();
            let topics = summarize_all(&state);
            if topics.is_empty() {
                println!("No attempts recorded yet.");
            }
            for t in topics {
                println!(
                    "{:<8} {:<28} answered {:>3}  accuracy {:>4.0}%  hints {:>3}  weakness {:.2}",
                    t.unit,
                    t.topic,
                    t.total,
                    t.accuracy * 100.0,
                    t.hints,
                    t.weakness_avg
                );
            }
        }
        Some(Commands::Reset) => {
            init_logging(None)?;
            ProgressStore::new(&data_dir).reset()?;
            println!("Progress cleared.");
        }
        None => {
            // The TUI owns the terminal, so logs go to a file
            init_logging(Some(data_dir.as_path()))?;
            let mut app = App::new(config)?;
            app.run().await?;
        }
    }

    Ok(())
}

/// Initialize logging to stderr, or to `quizdrill.log` inside `log_dir`
fn init_logging(log_dir: Option<&std::path::Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quizdrill=info".into());

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory {:?}", dir))?;
            let path = dir.join("quizdrill.log");
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
