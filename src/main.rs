mod backends;
mod commands;
mod render;
mod settings;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use settings::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "almanac")]
#[command(about = "Generate .ics calendars and a browsable page of cultural events from AI-generated listings")]
struct Cli {
    /// Show debug logs (prompts, raw replies, skipped lines)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query every configured subject and write all calendars plus index.html
    Generate {
        /// Directory of group documents (*.json)
        #[arg(long)]
        config_dir: Option<PathBuf>,

        /// Where to write the calendars and page
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Year to request events for (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Maximum number of backend queries in flight
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Skip all backend calls
        #[arg(long)]
        disable_ai: bool,

        /// Settings file (defaults to ./almanac.toml when present)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Print the prompt a backend would receive for a subject
    Prompt {
        subject: String,

        /// Extra hint appended to the prompt
        #[arg(long)]
        info: Option<String>,

        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Parse a saved backend reply and show the events it yields
    Parse {
        file: PathBuf,

        /// Subject the reply was generated for
        #[arg(short, long)]
        subject: String,
    },
    /// List the entries of an emitted .ics file
    Inspect { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            config_dir,
            output_dir,
            year,
            jobs,
            disable_ai,
            settings,
        } => {
            let mut settings = Settings::load(settings.as_deref())?;
            if let Some(dir) = config_dir {
                settings.config_dir = dir;
            }
            if let Some(dir) = output_dir {
                settings.output_dir = dir;
            }
            if year.is_some() {
                settings.year = year;
            }
            if let Some(jobs) = jobs {
                settings.max_concurrency = jobs;
            }
            settings.disable_ai |= disable_ai;

            commands::generate::run(settings).await
        }
        Commands::Prompt {
            subject,
            info,
            year,
        } => {
            let year = match year {
                Some(year) => year,
                None => Settings::load(None)?.year(),
            };
            commands::prompt::run(subject, info, year);
            Ok(())
        }
        Commands::Parse { file, subject } => commands::parse::run(&file, &subject),
        Commands::Inspect { file } => commands::inspect::run(&file),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "almanac=debug,almanac_core=debug"
    } else {
        "almanac=info,almanac_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
