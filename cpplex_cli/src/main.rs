//! # cpplex CLI
//!
//! Tokenizes one C/C++ source file. Without flags the token listing goes to
//! stdout; `--json` and `--csv` write a report file instead.

use clap::Parser;
use cpplex::config::Preferences;
use cpplex::logging::{self, LogFacadeLogger};
use cpplex::output::{self, OutputFormat};
use cpplex::{file_processor, log_info, Lexer};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "cpplex", version, about = "Tokenize a C/C++ source file")]
struct Cli {
    /// Write `<stem>.tokens.json` into the results directory
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Write `<stem>.tokens.csv` into the results directory
    #[arg(long)]
    csv: bool,

    /// Results directory for --json/--csv
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// TOML preferences file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source file to tokenize
    path: PathBuf,
}

impl Cli {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Text
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let preferences = match &cli.config {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };
    init_logging(&preferences)?;

    log_info!("cpplex starting", "path" => cli.path.display());

    let file_result = file_processor::process_file(&cli.path)?;
    let lexer = Lexer::with_preferences(&preferences);
    let (rows, _metrics) = lexer.tokenize_file_result(&file_result);

    match cli.format() {
        OutputFormat::Text => print!("{}", output::render_text(&rows)),
        format => {
            let results_dir = cli.out_dir.clone().unwrap_or_else(output::default_results_dir);
            let saved = output::write_report(&rows, format, &cli.path, &results_dir)?;
            println!("Saved to: {}", saved.display());
        }
    }

    Ok(())
}

/// Route library events through `log` to env_logger on stderr, unless
/// structured JSON logging is requested. `RUST_LOG` overrides the configured
/// level on the `log` route.
fn init_logging(preferences: &Preferences) -> Result<(), Box<dyn std::error::Error>> {
    let level = preferences.logging.min_log_level;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .try_init()?;

    logging::config::init_runtime_preferences(preferences.logging.clone())?;

    if preferences.logging.use_structured_logging {
        logging::init_global_logging()?;
    } else {
        logging::init_global_logging_with_service(Arc::new(LogFacadeLogger::service()))?;
    }
    Ok(())
}
