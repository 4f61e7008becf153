//! CLI application logic.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use slidesmith_server::Dispatcher;

#[derive(Parser)]
#[command(name = "slidesmith")]
#[command(author, version, about = "JSON-driven slide deck generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deck from a content tree and a design document
    Generate {
        /// Content tree JSON file
        #[arg(short, long)]
        content: PathBuf,

        /// Design document JSON file
        #[arg(short, long)]
        design: PathBuf,

        /// Output path; defaults to output/<content-stem>_generated.pptx
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the dispatcher over stdin/stdout, one JSON record per line
    Serve,
}

pub fn run_cli() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            content,
            design,
            output,
        } => {
            let written = generate_command(&content, &design, output.as_deref())?;
            println!("{}", written.display());
        }
        Commands::Serve => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            serve_command(stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}

/// Run the full generation pipeline and return the written path.
pub fn generate_command(
    content: &Path,
    design: &Path,
    output: Option<&Path>,
) -> Result<PathBuf> {
    slidesmith_core::generate_deck(design, content, output)
        .with_context(|| format!("failed to generate deck from {}", content.display()))
}

/// Drive the dispatcher over line-delimited JSON.
///
/// Each input line is one request record, each output line one response
/// record. Malformed lines answer with a failure response; only transport
/// failures end the loop.
pub fn serve_command(reader: impl BufRead, mut writer: impl Write) -> Result<()> {
    let dispatcher = Dispatcher::new();
    for line in reader.lines() {
        let line = line.context("failed to read request line")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = dispatcher.handle_line(&line);
        let record =
            serde_json::to_string(&response).context("failed to serialize response")?;
        writeln!(writer, "{record}").context("failed to write response line")?;
        writer.flush().context("failed to flush response")?;
    }
    log::debug!("request stream closed");
    Ok(())
}
