use std::io::{IsTerminal, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdfpeek_core::config_file::{self, Settings};
use pdfpeek_pdftotext::PdftotextBackend;

mod output;

use output::ColorMode;

/// Print a plain-text preview of a PDF using poppler's pdftotext
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF file
    pdf: PathBuf,

    /// Preview length in characters [default: 1000]
    #[arg(short = 'n', long)]
    chars: Option<NonZeroUsize>,

    /// Extraction program to run instead of `pdftotext` from PATH
    #[arg(long, value_name = "PATH")]
    pdftotext: Option<String>,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color = ColorMode(
        !cli.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stderr().is_terminal(),
    );

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = output::print_error(&mut std::io::stderr(), &err, color);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries nothing but the preview.
/// `-v` flags win over `RUST_LOG`; without either only warnings show.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > config file > defaults
    let file = config_file::load_config();
    let settings = Settings::resolve(
        cli.pdftotext,
        cli.chars.map(NonZeroUsize::get),
        |name| std::env::var(name).ok(),
        &file,
    );
    tracing::debug!(
        program = %settings.program,
        max_chars = settings.max_chars,
        "resolved settings"
    );

    let backend = PdftotextBackend::new().with_program(&settings.program);
    let preview = pdfpeek_core::extract_preview(&cli.pdf, &backend, settings.max_chars)?;

    let mut stdout = std::io::stdout().lock();
    output::print_preview(&mut stdout, &preview)?;
    stdout.flush()?;
    Ok(())
}
