use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use jsguard::{render_error, transform};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Strip typed parameter annotations and compile them into runtime guards.
#[derive(Parser, Debug)]
#[command(name = "jsguard", version, about)]
struct Args {
    /// Source file to transform, or `-` for stdin
    input: PathBuf,

    /// Where to write the result (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log scanning decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<ExitCode> {
    let reading_stdin = args.input.as_os_str() == "-";
    let file_name = if reading_stdin {
        String::from("<stdin>")
    } else {
        args.input.to_string_lossy().into_owned()
    };

    let source = if reading_stdin {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        source
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?
    };

    let start = Instant::now();

    let transformed = match transform(&source, Some(file_name)) {
        Ok(transformed) => transformed,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(elapsed = ?start.elapsed(), "transformed");

    match &args.output {
        Some(path) => fs::write(path, transformed)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(transformed.as_bytes())
            .context("Failed to write stdout")?,
    }

    Ok(ExitCode::SUCCESS)
}
