use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env, Target};

use fileshuttle::config::{parse_drive_spec, Config, Overrides};

#[derive(Parser, Debug)]
#[command(name = "fileshuttle")]
#[command(about = "Browse mounted drives and stream files in chunks")]
struct Cli {
    /// TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Mount a host directory as a drive letter, e.g. U=/media/usb (repeatable)
    #[arg(long = "drive", value_name = "L=DIR", value_parser = parse_drive)]
    drives: Vec<(char, PathBuf)>,

    /// Bytes per chunk (clamped to 1024)
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,

    /// Milliseconds between chunks
    #[arg(long, value_name = "MS")]
    chunk_delay: Option<u64>,

    /// File that receives the transmitted chunks
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Message delivered to the applet at start-up, e.g. "U:/notes.txt?"
    #[arg(long, value_name = "TEXT")]
    request: Option<String>,

    /// Write logs to this file (the terminal is busy with the UI)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn parse_drive(spec: &str) -> Result<(char, PathBuf), String> {
    parse_drive_spec(spec).map_err(|e| e.to_string())
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            Builder::from_env(Env::default().default_filter_or("off")).init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let overrides = Overrides {
        drives: cli.drives,
        chunk_size: cli.chunk_size,
        chunk_delay_ms: cli.chunk_delay,
        output: cli.output,
    };
    let config = Config::load(cli.config.as_deref(), overrides)?;

    fileshuttle::ui::run(config, cli.request)
}
