//! Anchor Grid CLI
//!
//! Usage:
//!   anchor-grid [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --scale <FACTOR>  Scale factor applied after the script ran
//!       --dump            Print resolved bounds instead of SVG
//!   -d, --debug           Dump resolved bounds to stderr as well
//!   -h, --help            Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use anchor_grid::{build_table, render_with_config, RenderConfig, RenderError};

#[derive(Parser)]
#[command(name = "anchor-grid")]
#[command(about = "Replay a table layout script and render it as SVG")]
struct Cli {
    /// Script file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Scale factor, between 0.5 and 2.0
    #[arg(short, long)]
    scale: Option<f64>,

    /// Print the resolved geometry instead of SVG
    #[arg(long)]
    dump: bool,

    /// Debug mode: dump resolved bounds to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = RenderConfig::new().with_debug(cli.debug);
    if let Some(factor) = cli.scale {
        config = config.with_scale(factor);
    }

    let output = if cli.dump {
        build_table(&source, &config).map(|table| table.to_string())
    } else {
        render_with_config(&source, config)
    };

    match output {
        Ok(output) => print!("{}", output),
        Err(RenderError::Script(err)) => {
            eprint!("{}", err.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
