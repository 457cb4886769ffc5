use std::process::ExitCode;

use clap::Parser;

use bsbi_indexer::{driver, BlockSizeUnit, Config};

/// Build a BSBI inverted index over a directory of text files.
#[derive(Parser, Debug)]
#[command(name = "bsbi-indexer", version, about)]
struct Cli {
    /// Block size (an integer)
    #[arg(short = 's', long = "size", default_value_t = 512)]
    size: u64,

    /// Block size unit, in [K, M, G]
    #[arg(short = 'u', long = "unit", default_value = "k")]
    unit: String,

    /// The directory path for input documents
    #[arg(short = 'd', long = "dir", default_value = "HillaryEmails")]
    dir: String,

    /// The output directory path
    #[arg(short = 'o', long = "output", default_value = "Output")]
    output: String,

    /// Track and display memory usage (will degrade the performance)
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let unit = match BlockSizeUnit::parse(&cli.unit) {
        Some(u) => u,
        None => {
            eprintln!("error: unit must be one of K, M, G (case-insensitive), got {:?}", cli.unit);
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::new(cli.size, unit, &cli.dir, &cli.output, cli.verbose) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match driver::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
