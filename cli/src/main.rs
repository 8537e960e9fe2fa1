use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use minefair_core::{
    CellIndex, MineLayout, SeedTriple, derive_from, hash_server_seed, verify_server_seed,
};
use minefair_protocol::DrawRequest;
use tracing_subscriber::filter::LevelFilter;

use crate::config::{OutputFormat, Settings};

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Provably fair mine layouts on a 5x5 grid", long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Settings file (TOML)
    #[arg(long, global = true, env = "MINEFAIR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive the mine layout for a seed triple
    Predict {
        client_seed: String,
        server_seed: String,
        #[arg(allow_negative_numbers = true)]
        nonce: String,
        #[arg(allow_negative_numbers = true)]
        mines: String,
        /// Overrides the output format from the settings file
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Also write the grid as an SVG image
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Check a claimed mine layout against a seed triple
    Verify {
        client_seed: String,
        server_seed: String,
        nonce: u64,
        /// Claimed mine cells, space or comma separated
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        mines: Vec<CellIndex>,
    },
    /// Print the SHA-256 commitment of a server seed
    HashSeed { server_seed: String },
    /// Check a revealed server seed against its published hash
    CheckSeed { server_seed: String, hash: String },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if let Some(log_level) = cli.verbose.log_level() {
        init_logging(log_level);
    }
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Predict {
            client_seed,
            server_seed,
            nonce,
            mines,
            format,
            svg,
        } => {
            let request = DrawRequest::from_tokens(&[client_seed, server_seed, nonce, mines])?;
            let report = request.execute()?;
            log::info!(
                "Derived {} mines for nonce {}",
                report.mine_count,
                report.nonce
            );

            match format.unwrap_or(settings.output.format) {
                OutputFormat::Text => {
                    println!("{}", report.caption());
                    println!("{}", render::text_grid(&report.mines, &settings.render));
                }
                OutputFormat::Json => println!("{}", report.to_json()?),
            }

            if let Some(path) = svg {
                std::fs::write(&path, render::svg_grid(&report.mines, &settings.render))
                    .with_context(|| format!("Could not write SVG to {}", path.display()))?;
                log::info!("Wrote grid image to {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            client_seed,
            server_seed,
            nonce,
            mines,
        } => {
            let seeds = SeedTriple::new(client_seed, server_seed, nonce)?;
            let claimed = MineLayout::from_indices(&mines)?;
            let derived = derive_from(&seeds, claimed.draw_config());

            if derived == claimed {
                println!("Verified: {:?}", derived.mines());
                Ok(ExitCode::SUCCESS)
            } else {
                println!(
                    "Mismatch: claimed {:?}, derived {:?}",
                    claimed.mines(),
                    derived.mines()
                );
                Ok(ExitCode::FAILURE)
            }
        }
        Command::HashSeed { server_seed } => {
            println!("{}", hash_server_seed(&server_seed));
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckSeed { server_seed, hash } => {
            if verify_server_seed(&server_seed, &hash) {
                println!("Server seed matches the published hash");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("Server seed does NOT match the published hash");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn init_logging(log_level: log::Level) {
    let max_level = match log_level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
