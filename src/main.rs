//! Command-line front end: picks one polyomino and prints its connection configs.

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use smores_conn::{CatalogConfig, ConnectionGenerator, GeneratorConfig, catalog, pick};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smores-conn")]
#[command(about = "Enumerate connector pairings for a polyomino of modular robots")]
#[command(version)]
struct Cli {
    /// Number of cells (modules) in the shape
    #[arg(short = 'n', long, default_value = "5")]
    cells: usize,

    /// Also consider shapes without any symmetry
    #[arg(long)]
    all_shapes: bool,

    /// Keep unbranched chain shapes other than the straight bar
    #[arg(long)]
    keep_lines: bool,

    /// Keep pose assignments that are symmetry images of earlier ones
    #[arg(long)]
    keep_symmetric: bool,

    /// Seed for picking the shape
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Print configurations as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let shapes = catalog(&CatalogConfig {
        cells: cli.cells,
        symmetric_only: !cli.all_shapes,
        exclude_line: !cli.keep_lines,
    })?;

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let Some(shape) = pick(&shapes, &mut rng) else {
        return Err(format!("no {}-cell shape passes the filters", cli.cells).into());
    };
    info!(symmetry = shape.symmetry(), "Selected shape");

    let generator = ConnectionGenerator::new(GeneratorConfig {
        exclude_symmetric: !cli.keep_symmetric,
        ..Default::default()
    });
    let configs = generator.generate(shape)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&configs)?);
    } else {
        print!("{shape}");
        for config in &configs {
            let pairs: Vec<String> = config.connections.iter().map(|p| p.to_string()).collect();
            println!("{} {}", config.poses, pairs.join(" "));
        }
    }
    Ok(())
}
