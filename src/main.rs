mod config;
mod input;
mod runtime;
mod svg_view;

use clap::{Parser, Subcommand};
use kurukuru_core::{Catalog, CoreState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{resolve_puzzle, PlayArgs, PlayConfig};
use crate::runtime::FrameRunner;

#[derive(Parser)]
#[command(name = "kurukuru", version, about = "Animated permutation puzzles rendered to SVG frames")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the puzzle catalog.
    List,
    /// Run the frame loop on one puzzle, feeding it scripted keys.
    Play(PlayArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::builtin()?;

    match cli.command {
        Commands::List => {
            for (index, entry) in catalog.iter().enumerate() {
                let marker = if index == catalog.default_index() { "*" } else { " " };
                println!("{marker} {} ({})", entry.slug, entry.name);
            }
        }
        Commands::Play(args) => {
            let config = PlayConfig::from_args(args)?;
            let index = resolve_puzzle(&catalog, &config.puzzle)?;
            let seed = config.seed.unwrap_or_else(|| rand::rng().random());
            info!("scramble seed {seed:#x}");
            let state = CoreState::with_selection(catalog, index)?;
            let script = input::parse_script(&config.keys);
            let runner = FrameRunner::new(state, script, StdRng::seed_from_u64(seed), &config);
            let summary = runtime::run(runner, &config).await?;
            println!(
                "{} frames, {} captured to {}, {} moves, solved: {}",
                summary.frames,
                summary.captured,
                config.out_dir.display(),
                summary.moves,
                summary.solved
            );
        }
    }
    Ok(())
}
