use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use selection_core::constants::TRAIT_LEVELS;
use selection_core::{DayMetrics, RunSummary, SimConfig, World};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "selection")]
#[command(about = "Natural selection simulation: foraging, predation and mutation on a grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation for a number of days
    Run {
        /// Path to config file (JSON). Defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of days to simulate
        #[arg(long, default_value_t = 10)]
        days: usize,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print every organism's status after each day
        #[arg(long)]
        print_organisms: bool,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).context("failed to open config file")?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).context("failed to parse config")
}

fn print_progression(label: &str, progression: &[[usize; TRAIT_LEVELS]]) {
    println!("{label} progression (counts for values 1..=5):");
    for (day, counts) in progression.iter().enumerate() {
        println!("  day {:>3}: {:?}", day + 1, counts);
    }
}

fn print_day(world: &World, metrics: &DayMetrics) {
    println!("Day {}", metrics.day);
    for status in world.organism_statuses() {
        println!("{status}");
    }
}

fn report(summary: &RunSummary) {
    print_progression("Mass", &summary.mass_progression());
    print_progression("Speed", &summary.speed_progression());
    print_progression("Sense", &summary.sense_progression());
    println!(
        "Run complete. Final alive: {}/{} (births: {})",
        summary.final_alive_count,
        summary.final_organisms.len(),
        summary.total_births()
    );
}

fn write_summary(out_dir: &Path, summary: &RunSummary) -> Result<()> {
    std::fs::create_dir_all(out_dir).context("failed to create output directory")?;
    let summary_path = out_dir.join("summary.json");
    let file = File::create(summary_path).context("failed to create summary file")?;
    serde_json::to_writer_pretty(file, summary).context("failed to write summary")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            config,
            out,
            days,
            seed,
            print_organisms,
        } => {
            let mut sim_config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                sim_config.seed = seed;
            }
            sim_config.validate().context("Config validation error")?;

            let mut world = World::new(sim_config).context("failed to initialize world")?;
            tracing::info!(
                width = world.config().world_width,
                height = world.config().world_height,
                seed = world.config().seed,
                "world initialized"
            );
            let summary = world
                .run_experiment_with(days, |world, metrics| {
                    if print_organisms {
                        print_day(world, metrics);
                    }
                })
                .context("failed to run experiment")?;

            report(&summary);
            if let Some(out_dir) = out {
                write_summary(&out_dir, &summary)?;
                tracing::info!(path = ?out_dir, "results saved");
            }
        }
    }
    Ok(())
}
