//! Vitrine CLI
//!
//! Replay page fixtures against the widget runtime on a virtual clock.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vitrine_app::VitrineConfig;
use vitrine_cli::fixture::Fixture;
use vitrine_cli::{doctor, load_config, simulate};
use vitrine_platform::{JsonFileStore, MemoryStore};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vitrine page widget simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a fixture and print every document change
    Simulate {
        /// Page fixture (TOML)
        fixture: PathBuf,

        /// Runtime configuration; defaults to vitrine.toml next to the fixture
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop the clock at this time (ms)
        #[arg(short, long)]
        until: Option<u64>,

        /// Persist preferences to this JSON file instead of memory
        #[arg(long)]
        store: Option<PathBuf>,

        /// Seed the particle field
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report which widgets mount on a fixture
    Doctor {
        /// Page fixture (TOML)
        fixture: PathBuf,

        /// Runtime configuration; defaults to vitrine.toml next to the fixture
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the default configuration
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            fixture,
            config,
            until,
            store,
            seed,
        } => cmd_simulate(&fixture, config.as_deref(), until, store.as_deref(), seed),

        Commands::Doctor { fixture, config } => cmd_doctor(&fixture, config.as_deref()),

        Commands::Config { output } => cmd_config(output.as_deref()),
    }
}

fn cmd_simulate(
    fixture_path: &Path,
    config_path: Option<&Path>,
    until: Option<u64>,
    store_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<()> {
    let fixture = Fixture::load(fixture_path)?;
    let page = fixture.build()?;
    let mut config = load_config(config_path, fixture_path)?;
    if seed.is_some() {
        config.particles.seed = seed;
    }

    info!(
        "Simulating {} ({} elements, {} events)",
        fixture_path.display(),
        fixture.elements.len(),
        page.script.len()
    );

    let sim = match store_path {
        Some(path) => {
            let store = JsonFileStore::open(path)
                .with_context(|| format!("Failed to open store {}", path.display()))?;
            simulate::run(page, store, config, until)
        }
        None => simulate::run(page, MemoryStore::new(), config, until),
    };

    for line in &sim.trace {
        println!("{}", line);
    }
    info!("Stopped at {}ms", sim.ended_at);
    Ok(())
}

fn cmd_doctor(fixture_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let page = Fixture::load(fixture_path)?.build()?;
    let config = load_config(config_path, fixture_path)?;

    let checks = doctor::diagnose(page, config);
    let inert = doctor::print_report(&checks);
    if inert > 0 {
        info!("{} widget(s) will stay inert on this page", inert);
    }
    Ok(())
}

fn cmd_config(output: Option<&Path>) -> Result<()> {
    let content = VitrineConfig::default().to_toml()?;
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote default configuration to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
