use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use hamilton_snake::game::GameConfig;
use hamilton_snake::logging;
use hamilton_snake::modes::{AutopilotMode, HumanMode, SimulateMode, SimulationConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hamilton_snake")]
#[command(version, about = "Snake autopilot driven by a self-rewriting Hamiltonian cycle")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "autopilot")]
    mode: Mode,

    /// Grid width (even for the autopilot)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (even for the autopilot)
    #[arg(long)]
    height: Option<usize>,

    /// JSON game configuration; flags given on the command line win
    #[arg(long)]
    config: Option<PathBuf>,

    /// Follow the initial cycle without looking for shortcuts
    #[arg(long)]
    no_optimize: bool,

    /// Number of games to play (simulate mode only)
    #[arg(long, default_value = "10")]
    games: usize,

    /// Step limit per game (simulate mode only)
    #[arg(long)]
    max_steps: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON report here (simulate mode only)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Send diagnostics to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch the cycle agent play
    Autopilot,
    /// Run the cycle agent headless and report statistics
    Simulate,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.no_optimize {
            config.optimize = false;
        }

        let checked = match self.mode {
            Mode::Human => config.validate(),
            Mode::Autopilot | Mode::Simulate => config.validate_for_autopilot(),
        };
        checked.map_err(|reason| anyhow!("Invalid configuration: {reason}"))?;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = match cli.seed {
                Some(seed) => HumanMode::with_seed(config, seed),
                None => HumanMode::new(config),
            };
            human_mode.run().await?;
        }
        Mode::Autopilot => {
            let mut autopilot_mode = match cli.seed {
                Some(seed) => AutopilotMode::with_seed(config, seed)?,
                None => AutopilotMode::new(config)?,
            };
            autopilot_mode.run().await?;
        }
        Mode::Simulate => {
            let mut simulation = SimulationConfig::new(cli.games);
            simulation.game_config = config;
            simulation.max_steps = cli.max_steps;
            simulation.seed = cli.seed;
            simulation.report_path = cli.report;

            // Runs synchronously; keep it off the async workers.
            tokio::task::spawn_blocking(move || SimulateMode::new(simulation)?.run())
                .await
                .context("Simulation task panicked")??;
        }
    }

    Ok(())
}
