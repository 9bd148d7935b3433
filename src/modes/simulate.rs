//! Headless autopilot runs
//!
//! Plays a batch of games with the cycle agent as fast as possible, logs
//! rolling statistics and optionally writes a JSON report.
//!
//! # Example
//!
//! ```rust,ignore
//! use hamilton_snake::modes::{SimulateMode, SimulationConfig};
//! use hamilton_snake::game::GameConfig;
//!
//! let mut config = SimulationConfig::new(100);
//! config.game_config = GameConfig::new(10, 10);
//! config.seed = Some(42);
//!
//! let report = SimulateMode::new(config)?.run()?;
//! println!("won {} of {}", report.summary.total_wins, report.summary.total_games);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::agent::AgentSession;
use crate::game::GameConfig;
use crate::metrics::{RunStats, RunSummary};

/// Configuration for a headless run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Step limit per game; `None` allows one full lap per food
    pub max_steps: Option<usize>,

    /// Seed for food placement; `None` draws from the OS
    pub seed: Option<u64>,

    /// Where to write the JSON report, if anywhere
    pub report_path: Option<PathBuf>,

    /// Print progress every N games
    pub log_frequency: usize,

    pub game_config: GameConfig,
}

impl SimulationConfig {
    pub fn new(num_games: usize) -> Self {
        Self {
            num_games,
            max_steps: None,
            seed: None,
            report_path: None,
            log_frequency: 10,
            game_config: GameConfig::default(),
        }
    }

    fn step_limit(&self) -> usize {
        let cells = self.game_config.grid_width * self.game_config.grid_height;
        self.max_steps.unwrap_or(cells * cells)
    }
}

/// Outcome of one simulated game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub score: u32,
    pub steps: u32,
    pub won: bool,
    /// Ticks on which the cycle was rewritten
    pub shortcuts: usize,
    /// Hit the step limit before the game ended
    pub truncated: bool,
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub game_config: GameConfig,
    pub seed: Option<u64>,
    pub games: Vec<GameRecord>,
    pub summary: RunSummary,
}

pub struct SimulateMode {
    session: AgentSession,
    stats: RunStats,
    config: SimulationConfig,
}

impl SimulateMode {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let game_config = config.game_config.clone();
        let session = match config.seed {
            Some(seed) => AgentSession::with_seed(game_config, seed),
            None => AgentSession::new(game_config),
        }
        .context("Failed to set up the autopilot")?;

        Ok(Self {
            session,
            stats: RunStats::new(100),
            config,
        })
    }

    /// Play every game, then write the report if a path was given
    pub fn run(&mut self) -> Result<SimulationReport> {
        self.print_header();

        let mut games = Vec::with_capacity(self.config.num_games);
        for game in 0..self.config.num_games {
            if game > 0 {
                self.session
                    .reset()
                    .context("Failed to rebuild the cycle")?;
            }

            let record = self.run_game();
            self.stats
                .record_game(record.score, record.steps as usize, record.won);
            games.push(record);

            if (game + 1) % self.config.log_frequency.max(1) == 0 {
                self.print_progress(game + 1);
            }
        }

        let report = SimulationReport {
            game_config: self.config.game_config.clone(),
            seed: self.config.seed,
            games,
            summary: self.stats.summary(),
        };

        println!("\nSimulation complete!");
        println!("{}", self.stats.format_summary());

        if let Some(path) = &self.config.report_path {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize simulation report")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            println!("Report saved to: {:?}", path);
        }

        Ok(report)
    }

    /// Play the current game to the end or to the step limit
    fn run_game(&mut self) -> GameRecord {
        let limit = self.config.step_limit();
        let mut shortcuts = 0;
        let mut truncated = true;

        for _ in 0..limit {
            let outcome = self.session.tick();
            self.stats.record_tick(outcome.optimized);
            if outcome.optimized {
                shortcuts += 1;
            }
            if outcome.step.terminated {
                truncated = false;
                break;
            }
        }

        let state = self.session.state();
        if truncated {
            warn!(limit, score = state.score, "game hit the step limit");
        } else if !state.won {
            warn!(score = state.score, steps = state.steps, "autopilot lost a game");
        }
        info!(score = state.score, steps = state.steps, won = state.won, shortcuts, "game finished");

        GameRecord {
            score: state.score,
            steps: state.steps,
            won: state.won,
            shortcuts,
            truncated,
        }
    }

    fn print_header(&self) {
        let game = &self.config.game_config;
        println!("{}", "=".repeat(70));
        println!("Autopilot Simulation - Hamilton Snake");
        println!("{}", "=".repeat(70));
        println!("Games: {}", self.config.num_games);
        println!("Grid: {}x{}", game.grid_width, game.grid_height);
        println!("Initial length: {}", game.initial_snake_length);
        println!("Shortcuts: {}", if game.optimize { "on" } else { "off" });
        match self.config.seed {
            Some(seed) => println!("Seed: {}", seed),
            None => println!("Seed: random"),
        }
        println!("Step limit: {} per game", self.config.step_limit());
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, game: usize) {
        println!(
            "[Game {}/{}] {}",
            game,
            self.config.num_games,
            self.stats.format_summary()
        );
    }
}
