//! Watch the cycle agent play in the terminal
//!
//! The planned route to the food is drawn over the board, so every cycle
//! rewrite is visible as the route jumps to a shorter one.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - O: Toggle shortcut search
//! - R: Restart with a fresh cycle
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use ratatui::Frame;
use std::time::Duration;
use tracing::info;

use super::terminal::{self, Screen};
use crate::agent::AgentSession;
use crate::game::GameConfig;
use crate::input::{Controls, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{AutopilotStatus, Hud, Renderer};

/// Pause before a finished game restarts on its own
const RESTART_DELAY: Duration = Duration::from_secs(2);

pub struct AutopilotMode {
    session: AgentSession,
    metrics: GameMetrics,
    renderer: Renderer,
    paused: bool,
    /// Configured `tick_millis` until a speed key picks a preset
    tick: Duration,
    /// Time spent on the end screen of a finished game
    idle: Duration,
}

impl AutopilotMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_session(AgentSession::new(config).context("Failed to set up the autopilot")?)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_session(
            AgentSession::with_seed(config, seed).context("Failed to set up the autopilot")?,
        )
    }

    fn with_session(session: AgentSession) -> Result<Self> {
        let tick = Duration::from_millis(session.config().tick_millis);
        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            paused: false,
            tick,
            idle: Duration::ZERO,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        terminal::run(self).await
    }

    /// One tick: move the snake, or count down to an automatic restart
    fn advance(&mut self) -> Result<()> {
        if self.session.state().is_over() {
            self.idle += self.tick;
            if self.idle >= RESTART_DELAY {
                self.restart()?;
            }
            return Ok(());
        }

        let outcome = self.session.tick();
        if outcome.optimized {
            self.metrics.on_shortcut();
        }
        if outcome.step.terminated {
            let state = self.session.state();
            self.metrics.on_game_over(state.score, state.won);
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        self.session
            .reset()
            .context("Failed to rebuild the cycle")?;
        self.metrics.on_game_start();
        self.idle = Duration::ZERO;
        Ok(())
    }
}

impl Screen for AutopilotMode {
    fn controls(&self) -> Controls {
        Controls::Autopilot
    }

    fn tick_period(&self) -> Duration {
        self.tick
    }

    fn handle_key(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::ToggleOptimize => {
                let enabled = self.session.toggle_optimize();
                info!(enabled, "shortcut search toggled");
            }
            KeyAction::SetSpeed(speed) => self.tick = speed.tick_interval(),
            KeyAction::Restart => self.restart()?,
            KeyAction::Steer(_) | KeyAction::ToggleHint | KeyAction::Quit | KeyAction::None => {}
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        if self.paused {
            return Ok(());
        }
        self.advance()
    }

    fn draw(&mut self, frame: &mut Frame) {
        if !self.session.state().is_over() {
            self.metrics.update();
        }
        let path = self.session.planned_path();
        let hud = Hud::Autopilot {
            path: &path,
            paused: self.paused,
            status: AutopilotStatus {
                tick: self.tick,
                optimize: self.session.optimize_enabled(),
            },
        };
        self.renderer
            .render(frame, self.session.state(), &self.metrics, &hud);
    }
}
