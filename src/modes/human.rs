//! Keyboard play, with the Hamiltonian cycle available as a route hint
//!
//! On boards with even sides, H toggles an overlay showing the way to the
//! food along the cycle the autopilot would start from. Following it is
//! always safe; cutting corners is up to the player.

use anyhow::Result;
use ratatui::Frame;
use std::time::Duration;
use tracing::debug;

use super::terminal::{self, Screen};
use crate::cycle::HamiltonianCycle;
use crate::game::{Action, Cell, Direction, GameConfig, GameEngine, GameState};
use crate::input::{Controls, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    pending_direction: Option<Direction>,
    paused: bool,
    /// `None` on boards without a Hamiltonian cycle
    guide: Option<HamiltonianCycle>,
    show_hint: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    /// Same as [`HumanMode::new`] with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_engine(GameEngine::with_seed(config, seed))
    }

    fn with_engine(mut engine: GameEngine) -> Self {
        let state = engine.reset();
        let config = engine.config();
        let guide = match HamiltonianCycle::build(config.grid_width, config.grid_height) {
            Ok(cycle) => Some(cycle),
            Err(err) => {
                debug!(%err, "no route hint on this board");
                None
            }
        };

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            pending_direction: None,
            paused: false,
            guide,
            show_hint: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        terminal::run(self).await
    }

    /// Cycle route from the head to the food, when the hint is on
    pub fn hint(&self) -> Option<Vec<Cell>> {
        if !self.show_hint {
            return None;
        }
        let guide = self.guide.as_ref()?;
        Some(guide.route(self.state.snake.head(), self.state.food))
    }

    fn update_game(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map_or(Action::Continue, Action::Move);

        let result = self.engine.step(&mut self.state, action);
        if result.terminated {
            self.metrics.on_game_over(self.state.score, self.state.won);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.paused = false;
    }
}

impl Screen for HumanMode {
    fn controls(&self) -> Controls {
        Controls::Keyboard
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(self.engine.config().tick_millis)
    }

    fn handle_key(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Steer(direction) => self.pending_direction = Some(direction),
            KeyAction::Restart => self.reset_game(),
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::ToggleHint => self.show_hint = !self.show_hint,
            KeyAction::ToggleOptimize
            | KeyAction::SetSpeed(_)
            | KeyAction::Quit
            | KeyAction::None => {}
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        if !self.paused && !self.state.is_over() {
            self.update_game();
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        if !self.paused && !self.state.is_over() {
            self.metrics.update();
        }
        let hint = self.hint();
        let hud = Hud::Keyboard {
            hint: hint.as_deref(),
            paused: self.paused,
        };
        self.renderer.render(frame, &self.state, &self.metrics, &hud);
    }
}
