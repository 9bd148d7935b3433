//! A game of snake played by the cycle agent, one tick at a time

use tracing::{debug, warn};

use super::orchestrator::CycleAgent;
use crate::cycle::{CycleError, Result};
use crate::game::{Action, Cell, GameConfig, GameEngine, GameState, Snake, StepResult};

/// What happened during one autopilot tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// The cycle was rewritten before moving
    pub optimized: bool,
    pub step: StepResult,
}

/// A game played by a [`CycleAgent`].
///
/// The snake starts laid out along the cycle with its head in the middle of
/// the board, so from the first tick the body trails the head in loop order.
pub struct AgentSession {
    engine: GameEngine,
    state: GameState,
    agent: CycleAgent,
    optimize: bool,
}

impl AgentSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::start(GameEngine::new(config))
    }

    /// Same as [`AgentSession::new`] with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::start(GameEngine::with_seed(config, seed))
    }

    fn start(mut engine: GameEngine) -> Result<Self> {
        let optimize = engine.config().optimize;
        let (agent, snake) = Self::lay_out(engine.config())?;
        let state = engine.reset_with_snake(snake);

        Ok(Self {
            engine,
            state,
            agent,
            optimize,
        })
    }

    /// Fresh cycle and a fresh snake. Food placement keeps its random stream
    /// and the shortcut setting is left as it is.
    pub fn reset(&mut self) -> Result<()> {
        let (agent, snake) = Self::lay_out(self.engine.config())?;
        self.agent = agent;
        self.state = self.engine.reset_with_snake(snake);
        Ok(())
    }

    fn lay_out(config: &GameConfig) -> Result<(CycleAgent, Snake)> {
        let head = Cell::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        let agent = CycleAgent::new(config.grid_width, config.grid_height, head)?;

        let cycle = agent.cycle();
        let length = config.initial_snake_length.clamp(1, cycle.len());
        let mut body = Vec::with_capacity(length);
        let mut cell = Some(head);
        while let Some(segment) = cell {
            if body.len() == length {
                break;
            }
            body.push(segment);
            cell = cycle.predecessor(segment);
        }

        let snake = Snake::from_body(body).ok_or_else(|| {
            CycleError::Structural(format!("cannot lay a snake behind {head}"))
        })?;
        Ok((agent, snake))
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn agent(&self) -> &CycleAgent {
        &self.agent
    }

    pub fn optimize_enabled(&self) -> bool {
        self.optimize
    }

    pub fn set_optimize(&mut self, optimize: bool) {
        self.optimize = optimize;
    }

    /// Flip shortcut search on or off, returning the new setting
    pub fn toggle_optimize(&mut self) -> bool {
        self.optimize = !self.optimize;
        self.optimize
    }

    /// Cells the head will visit before reaching the food
    pub fn planned_path(&self) -> Vec<Cell> {
        self.agent.path_to(self.state.food)
    }

    /// Optionally shorten the cycle, then move one cell along it
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.is_over() {
            let step = self.engine.step(&mut self.state, Action::Continue);
            return TickOutcome {
                optimized: false,
                step,
            };
        }

        let optimized = self.optimize
            && self
                .agent
                .optimize(self.state.food, &self.state.snake.occupied());

        let direction = self.agent.next();
        let step = self.engine.step(&mut self.state, Action::Move(direction));

        let head = self.state.snake.head();
        if self.agent.position() != head {
            warn!(
                expected = %self.agent.position(),
                %head,
                "snake left the cycle"
            );
            self.agent.sync(head);
        }
        if step.info.ate_food {
            debug!(score = self.state.score, food = %self.state.food, "food eaten");
        }

        TickOutcome { optimized, step }
    }
}
