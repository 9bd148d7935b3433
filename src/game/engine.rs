use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use super::{
    action::Action,
    config::GameConfig,
    state::{CollisionType, GameState, Snake},
};
use crate::grid::{Cell, Direction};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether this step filled the board
    pub won: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn finished(info: StepInfo) -> Self {
        Self {
            terminated: true,
            info,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Cell::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        self.reset_with_snake(snake)
    }

    /// Start a game with a snake laid out by the caller
    pub fn reset_with_snake(&mut self, snake: Snake) -> GameState {
        let food = self
            .spawn_food_avoid_snake(&snake)
            .unwrap_or_else(|| snake.head());

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            length = snake.len(),
            "new game"
        );

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.is_over() {
            return StepResult::finished(StepInfo {
                ate_food: false,
                collision_type: None,
                won: false,
            });
        }

        // Update direction based on action (prevent 180° turns)
        match action {
            Action::Move(new_direction) => {
                if !state.snake.direction.is_opposite(new_direction) {
                    state.snake.direction = new_direction;
                }
            }
            Action::Continue => {
                // Keep current direction
            }
        }

        // Calculate new head position
        let new_head = state.snake.head() + state.snake.direction;

        // Check for collisions
        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;
            state.steps += 1;
            info!(score = state.score, steps = state.steps, ?collision_type, "game over");

            return StepResult::finished(StepInfo {
                ate_food: false,
                collision_type: Some(collision_type),
                won: false,
            });
        }

        // Check if snake ate food
        let ate_food = new_head == state.food;

        // Move snake (grow if ate food)
        state.snake.move_snake(ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            match self.spawn_food_avoid_snake(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    state.won = true;
                    info!(score = state.score, steps = state.steps, "board filled");
                    return StepResult::finished(StepInfo {
                        ate_food,
                        collision_type: None,
                        won: true,
                    });
                }
            }
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
                won: false,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Cell) -> Option<CollisionType> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a random empty position, `None` once the board is full
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Cell> {
        let occupied = snake.occupied();
        let empty: Vec<Cell> = (0..self.config.grid_height as i32)
            .flat_map(|row| (0..self.config.grid_width as i32).map(move |col| Cell::new(col, row)))
            .filter(|cell| !occupied.contains(cell))
            .collect();

        empty.choose(&mut self.rng).copied()
    }
}
