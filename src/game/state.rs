use std::collections::HashSet;

use crate::grid::{Cell, Direction};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev + back);
        }

        Self { body, direction }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// The direction points from the neck to the head. Returns `None` for an
    /// empty body or segments that are not chained neighbours.
    pub fn from_body(body: Vec<Cell>) -> Option<Self> {
        let head = *body.first()?;
        if body.windows(2).any(|pair| pair[0].manhattan(pair[1]) != 1) {
            return None;
        }

        let direction = body
            .get(1)
            .and_then(|&neck| neck.direction_to(head))
            .unwrap_or(Direction::Right);

        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Cell) -> bool {
        self.body_segments().contains(&pos)
    }

    /// All cells the snake occupies, head included
    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head() + self.direction;
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
    /// Set once the snake fills the whole board
    pub won: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Cell, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            is_alive: true,
            won: false,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Cell) -> bool {
        pos.col >= 0
            && pos.col < self.grid_width as i32
            && pos.row >= 0
            && pos.row < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Cell) -> bool {
        self.snake.body.contains(&pos)
    }

    /// Whether the game has ended, by death or by filling the board
    pub fn is_over(&self) -> bool {
        !self.is_alive || self.won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.body[1], Cell::new(4, 5));
        assert_eq!(snake.body[2], Cell::new(3, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn test_snake_from_body() {
        let snake =
            Snake::from_body(vec![Cell::new(2, 3), Cell::new(2, 2), Cell::new(1, 2)]).unwrap();
        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.len(), 3);

        let single = Snake::from_body(vec![Cell::new(0, 0)]).unwrap();
        assert_eq!(single.direction, Direction::Right);

        assert!(Snake::from_body(vec![]).is_none());
        assert!(Snake::from_body(vec![Cell::new(0, 0), Cell::new(2, 0)]).is_none());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        // Move without growing
        snake.move_snake(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));

        // Move with growing
        snake.move_snake(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Cell::new(5, 5))); // head
        assert!(snake.collides_with_body(Cell::new(4, 5))); // body
        assert!(!snake.collides_with_body(Cell::new(10, 10))); // empty
        assert_eq!(snake.occupied().len(), 3);
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Cell::new(5, 5), Direction::Right, 3),
            Cell::new(10, 10),
            20,
            20,
        );

        assert!(state.is_in_bounds(Cell::new(0, 0)));
        assert!(state.is_in_bounds(Cell::new(19, 19)));
        assert!(!state.is_in_bounds(Cell::new(-1, 0)));
        assert!(!state.is_in_bounds(Cell::new(20, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, 20)));
    }
}
