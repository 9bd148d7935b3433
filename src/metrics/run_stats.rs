//! Statistics over many autopilot games
//!
//! Per-game figures (score, length, outcome) are averaged over a rolling
//! window; totals and the shortcut counters cover the whole run.

use std::collections::VecDeque;

use serde::Serialize;

/// Rolling statistics for a batch of autopilot games
///
/// # Example
///
/// ```rust
/// use hamilton_snake::metrics::RunStats;
///
/// let mut stats = RunStats::new(100);
/// stats.record_tick(true);
/// stats.record_tick(false);
/// stats.record_game(12, 340, true);
///
/// assert_eq!(stats.total_games(), 1);
/// assert!((stats.win_rate() - 1.0).abs() < 1e-5);
/// assert!((stats.optimization_rate() - 0.5).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Food eaten per game (rolling window)
    game_scores: VecDeque<u32>,

    /// Steps per game (rolling window)
    game_lengths: VecDeque<usize>,

    /// Whether each game filled the board (rolling window)
    game_wins: VecDeque<bool>,

    total_games: usize,
    total_wins: usize,
    total_steps: usize,
    best_score: u32,

    /// Ticks driven by the agent
    total_ticks: usize,

    /// Ticks on which the cycle was rewritten
    optimized_ticks: usize,

    window_size: usize,
}

/// Point-in-time view of [`RunStats`], suitable for reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_games: usize,
    pub total_wins: usize,
    pub total_steps: usize,
    pub best_score: u32,
    pub mean_score: f32,
    pub mean_length: f32,
    pub win_rate: f32,
    pub optimization_rate: f32,
}

impl RunStats {
    /// Create a tracker averaging over the last `window_size` games
    pub fn new(window_size: usize) -> Self {
        Self {
            game_scores: VecDeque::with_capacity(window_size),
            game_lengths: VecDeque::with_capacity(window_size),
            game_wins: VecDeque::with_capacity(window_size),
            total_games: 0,
            total_wins: 0,
            total_steps: 0,
            best_score: 0,
            total_ticks: 0,
            optimized_ticks: 0,
            window_size,
        }
    }

    /// Record a finished game
    pub fn record_game(&mut self, score: u32, length: usize, won: bool) {
        Self::push_deque(&mut self.game_scores, score, self.window_size);
        Self::push_deque(&mut self.game_lengths, length, self.window_size);
        Self::push_deque(&mut self.game_wins, won, self.window_size);

        self.total_games += 1;
        self.total_steps += length;
        self.best_score = self.best_score.max(score);
        if won {
            self.total_wins += 1;
        }
    }

    /// Record one agent tick and whether it rewrote the cycle
    pub fn record_tick(&mut self, optimized: bool) {
        self.total_ticks += 1;
        if optimized {
            self.optimized_ticks += 1;
        }
    }

    /// Mean score over the rolling window
    pub fn mean_score(&self) -> f32 {
        let sum: u32 = self.game_scores.iter().sum();
        Self::ratio(sum as f32, self.game_scores.len())
    }

    /// Mean game length in steps over the rolling window
    pub fn mean_length(&self) -> f32 {
        let sum: usize = self.game_lengths.iter().sum();
        Self::ratio(sum as f32, self.game_lengths.len())
    }

    /// Share of games in the rolling window that filled the board
    pub fn win_rate(&self) -> f32 {
        let wins = self.game_wins.iter().filter(|&&won| won).count();
        Self::ratio(wins as f32, self.game_wins.len())
    }

    /// Share of all ticks that rewrote the cycle
    pub fn optimization_rate(&self) -> f32 {
        Self::ratio(self.optimized_ticks as f32, self.total_ticks)
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn total_wins(&self) -> usize {
        self.total_wins
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn optimized_ticks(&self) -> usize {
        self.optimized_ticks
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total_games: self.total_games,
            total_wins: self.total_wins,
            total_steps: self.total_steps,
            best_score: self.best_score,
            mean_score: self.mean_score(),
            mean_length: self.mean_length(),
            win_rate: self.win_rate(),
            optimization_rate: self.optimization_rate(),
        }
    }

    /// One-line summary for progress logs
    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Wins: {} | Steps: {} | Score: {:.2} | Len: {:.1} | Win rate: {:.1}% | Shortcuts: {:.1}%",
            self.total_games,
            self.total_wins,
            self.total_steps,
            self.mean_score(),
            self.mean_length(),
            self.win_rate() * 100.0,
            self.optimization_rate() * 100.0,
        )
    }

    fn ratio(numerator: f32, count: usize) -> f32 {
        if count == 0 {
            0.0
        } else {
            numerator / count as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
