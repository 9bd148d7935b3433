use std::time::{Duration, Instant};

/// Live figures shown in the header while a game is on screen
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub games_won: u32,
    /// Cycle rewrites in the current game
    pub shortcuts: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            games_won: 0,
            shortcuts: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.shortcuts = 0;
    }

    pub fn on_shortcut(&mut self) {
        self.shortcuts += 1;
    }

    pub fn on_game_over(&mut self, final_score: u32, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_game_over_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10, false);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.games_won, 0);

        metrics.on_game_over(5, true);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.games_won, 1);
    }

    #[test]
    fn test_game_start_resets_counters() {
        let mut metrics = GameMetrics::new();
        metrics.on_shortcut();
        metrics.on_shortcut();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert_eq!(metrics.shortcuts, 2);
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert_eq!(metrics.shortcuts, 0);
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
