use std::time::{Duration, Instant};

use crate::game::EndReason;

/// Per-session tallies shown in the status line
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub longest_snake: usize,
    pub games_played: u32,
    pub boards_filled: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            longest_snake: 0,
            games_played: 0,
            boards_filled: 0,
            running: true,
        }
    }

    /// Advance the clock; frozen between game over and restart
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32, length: usize, reason: EndReason) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
        self.longest_snake = self.longest_snake.max(length);
        if reason == EndReason::BoardFilled {
            self.boards_filled += 1;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
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
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(30, 6, EndReason::Wall);
        assert_eq!(metrics.high_score, 30);
        assert_eq!(metrics.longest_snake, 6);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(10, 4, EndReason::SelfCollision);
        assert_eq!(metrics.high_score, 30); // Should not decrease
        assert_eq!(metrics.longest_snake, 6);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(50, 8, EndReason::Wall);
        assert_eq!(metrics.high_score, 50); // Should update
        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.boards_filled, 0);
    }

    #[test]
    fn test_filled_boards_counted() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(610, 64, EndReason::BoardFilled);
        assert_eq!(metrics.boards_filled, 1);
    }

    #[test]
    fn test_clock_stops_at_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(0, 3, EndReason::Wall);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
