//! Drag gestures turned into headings
//!
//! Screen coordinates grow rightwards and downwards. A mostly horizontal drag
//! steers along X. A mostly vertical drag steers along Y (up the screen is
//! +Y); when that turn is refused, the same drag is retried along Z, with up
//! the screen mapping to -Z.

use std::time::{Duration, Instant};

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::game::Heading;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Shortest drag, in screen units, that counts as a swipe
    pub min_distance: f32,
    /// Longest press-to-release time that still counts as a swipe
    pub max_duration_ms: u64,
    /// Quiet period after an accepted swipe
    pub min_interval_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_duration_ms: 400,
            min_interval_ms: 100,
        }
    }
}

impl SwipeConfig {
    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_distance.is_finite() && self.min_distance >= 0.0,
            "min_distance must be a non-negative number, got {}",
            self.min_distance
        );
        ensure!(self.max_duration_ms > 0, "max_duration_ms must be positive");
        Ok(())
    }
}

/// Headings to try for a drag, in order of preference
pub fn candidates(dx: f32, dy: f32, min_distance: f32) -> Vec<Heading> {
    let (abs_x, abs_y) = (dx.abs(), dy.abs());

    if abs_x > abs_y {
        if dx > min_distance {
            vec![Heading::PosX]
        } else if dx < -min_distance {
            vec![Heading::NegX]
        } else {
            Vec::new()
        }
    } else if abs_y > abs_x {
        if dy < -min_distance {
            vec![Heading::PosY, Heading::NegZ]
        } else if dy > min_distance {
            vec![Heading::NegY, Heading::PosZ]
        } else {
            Vec::new()
        }
    } else {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Touch {
    x: f32,
    y: f32,
    at: Instant,
}

/// Tracks one press/release pair at a time
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    config: SwipeConfig,
    start: Option<Touch>,
    last_swipe: Option<Instant>,
}

impl SwipeTracker {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start: None,
            last_swipe: None,
        }
    }

    pub fn begin(&mut self, x: f32, y: f32, at: Instant) {
        self.start = Some(Touch { x, y, at });
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Close the gesture and offer its headings to `request` until one is
    /// accepted. Returns the accepted heading.
    pub fn finish(
        &mut self,
        x: f32,
        y: f32,
        at: Instant,
        mut request: impl FnMut(Heading) -> bool,
    ) -> Option<Heading> {
        let start = self.start.take()?;

        if let Some(last) = self.last_swipe {
            if at.saturating_duration_since(last) < self.config.min_interval() {
                return None;
            }
        }
        if at.saturating_duration_since(start.at) > self.config.max_duration() {
            return None;
        }

        let accepted = candidates(x - start.x, y - start.y, self.config.min_distance)
            .into_iter()
            .find(|&heading| request(heading));

        if accepted.is_some() {
            self.last_swipe = Some(at);
        }
        accepted
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}
