//! Timed and pointer-driven launching.
//!
//! Two independent counters advance once per frame:
//!
//! * the **auto timer** launches toward a random point in the top half of
//!   the surface while the pointer is released;
//! * the **launch limiter** caps manual launches toward the pointer while
//!   it is held.
//!
//! Each counter counts up to its threshold and stays there until it can
//! fire.  Holding the pointer therefore parks the auto timer at its
//! threshold, and the first auto launch after release happens on the very
//! next frame.

use std::num::NonZeroU32;

use rand::Rng;

use crate::compute::random;
use crate::config::Config;
use crate::entities::{Bounds, Point, PointerState};

/// A launch requested by the scheduler this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Launch {
    /// Automatic launch toward a random target.
    Auto(Point),
    /// Pointer-driven launch toward the last known pointer position.
    Manual(Point),
}

impl Launch {
    pub fn target(&self) -> Point {
        match self {
            Launch::Auto(target) | Launch::Manual(target) => *target,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnScheduler {
    auto_threshold: u32,
    limiter_threshold: u32,
    auto_tick: u32,
    limiter_tick: u32,
}

impl SpawnScheduler {
    pub fn new(config: &Config) -> Self {
        Self::with_thresholds(config.auto_launch_threshold, config.launch_limiter_threshold)
    }

    pub fn with_thresholds(auto_threshold: NonZeroU32, limiter_threshold: NonZeroU32) -> Self {
        Self {
            auto_threshold: auto_threshold.get(),
            limiter_threshold: limiter_threshold.get(),
            auto_tick: 0,
            limiter_tick: 0,
        }
    }

    pub fn auto_tick(&self) -> u32 {
        self.auto_tick
    }

    pub fn limiter_tick(&self) -> u32 {
        self.limiter_tick
    }

    /// Advance both counters by one frame and return the launches due now.
    ///
    /// At most one of each kind is returned.  A held pointer with no known
    /// position yet produces no manual launch.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        pointer: &PointerState,
        bounds: Bounds,
        rng: &mut R,
    ) -> Vec<Launch> {
        let mut launches = Vec::new();

        self.auto_tick = (self.auto_tick + 1).min(self.auto_threshold);
        if self.auto_tick >= self.auto_threshold && !pointer.held {
            let target = Point::new(
                random(rng, 0.0, bounds.width),
                random(rng, 0.0, bounds.height / 2.0),
            );
            launches.push(Launch::Auto(target));
            self.auto_tick = 0;
        }

        self.limiter_tick = (self.limiter_tick + 1).min(self.limiter_threshold);
        if self.limiter_tick >= self.limiter_threshold && pointer.held {
            if let Some(target) = pointer.position {
                launches.push(Launch::Manual(target));
                self.limiter_tick = 0;
            }
        }

        launches
    }
}
