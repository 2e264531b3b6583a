//! All simulation entity types — plain data plus the trail buffer that keeps
//! its own length invariant.  Physics lives in `compute`.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A position on the drawing surface, in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Fixed launch origin: bottom-centre of the surface.
    pub fn launch_point(&self) -> Point {
        Point::new(self.width / 2.0, self.height)
    }
}

// ── Trail buffer ──────────────────────────────────────────────────────────────

/// Fixed-length, newest-first history of recent positions.
///
/// The length is set at construction and never changes: every `advance`
/// drops the oldest sample and pushes the new one to the front.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    samples: VecDeque<Point>,
}

impl Trail {
    /// Seed a trail with `len` copies of `at`.
    pub fn new(len: NonZeroUsize, at: Point) -> Self {
        Self {
            samples: std::iter::repeat(at).take(len.get()).collect(),
        }
    }

    pub fn advance(&mut self, at: Point) {
        self.samples.pop_back();
        self.samples.push_front(at);
    }

    /// The sample a trail line is drawn from.
    pub fn oldest(&self) -> Point {
        // Never empty: `len` is non-zero and advance keeps it.
        self.samples.back().copied().unwrap_or_default()
    }

    pub fn newest(&self) -> Point {
        self.samples.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.samples.iter()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A rising firework travelling from its origin toward a target point.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub origin: Point,
    pub target: Point,
    /// Fixed at creation: straight-line distance origin → target.
    pub distance_to_target: f64,
    /// Look-ahead distance from the origin, recomputed every update.
    pub distance_traveled: f64,
    pub trail: Trail,
    /// Radians from origin to target; never changes after creation.
    pub angle: f64,
    pub speed: f64,
    /// Multiplicative speed factor applied each update (≥ 1).
    pub acceleration: f64,
    /// Lightness (percent) of the trail colour.
    pub brightness: f64,
    /// Radius of the pulsing marker drawn at the target.
    pub target_radius: f64,
}

/// Result of advancing a projectile by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    /// Still travelling; the position delta was applied.
    InFlight,
    /// The next step would reach the target.  The position was left as is
    /// and the caller must burst at the target and drop the projectile.
    Arrived,
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// A single decaying spark produced by a burst.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub trail: Trail,
    /// Direction of travel in radians, uniform over the full circle.
    pub angle: f64,
    pub speed: f64,
    /// Per-tick multiplicative speed decay (< 1).
    pub friction: f64,
    /// Added to the downward velocity every tick.
    pub gravity: f64,
    pub hue: f64,
    pub brightness: f64,
    pub alpha: f64,
    /// Linear alpha decrement per tick; also the expiry threshold.
    pub decay: f64,
}

/// Result of advancing a particle by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fade {
    Alive,
    /// Alpha has fallen to or below the particle's own decay rate.
    Expired,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Last known pointer state, written by input handlers between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// `None` until the first pointer event arrives.
    pub position: Option<Point>,
    pub held: bool,
}
