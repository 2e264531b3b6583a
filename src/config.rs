//! Runtime tunables, optionally loaded from a TOML file.
//!
//! [`Config::default`] reproduces the classic display.  A TOML file may
//! override any subset of fields; missing keys keep their defaults, so a
//! file containing only `burst_size = 60` is valid.
//!
//! Counts that must be at least one are `NonZero*` fields, so a zero in the
//! file fails to parse.  Everything else is validated before a simulation is
//! built from it, so the per-frame code never has to guard against empty or
//! inverted ranges.

use std::num::{NonZeroU32, NonZeroUsize};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{FireworksError, Result};

// ── Compiled defaults ─────────────────────────────────────────────────────────

pub const DEFAULT_AUTO_LAUNCH_THRESHOLD: NonZeroU32 = nonzero_u32(50);
pub const DEFAULT_LAUNCH_LIMITER_THRESHOLD: NonZeroU32 = nonzero_u32(50);
pub const DEFAULT_PROJECTILE_TRAIL_LEN: NonZeroUsize = nonzero_usize(3);
pub const DEFAULT_PARTICLE_TRAIL_LEN: NonZeroUsize = nonzero_usize(5);
pub const DEFAULT_BURST_SIZE: usize = 30;
pub const DEFAULT_PARTICLE_FRICTION: f64 = 0.95;
pub const DEFAULT_PARTICLE_GRAVITY: f64 = 1.0;
pub const DEFAULT_PROJECTILE_ACCELERATION: f64 = 1.05;
pub const DEFAULT_PROJECTILE_START_SPEED: f64 = 2.0;
pub const DEFAULT_HUE_INCREMENT: f64 = 0.5;
pub const DEFAULT_TRAIL_FADE_ALPHA: f64 = 0.5;
pub const DEFAULT_STARTING_HUE: f64 = 120.0;
pub const DEFAULT_PARTICLE_HUE_JITTER: f64 = 20.0;
/// Timer fallback for the frame source: 1000 / 60 ms, truncated.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

const fn nonzero_u32(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(n) => n,
        None => panic!("default must be non-zero"),
    }
}

const fn nonzero_usize(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("default must be non-zero"),
    }
}

/// Half-open `[min, max)` range sampled uniformly.  Must not be empty.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FireworksError::invalid(field, "bounds must be finite"));
        }
        if self.min >= self.max {
            return Err(FireworksError::invalid(
                field,
                format!("range [{}, {}) is empty or inverted", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Every tunable of the display.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    // ── Spawn scheduling ──────────────────────────────────────────────────────
    /// Ticks between automatic launches while the pointer is released.
    pub auto_launch_threshold: NonZeroU32,
    /// Minimum ticks between manual launches while the pointer is held.
    pub launch_limiter_threshold: NonZeroU32,

    // ── Projectiles ───────────────────────────────────────────────────────────
    pub projectile_trail_len: NonZeroUsize,
    pub projectile_start_speed: f64,
    pub projectile_acceleration: f64,
    pub projectile_brightness: Span,

    // ── Particles ─────────────────────────────────────────────────────────────
    pub burst_size: usize,
    pub particle_trail_len: NonZeroUsize,
    pub particle_friction: f64,
    pub particle_gravity: f64,
    pub particle_speed: Span,
    pub particle_brightness: Span,
    pub particle_decay: Span,
    /// Particle hue is drawn from `global hue ± particle_hue_jitter`.
    pub particle_hue_jitter: f64,

    // ── Frame ─────────────────────────────────────────────────────────────────
    pub starting_hue: f64,
    pub hue_increment: f64,
    /// Opacity of the erase pass painted over the surface every frame.
    pub trail_fade_alpha: f64,
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_launch_threshold: DEFAULT_AUTO_LAUNCH_THRESHOLD,
            launch_limiter_threshold: DEFAULT_LAUNCH_LIMITER_THRESHOLD,
            projectile_trail_len: DEFAULT_PROJECTILE_TRAIL_LEN,
            projectile_start_speed: DEFAULT_PROJECTILE_START_SPEED,
            projectile_acceleration: DEFAULT_PROJECTILE_ACCELERATION,
            projectile_brightness: Span::new(50.0, 70.0),
            burst_size: DEFAULT_BURST_SIZE,
            particle_trail_len: DEFAULT_PARTICLE_TRAIL_LEN,
            particle_friction: DEFAULT_PARTICLE_FRICTION,
            particle_gravity: DEFAULT_PARTICLE_GRAVITY,
            particle_speed: Span::new(1.0, 10.0),
            particle_brightness: Span::new(50.0, 80.0),
            particle_decay: Span::new(0.015, 0.03),
            particle_hue_jitter: DEFAULT_PARTICLE_HUE_JITTER,
            starting_hue: DEFAULT_STARTING_HUE,
            hue_increment: DEFAULT_HUE_INCREMENT,
            trail_fade_alpha: DEFAULT_TRAIL_FADE_ALPHA,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Parse a TOML document.  The result is not validated.
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents).map_err(|source| FireworksError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// Parse and validation errors are still returned: a file that exists
    /// but is wrong should not be silently ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file found; using compiled defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Reject values that would make the display degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.burst_size == 0 {
            return Err(FireworksError::invalid("burst_size", "must be at least 1"));
        }

        positive_finite("projectile_start_speed", self.projectile_start_speed)?;
        if !self.projectile_acceleration.is_finite() || self.projectile_acceleration < 1.0 {
            return Err(FireworksError::invalid(
                "projectile_acceleration",
                "must be finite and at least 1.0 so speed never decreases",
            ));
        }
        if !(self.particle_friction > 0.0 && self.particle_friction <= 1.0) {
            return Err(FireworksError::invalid(
                "particle_friction",
                "must be in (0, 1]",
            ));
        }
        if !self.particle_gravity.is_finite() {
            return Err(FireworksError::invalid("particle_gravity", "must be finite"));
        }

        self.projectile_brightness.check("projectile_brightness")?;
        self.particle_speed.check("particle_speed")?;
        self.particle_brightness.check("particle_brightness")?;
        self.particle_decay.check("particle_decay")?;
        if self.particle_decay.min <= 0.0 {
            return Err(FireworksError::invalid(
                "particle_decay",
                "min must be positive or particles never expire",
            ));
        }
        if !self.particle_hue_jitter.is_finite() || self.particle_hue_jitter < 0.0 {
            return Err(FireworksError::invalid(
                "particle_hue_jitter",
                "must be finite and non-negative",
            ));
        }

        if !self.starting_hue.is_finite() {
            return Err(FireworksError::invalid("starting_hue", "must be finite"));
        }
        if !self.hue_increment.is_finite() {
            return Err(FireworksError::invalid("hue_increment", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.trail_fade_alpha) {
            return Err(FireworksError::invalid("trail_fade_alpha", "must be in [0, 1]"));
        }
        if self.frame_interval_ms == 0 {
            return Err(FireworksError::invalid("frame_interval_ms", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FireworksError::invalid(field, "must be finite and positive"))
    }
}
