//! Pure entity physics.
//!
//! Every function here works on plain entity data.  Randomness only enters
//! through an injected `Rng`, so a seeded generator reproduces a run
//! exactly (useful for tests with `StdRng`).

use std::f64::consts::TAU;

use rand::Rng;

use crate::config::{Config, Span};
use crate::entities::{Fade, Flight, Particle, Point, Projectile, Trail};

// ── Target marker pulse ───────────────────────────────────────────────────────

/// The ring drawn at a projectile's target grows by `STEP` per tick and
/// snaps back to `START` once it reaches `MAX`.
pub const TARGET_RADIUS_START: f64 = 1.0;
pub const TARGET_RADIUS_MAX: f64 = 8.0;
pub const TARGET_RADIUS_STEP: f64 = 0.3;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Uniform value in `[min, max)`.  Returns `min` when the range is empty.
pub fn random<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}

pub fn random_in<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f64 {
    random(rng, span.min, span.max)
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Build a projectile at `origin` aimed at `target`.
pub fn create_projectile<R: Rng + ?Sized>(
    origin: Point,
    target: Point,
    config: &Config,
    rng: &mut R,
) -> Projectile {
    Projectile {
        position: origin,
        origin,
        target,
        distance_to_target: distance(origin, target),
        distance_traveled: 0.0,
        trail: Trail::new(config.projectile_trail_len, origin),
        angle: (target.y - origin.y).atan2(target.x - origin.x),
        speed: config.projectile_start_speed,
        acceleration: config.projectile_acceleration,
        brightness: random_in(rng, config.projectile_brightness),
        target_radius: TARGET_RADIUS_START,
    }
}

/// Where a projectile would be after its next step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightPlan {
    pub next_position: Point,
    /// Distance from the origin to `next_position`.
    pub distance_traveled: f64,
}

impl FlightPlan {
    pub fn reaches(&self, projectile: &Projectile) -> bool {
        self.distance_traveled >= projectile.distance_to_target
    }
}

/// Compute the prospective next position from the current speed.
pub fn plan_flight(projectile: &Projectile) -> FlightPlan {
    let next_position = Point::new(
        projectile.position.x + projectile.angle.cos() * projectile.speed,
        projectile.position.y + projectile.angle.sin() * projectile.speed,
    );
    FlightPlan {
        next_position,
        distance_traveled: distance(projectile.origin, next_position),
    }
}

/// Advance a projectile by one tick.
///
/// Two phases: plan the next position, then either commit it or report
/// arrival.  On [`Flight::Arrived`] the position is left where it was so the
/// projectile never overshoots its target.
pub fn update_projectile(projectile: &mut Projectile) -> Flight {
    projectile.trail.advance(projectile.position);

    if projectile.target_radius < TARGET_RADIUS_MAX {
        projectile.target_radius += TARGET_RADIUS_STEP;
    } else {
        projectile.target_radius = TARGET_RADIUS_START;
    }

    projectile.speed *= projectile.acceleration;

    let plan = plan_flight(projectile);
    projectile.distance_traveled = plan.distance_traveled;
    if plan.reaches(projectile) {
        Flight::Arrived
    } else {
        projectile.position = plan.next_position;
        Flight::InFlight
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// Build one spark at `origin`, tinted around `global_hue`.
pub fn create_particle<R: Rng + ?Sized>(
    origin: Point,
    global_hue: f64,
    config: &Config,
    rng: &mut R,
) -> Particle {
    let angle = random(rng, 0.0, TAU);
    let speed = random_in(rng, config.particle_speed);
    let hue = random(
        rng,
        global_hue - config.particle_hue_jitter,
        global_hue + config.particle_hue_jitter,
    );
    let brightness = random_in(rng, config.particle_brightness);
    let decay = random_in(rng, config.particle_decay);

    Particle {
        position: origin,
        trail: Trail::new(config.particle_trail_len, origin),
        angle,
        speed,
        friction: config.particle_friction,
        gravity: config.particle_gravity,
        hue,
        brightness,
        alpha: 1.0,
        decay,
    }
}

/// A full burst: `config.burst_size` sparks, all starting at `at`.
pub fn create_burst<R: Rng + ?Sized>(
    at: Point,
    global_hue: f64,
    config: &Config,
    rng: &mut R,
) -> Vec<Particle> {
    (0..config.burst_size)
        .map(|_| create_particle(at, global_hue, config, rng))
        .collect()
}

/// Advance a particle by one tick: friction, velocity plus gravity, fade.
pub fn update_particle(particle: &mut Particle) -> Fade {
    particle.trail.advance(particle.position);

    particle.speed *= particle.friction;
    particle.position.x += particle.angle.cos() * particle.speed;
    particle.position.y += particle.angle.sin() * particle.speed + particle.gravity;

    particle.alpha -= particle.decay;

    // Threshold is the particle's own decay rather than zero: one more tick
    // would leave it at or below zero opacity.
    if particle.alpha <= particle.decay {
        Fade::Expired
    } else {
        Fade::Alive
    }
}
