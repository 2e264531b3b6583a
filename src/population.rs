//! The two live entity collections and their per-frame draw/update/prune.

use rand::Rng;
use tracing::debug;

use crate::compute::{create_burst, create_projectile, update_particle, update_projectile};
use crate::config::Config;
use crate::entities::{Fade, Flight, Particle, Point, Projectile};
use crate::render::{draw_particle, draw_projectile};
use crate::surface::Surface;

/// What one [`Population::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Projectiles drawn and updated (one draw + one update each).
    pub projectiles_visited: usize,
    /// Particles drawn and updated, including any born this tick.
    pub particles_visited: usize,
    /// Projectiles that arrived; each produced exactly one burst.
    pub bursts: usize,
    pub particles_expired: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Population {
    projectiles: Vec<Projectile>,
    particles: Vec<Particle>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.particles.is_empty()
    }

    /// Launch a new projectile from `origin` toward `target`.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        origin: Point,
        target: Point,
        config: &Config,
        rng: &mut R,
    ) {
        self.projectiles
            .push(create_projectile(origin, target, config, rng));
    }

    pub fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Draw then update every live entity once, newest first.
    ///
    /// Projectiles go first.  Each arrival appends one burst at the
    /// projectile's target, and those new particles are drawn and updated
    /// in the particle pass of this same tick.  Survivors are collected into
    /// a fresh vector and swapped in, so removals never disturb iteration.
    pub fn tick<S, R>(
        &mut self,
        surface: &mut S,
        hue: f64,
        config: &Config,
        rng: &mut R,
    ) -> TickReport
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = TickReport::default();

        // ── 1. Projectiles ───────────────────────────────────────────────────
        let mut flying = Vec::with_capacity(self.projectiles.len());
        for mut projectile in self.projectiles.drain(..).rev() {
            report.projectiles_visited += 1;
            draw_projectile(surface, &projectile, hue);
            match update_projectile(&mut projectile) {
                Flight::InFlight => flying.push(projectile),
                Flight::Arrived => {
                    debug!(x = projectile.target.x, y = projectile.target.y, "burst");
                    self.particles
                        .extend(create_burst(projectile.target, hue, config, rng));
                    report.bursts += 1;
                }
            }
        }
        flying.reverse();
        self.projectiles = flying;

        // ── 2. Particles ─────────────────────────────────────────────────────
        let mut alive = Vec::with_capacity(self.particles.len());
        for mut particle in self.particles.drain(..).rev() {
            report.particles_visited += 1;
            draw_particle(surface, &particle);
            match update_particle(&mut particle) {
                Fade::Alive => alive.push(particle),
                Fade::Expired => report.particles_expired += 1,
            }
        }
        alive.reverse();
        self.particles = alive;

        report
    }
}
