//! Entity drawing.
//!
//! Each function receives a surface and an immutable view of one entity.
//! No simulation state changes here; this module only translates state
//! into surface calls.

use crate::entities::{Particle, Point, Projectile};
use crate::surface::{CompositeMode, Hsla, Surface};

/// Erode the previous frame instead of clearing it, then switch to
/// additive blending for this frame's entities.
pub fn fade_trails<S: Surface + ?Sized>(surface: &mut S, fade_alpha: f64) {
    let (width, height) = surface.size();
    surface.set_composite(CompositeMode::DestinationOut);
    surface.fill_rect(Point::new(0.0, 0.0), width, height, Hsla::black(fade_alpha));
    surface.set_composite(CompositeMode::Lighter);
}

/// Trail line in the current global hue, then the pulsing target ring.
///
/// The ring is stroked without setting a colour of its own, so it inherits
/// the trail colour set just before it.
pub fn draw_projectile<S: Surface + ?Sized>(surface: &mut S, projectile: &Projectile, hue: f64) {
    surface.set_stroke(Hsla::hsl(hue, projectile.brightness));
    surface.stroke_line(projectile.trail.oldest(), projectile.position);
    surface.stroke_circle(projectile.target, projectile.target_radius);
}

/// Trail line in the particle's own colour, faded by its alpha.
pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, particle: &Particle) {
    surface.set_stroke(Hsla::new(
        particle.hue,
        100.0,
        particle.brightness,
        particle.alpha,
    ));
    surface.stroke_line(particle.trail.oldest(), particle.position);
}
