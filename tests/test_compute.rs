mod common;

use fireworks::compute::*;
use fireworks::config::Config;
use fireworks::entities::*;

use common::seeded_rng;

fn launch(from: Point, to: Point) -> Projectile {
    create_projectile(from, to, &Config::default(), &mut seeded_rng())
}

fn particle_with_decay(decay: f64) -> Particle {
    let origin = Point::new(50.0, 50.0);
    let mut p = create_particle(origin, 120.0, &Config::default(), &mut seeded_rng());
    p.decay = decay;
    p
}

// ── geometry ──────────────────────────────────────────────────────────────────

#[test]
fn random_stays_in_half_open_range() {
    let mut rng = seeded_rng();
    for _ in 0..1_000 {
        let v = random(&mut rng, -3.0, 7.5);
        assert!((-3.0..7.5).contains(&v), "{v} out of range");
    }
}

#[test]
fn random_with_empty_range_returns_min() {
    let mut rng = seeded_rng();
    assert_eq!(random(&mut rng, 4.0, 4.0), 4.0);
}

#[test]
fn distance_is_euclidean_and_symmetric() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(distance(a, b), 5.0);
    assert_eq!(distance(b, a), 5.0);
    assert_eq!(distance(b, b), 0.0);
}

// ── create_projectile ─────────────────────────────────────────────────────────

#[test]
fn projectile_starts_at_origin_with_seeded_trail() {
    let p = launch(Point::new(100.0, 500.0), Point::new(400.0, 100.0));
    assert_eq!(p.position, p.origin);
    assert_eq!(p.distance_to_target, 500.0);
    assert_eq!(p.distance_traveled, 0.0);
    assert_eq!(p.trail.len(), 3);
    assert!(p.trail.iter().all(|&s| s == Point::new(100.0, 500.0)));
    assert_eq!(p.speed, 2.0);
    assert_eq!(p.acceleration, 1.05);
    assert_eq!(p.target_radius, TARGET_RADIUS_START);
    assert!((50.0..70.0).contains(&p.brightness));
}

#[test]
fn projectile_angle_points_at_target() {
    let p = launch(Point::new(0.0, 0.0), Point::new(0.0, -10.0));
    assert!((p.angle + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

// ── update_projectile ─────────────────────────────────────────────────────────

#[test]
fn projectile_trail_length_is_invariant() {
    let mut p = launch(Point::new(0.0, 10_000.0), Point::new(0.0, 0.0));
    for _ in 0..40 {
        update_projectile(&mut p);
        assert_eq!(p.trail.len(), 3);
    }
}

#[test]
fn projectile_trail_records_previous_positions_newest_first() {
    let mut p = launch(Point::new(0.0, 10_000.0), Point::new(0.0, 0.0));
    let start = p.position;
    update_projectile(&mut p);
    let after_one = p.position;
    update_projectile(&mut p);
    let samples: Vec<Point> = p.trail.iter().copied().collect();
    assert_eq!(samples, vec![after_one, start, start]);
    assert_eq!(p.trail.oldest(), start);
}

#[test]
fn projectile_speed_never_decreases_and_angle_is_fixed() {
    let mut p = launch(Point::new(0.0, 10_000.0), Point::new(3_000.0, 0.0));
    let angle = p.angle;
    let mut last_speed = p.speed;
    for _ in 0..40 {
        update_projectile(&mut p);
        assert!(p.speed >= last_speed);
        assert_eq!(p.angle, angle);
        last_speed = p.speed;
    }
}

#[test]
fn target_radius_pulses_and_wraps() {
    let mut p = launch(Point::new(0.0, 10_000.0), Point::new(0.0, 0.0));
    for _ in 0..24 {
        update_projectile(&mut p);
    }
    assert!(p.target_radius > TARGET_RADIUS_MAX);
    update_projectile(&mut p);
    assert_eq!(p.target_radius, TARGET_RADIUS_START);
}

#[test]
fn projectile_arrives_when_look_ahead_reaches_target() {
    let mut p = launch(Point::new(100.0, 500.0), Point::new(100.0, 0.0));
    let mut calls = 0;
    loop {
        let before = p.position;
        calls += 1;
        match update_projectile(&mut p) {
            Flight::InFlight => {
                assert!(p.distance_traveled < p.distance_to_target);
                assert!(calls < 200, "projectile never arrived");
            }
            Flight::Arrived => {
                assert!(p.distance_traveled >= p.distance_to_target);
                // The final step is discarded, not applied.
                assert_eq!(p.position, before);
                break;
            }
        }
    }
    // 42 * (1.05^k - 1) >= 500 first holds at k = 53.
    assert_eq!(calls, 53);
}

#[test]
fn plan_flight_does_not_mutate() {
    let p = launch(Point::new(0.0, 100.0), Point::new(0.0, 0.0));
    let plan = plan_flight(&p);
    assert_eq!(plan.next_position, Point::new(p.position.x + p.angle.cos() * 2.0, 98.0));
    assert_eq!(p.position, Point::new(0.0, 100.0));
    assert!(!plan.reaches(&p));
}

#[test]
fn zero_distance_projectile_arrives_immediately() {
    let at = Point::new(10.0, 10.0);
    let mut p = launch(at, at);
    assert_eq!(update_projectile(&mut p), Flight::Arrived);
    assert_eq!(p.position, at);
}

// ── particles ─────────────────────────────────────────────────────────────────

#[test]
fn particle_initial_state() {
    let config = Config::default();
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let p = create_particle(Point::new(5.0, 6.0), 120.0, &config, &mut rng);
        assert_eq!(p.position, Point::new(5.0, 6.0));
        assert_eq!(p.trail.len(), 5);
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.friction, 0.95);
        assert_eq!(p.gravity, 1.0);
        assert!((0.0..std::f64::consts::TAU).contains(&p.angle));
        assert!((1.0..10.0).contains(&p.speed));
        assert!((100.0..140.0).contains(&p.hue));
        assert!((50.0..80.0).contains(&p.brightness));
        assert!((0.015..0.03).contains(&p.decay));
    }
}

#[test]
fn particle_alpha_strictly_decreases_until_expiry() {
    let mut p = create_particle(Point::new(0.0, 0.0), 0.0, &Config::default(), &mut seeded_rng());
    let mut last = p.alpha;
    loop {
        let outcome = update_particle(&mut p);
        assert!(p.alpha < last);
        assert_eq!(p.trail.len(), 5);
        last = p.alpha;
        if outcome == Fade::Expired {
            assert!(p.alpha <= p.decay);
            break;
        }
    }
}

#[test]
fn particle_expires_by_linear_decay_law() {
    // 1 - n * 0.25 <= 0.25 first holds at n = 3; all values are exact.
    let mut p = particle_with_decay(0.25);
    assert_eq!(update_particle(&mut p), Fade::Alive);
    assert_eq!(update_particle(&mut p), Fade::Alive);
    assert_eq!(update_particle(&mut p), Fade::Expired);
    assert_eq!(p.alpha, 0.25);
}

#[test]
fn particle_with_decay_two_hundredths_expires_near_forty_nine() {
    let mut p = particle_with_decay(0.02);
    let mut calls = 0;
    while update_particle(&mut p) == Fade::Alive {
        calls += 1;
        assert!(calls < 100);
    }
    calls += 1;
    // Exactly 49 in real arithmetic; rounding may push it one further.
    assert!((49..=50).contains(&calls), "expired after {calls} calls");
}

#[test]
fn particle_motion_applies_friction_and_gravity() {
    let mut p = particle_with_decay(0.01);
    p.angle = 0.0;
    p.speed = 10.0;
    update_particle(&mut p);
    assert!((p.speed - 9.5).abs() < 1e-12);
    assert!((p.position.x - 59.5).abs() < 1e-12);
    assert!((p.position.y - 51.0).abs() < 1e-12);
    assert_eq!(p.trail.newest(), Point::new(50.0, 50.0));
}

// ── bursts & determinism ──────────────────────────────────────────────────────

#[test]
fn burst_has_configured_size_at_one_point() {
    let at = Point::new(120.0, 40.0);
    let burst = create_burst(at, 200.0, &Config::default(), &mut seeded_rng());
    assert_eq!(burst.len(), 30);
    assert!(burst.iter().all(|p| p.position == at));
}

#[test]
fn identical_rng_streams_give_identical_entities() {
    let config = Config::default();
    let a = create_burst(Point::new(1.0, 2.0), 90.0, &config, &mut seeded_rng());
    let b = create_burst(Point::new(1.0, 2.0), 90.0, &config, &mut seeded_rng());
    assert_eq!(a, b);
}
