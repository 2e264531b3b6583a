use std::io::Write;

use fireworks::config::{Config, Span};
use fireworks::FireworksError;

fn field_of(err: FireworksError) -> &'static str {
    match err {
        FireworksError::InvalidConfig { field, .. } => field,
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn defaults_match_classic_display() {
    let c = Config::default();
    assert_eq!(c.auto_launch_threshold.get(), 50);
    assert_eq!(c.launch_limiter_threshold.get(), 50);
    assert_eq!(c.projectile_trail_len.get(), 3);
    assert_eq!(c.particle_trail_len.get(), 5);
    assert_eq!(c.burst_size, 30);
    assert_eq!(c.particle_friction, 0.95);
    assert_eq!(c.particle_gravity, 1.0);
    assert_eq!(c.projectile_acceleration, 1.05);
    assert_eq!(c.hue_increment, 0.5);
    assert_eq!(c.trail_fade_alpha, 0.5);
    assert_eq!(c.starting_hue, 120.0);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let c = Config::from_toml_str(
        "burst_size = 60\nparticle_speed = { min = 2.0, max = 4.0 }\n",
    )
    .unwrap();
    assert_eq!(c.burst_size, 60);
    assert_eq!(c.particle_speed, Span::new(2.0, 4.0));
    assert_eq!(c.auto_launch_threshold.get(), 50);
}

#[test]
fn negative_burst_size_does_not_parse() {
    assert!(Config::from_toml_str("burst_size = -3").is_err());
}

#[test]
fn zero_counts_do_not_parse() {
    for key in [
        "auto_launch_threshold",
        "launch_limiter_threshold",
        "projectile_trail_len",
        "particle_trail_len",
    ] {
        let doc = format!("{key} = 0");
        assert!(Config::from_toml_str(&doc).is_err(), "{key} = 0 parsed");
    }
}

#[test]
fn degenerate_values_are_rejected_with_field_name() {
    let d = Config::default;
    let cases: Vec<(Config, &str)> = vec![
        (Config { burst_size: 0, ..d() }, "burst_size"),
        (Config { projectile_acceleration: 0.9, ..d() }, "projectile_acceleration"),
        (Config { particle_friction: 1.5, ..d() }, "particle_friction"),
        (Config { particle_speed: Span::new(5.0, 1.0), ..d() }, "particle_speed"),
        (Config { particle_decay: Span::new(0.0, 0.03), ..d() }, "particle_decay"),
        (Config { trail_fade_alpha: f64::NAN, ..d() }, "trail_fade_alpha"),
        (Config { frame_interval_ms: 0, ..d() }, "frame_interval_ms"),
    ];
    for (config, expected) in cases {
        assert_eq!(field_of(config.validate().unwrap_err()), expected);
    }
}

#[test]
fn empty_ranges_are_rejected() {
    let d = Config::default;
    let cases: Vec<(Config, &str)> = vec![
        (Config { particle_speed: Span::new(5.0, 5.0), ..d() }, "particle_speed"),
        (Config { projectile_brightness: Span::new(60.0, 60.0), ..d() }, "projectile_brightness"),
        (Config { particle_decay: Span::new(0.02, 0.02), ..d() }, "particle_decay"),
    ];
    for (config, expected) in cases {
        assert_eq!(field_of(config.validate().unwrap_err()), expected);
    }
}

#[test]
fn load_reads_and_validates_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "hue_increment = 1.5").unwrap();
    let c = Config::load(file.path()).unwrap();
    assert_eq!(c.hue_increment, 1.5);

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    writeln!(bad, "burst_size = 0").unwrap();
    assert_eq!(field_of(Config::load(bad.path()).unwrap_err()), "burst_size");
}

#[test]
fn load_reports_parse_errors_with_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "burst_size = \"lots\"").unwrap();
    match Config::load(file.path()).unwrap_err() {
        FireworksError::ConfigParse { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let c = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(c, Config::default());
}

#[test]
fn example_file_spells_out_the_defaults() {
    let c = Config::from_toml_str(include_str!("../fireworks.example.toml")).unwrap();
    assert_eq!(c, Config::default());
}
