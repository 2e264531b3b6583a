#![allow(dead_code)]

use fireworks::entities::Point;
use fireworks::surface::{CompositeMode, Hsla, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Composite(CompositeMode),
    Stroke(Hsla),
    Line(Point, Point),
    Circle(Point, f64),
    Fill(Point, f64, f64, Hsla),
}

/// Surface double that records every call in order.
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn lines(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Line(..))).count()
    }

    pub fn circles(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Circle(..))).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.calls.push(Call::Composite(mode));
    }

    fn set_stroke(&mut self, color: Hsla) {
        self.calls.push(Call::Stroke(color));
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.calls.push(Call::Line(from, to));
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.calls.push(Call::Circle(center, radius));
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Hsla) {
        self.calls.push(Call::Fill(origin, width, height, color));
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}
