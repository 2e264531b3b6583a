//! The drawing-surface abstraction the simulation renders onto.
//!
//! The simulation only needs a handful of primitives: stroked lines and
//! circles with a sticky stroke colour, filled rectangles, and a compositing
//! mode.  [`crate::display::TerminalCanvas`] implements them for a terminal;
//! tests implement them with a recorder.

use crate::entities::Point;

/// How newly drawn pixels combine with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Ordinary alpha blending.
    #[default]
    SourceOver,
    /// Erase existing content in proportion to the source alpha.  Used to
    /// fade the previous frame instead of clearing it.
    DestinationOut,
    /// Add source colour to destination colour, saturating.  Overlapping
    /// sparks brighten each other.
    Lighter,
}

/// CSS-style HSLA colour.  Saturation and lightness are percentages,
/// alpha is in `[0, 1]`, hue is in degrees and wraps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub const fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Fully saturated, opaque.
    pub const fn hsl(hue: f64, lightness: f64) -> Self {
        Self::new(hue, 100.0, lightness, 1.0)
    }

    pub const fn black(alpha: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, alpha)
    }

    /// Convert to straight (non-premultiplied) RGB in `[0, 1]`.
    pub fn to_rgb(&self) -> [f32; 3] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        [(r + m) as f32, (g + m) as f32, (b + m) as f32]
    }

    pub fn clamped_alpha(&self) -> f32 {
        self.alpha.clamp(0.0, 1.0) as f32
    }
}

/// A 2D raster target with canvas-like drawing state.
///
/// The stroke colour and compositing mode are sticky: they stay in effect
/// until changed, and a shape stroked without setting a colour first uses
/// whatever the previous caller left behind.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (f64, f64);

    fn set_composite(&mut self, mode: CompositeMode);

    fn set_stroke(&mut self, color: Hsla);

    fn stroke_line(&mut self, from: Point, to: Point);

    fn stroke_circle(&mut self, center: Point, radius: f64);

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Hsla);
}
