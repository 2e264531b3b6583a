//! Terminal rendering layer — all terminal output lives here.
//!
//! [`TerminalCanvas`] is an RGB pixel buffer implementing [`Surface`].  Each
//! terminal cell shows two vertically stacked pixels using the upper-half
//! block `▀` (foreground = upper pixel, background = lower pixel), which
//! makes the pixels roughly square.  No simulation logic lives here.

use std::f64::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::Point;
use crate::error::{FireworksError, Result};
use crate::surface::{CompositeMode, Hsla, Surface};

/// Pixel rows per terminal cell.
pub const PIXELS_PER_CELL: u16 = 2;

const HALF_BLOCK: char = '▀';

/// Colour stored premultiplied against a black background.
type Rgb = [f32; 3];

#[derive(Clone, Debug)]
pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    pixels: Vec<Rgb>,
    composite: CompositeMode,
    stroke: Hsla,
}

impl TerminalCanvas {
    /// A blank canvas covering `cols × rows` terminal cells.
    pub fn new(cols: u16, rows: u16) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(FireworksError::SurfaceUnavailable(format!(
                "terminal reports a {cols}x{rows} window"
            )));
        }
        let len = cols as usize * rows as usize * PIXELS_PER_CELL as usize;
        Ok(Self {
            cols,
            rows,
            pixels: vec![[0.0; 3]; len],
            composite: CompositeMode::default(),
            stroke: Hsla::black(1.0),
        })
    }

    pub fn pixel_width(&self) -> usize {
        self.cols as usize
    }

    pub fn pixel_height(&self) -> usize {
        self.rows as usize * PIXELS_PER_CELL as usize
    }

    /// Colour at a pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x >= self.pixel_width() || y >= self.pixel_height() {
            return None;
        }
        self.pixels.get(y * self.pixel_width() + x).copied()
    }

    /// Number of pixels that are not pure black.
    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .iter()
            .filter(|p| p.iter().any(|&c| c > 0.0))
            .count()
    }

    /// Map a terminal cell to the pixel at its upper half.
    pub fn cell_to_pixel(col: u16, row: u16) -> Point {
        Point::new(f64::from(col), f64::from(row) * f64::from(PIXELS_PER_CELL))
    }

    // ── Rasterisation ────────────────────────────────────────────────────────

    fn blend(&mut self, x: f64, y: f64, color: Hsla) {
        let (px, py) = (x.round(), y.round());
        if !px.is_finite() || !py.is_finite() || px < 0.0 || py < 0.0 {
            return;
        }
        let (px, py) = (px as usize, py as usize);
        if px >= self.pixel_width() || py >= self.pixel_height() {
            return;
        }
        let idx = py * self.pixel_width() + px;
        let src = color.to_rgb();
        let alpha = color.clamped_alpha();
        let dst = &mut self.pixels[idx];
        match self.composite {
            CompositeMode::SourceOver => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = s * alpha + *d * (1.0 - alpha);
                }
            }
            CompositeMode::DestinationOut => {
                for d in dst.iter_mut() {
                    *d *= 1.0 - alpha;
                }
            }
            CompositeMode::Lighter => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = (*d + s * alpha).min(1.0);
                }
            }
        }
    }

    /// Step along the line one pixel at a time, plotting each sample once.
    fn raster_line(&mut self, from: Point, to: Point) {
        if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
            return;
        }
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let cell = ((from.x + dx * t).round(), (from.y + dy * t).round());
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            self.blend(cell.0, cell.1, self.stroke);
        }
    }

    /// Sample the circumference densely enough to leave no gaps.
    fn raster_circle(&mut self, center: Point, radius: f64) {
        if !radius.is_finite() || radius < 0.0 {
            return;
        }
        let samples = ((TAU * radius).ceil() as usize).max(8);
        let mut plotted: Vec<(i64, i64)> = Vec::with_capacity(samples);
        for i in 0..samples {
            let theta = TAU * i as f64 / samples as f64;
            let x = (center.x + radius * theta.cos()).round();
            let y = (center.y + radius * theta.sin()).round();
            let key = (x as i64, y as i64);
            if plotted.contains(&key) {
                continue;
            }
            plotted.push(key);
            self.blend(x, y, self.stroke);
        }
    }

    // ── Presentation ─────────────────────────────────────────────────────────

    /// Queue the whole canvas to `out` and flush.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let width = self.pixel_width();
        let mut current: Option<(Color, Color)> = None;

        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let upper_y = row as usize * PIXELS_PER_CELL as usize;
            for col in 0..width {
                let fg = to_color(self.pixels[upper_y * width + col]);
                let bg = to_color(self.pixels[(upper_y + 1) * width + col]);
                if current != Some((fg, bg)) {
                    out.queue(style::SetForegroundColor(fg))?;
                    out.queue(style::SetBackgroundColor(bg))?;
                    current = Some((fg, bg));
                }
                out.queue(Print(HALF_BLOCK))?;
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(rgb[0]),
        g: channel(rgb[1]),
        b: channel(rgb[2]),
    }
}

impl Surface for TerminalCanvas {
    fn size(&self) -> (f64, f64) {
        (self.pixel_width() as f64, self.pixel_height() as f64)
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.composite = mode;
    }

    fn set_stroke(&mut self, color: Hsla) {
        self.stroke = color;
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.raster_line(from, to);
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.raster_circle(center, radius);
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Hsla) {
        let x0 = origin.x.max(0.0).round() as usize;
        let y0 = origin.y.max(0.0).round() as usize;
        let x1 = ((origin.x + width).round().max(0.0) as usize).min(self.pixel_width());
        let y1 = ((origin.y + height).round().max(0.0) as usize).min(self.pixel_height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x as f64, y as f64, color);
            }
        }
    }
}
