use std::f64::consts::{FRAC_PI_2, TAU};

use image::{Rgb, RgbImage};

use crate::color;

// ---------------------------------------------------------------------------
// Canvas – bounds-checked drawing on an RGB buffer
// ---------------------------------------------------------------------------

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: RgbImage::from_pixel(width.max(1), height.max(1), color::BACKGROUND),
        }
    }

    pub fn width(&self) -> f64 {
        f64::from(self.image.width())
    }

    pub fn height(&self) -> f64 {
        f64::from(self.image.height())
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn put(&mut self, x: i64, y: i64, c: Rgb<u8>) {
        if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height()) {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, c);
    }

    /// Fill the axis-aligned rectangle spanned by two corners.
    pub fn fill_rect(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64), c: Rgb<u8>) {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return;
        }
        let (w, h) = (self.image.width(), self.image.height());
        let (left, right) = (clamp_px(x0.min(x1), w, 1), clamp_px(x0.max(x1), w, 1));
        let (top, bottom) = (clamp_px(y0.min(y1), h, 1), clamp_px(y0.max(y1), h, 1));
        for y in top..=bottom {
            for x in left..=right {
                self.put(x, y, c);
            }
        }
    }

    /// Bresenham line, `width` pixels thick.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), width: u32, c: Rgb<u8>) {
        if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
            return;
        }
        // Endpoints far off the buffer are pulled in so the walk stays bounded.
        let (w, h) = (self.image.width(), self.image.height());
        let (mut x, mut y) = (clamp_px(from.0, w, w), clamp_px(from.1, h, h));
        let (x1, y1) = (clamp_px(to.0, w, w), clamp_px(to.1, h, h));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let half = i64::from(width.max(1) - 1) / 2;
        let extra = i64::from(width.max(1) - 1) - half;

        loop {
            for oy in -half..=extra {
                for ox in -half..=extra {
                    self.put(x + ox, y + oy, c);
                }
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn disc(&mut self, (cx, cy): (f64, f64), r: f64, c: Rgb<u8>) {
        if !(cx.is_finite() && cy.is_finite() && r.is_finite()) || r < 0.0 {
            return;
        }
        let (w, h) = (self.image.width(), self.image.height());
        if cx + r < 0.0 || cy + r < 0.0 || cx - r > f64::from(w) || cy - r > f64::from(h) {
            return;
        }
        let reach = clamp_px(r, w.max(h).saturating_mul(2), 0);
        let (icx, icy) = (clamp_px(cx, w, w), clamp_px(cy, h, h));
        for y in -reach..=reach {
            for x in -reach..=reach {
                if ((x * x + y * y) as f64) <= r * r {
                    self.put(icx + x, icy + y, c);
                }
            }
        }
    }

    /// Filled pie: slices are `(fraction, colour)` laid clockwise from
    /// twelve o'clock. Fractions should sum to 1.
    pub fn pie(&mut self, (cx, cy): (f64, f64), r: f64, slices: &[(f64, Rgb<u8>)]) {
        if slices.is_empty() {
            return;
        }
        let bounds: Vec<f64> = slices
            .iter()
            .scan(0.0, |acc, (f, _)| {
                *acc += f * TAU;
                Some(*acc)
            })
            .collect();

        if !(cx.is_finite() && cy.is_finite() && r.is_finite()) || r < 0.0 {
            return;
        }
        let (w, h) = (self.image.width(), self.image.height());
        let reach = clamp_px(r, w.max(h).saturating_mul(2), 0);
        let (icx, icy) = (clamp_px(cx, w, w), clamp_px(cy, h, h));
        for y in -reach..=reach {
            for x in -reach..=reach {
                let (fx, fy) = (x as f64, y as f64);
                if fx * fx + fy * fy > r * r {
                    continue;
                }
                // Screen y points down, so increasing atan2 is clockwise.
                let angle = (fy.atan2(fx) + FRAC_PI_2).rem_euclid(TAU);
                let slice = bounds.iter().position(|&b| angle < b).unwrap_or(slices.len() - 1);
                self.put(icx + x, icy + y, slices[slice].1);
            }
        }
    }
}

/// Round a finite pixel coordinate into `[-slack, limit + slack]`.
fn clamp_px(v: f64, limit: u32, slack: u32) -> i64 {
    let (lo, hi) = (-f64::from(slack), f64::from(limit) + f64::from(slack));
    v.round().clamp(lo, hi) as i64
}

// ---------------------------------------------------------------------------
// PlotArea – data coordinates → pixels
// ---------------------------------------------------------------------------

/// A closed data interval, widened when degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Span> {
        let mut it = values.into_iter().filter(|v| v.is_finite());
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Span { min, max }.widened())
    }

    /// Include `v` in the span (e.g. a zero baseline for bars).
    pub fn including(self, v: f64) -> Span {
        Span {
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }

    /// Add `fraction` of the width as margin on both sides.
    pub fn padded(self, fraction: f64) -> Span {
        let pad = (self.max - self.min) * fraction;
        Span {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    fn widened(self) -> Span {
        if self.max > self.min {
            self
        } else {
            let pad = if self.min == 0.0 { 0.5 } else { self.min.abs() * 0.05 };
            Span {
                min: self.min - pad,
                max: self.max + pad,
            }
        }
    }

    fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / (self.max - self.min)
    }
}

pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub x: Span,
    pub y: Span,
}

const MARGIN: f64 = 0.08;
const TICKS: usize = 5;

impl PlotArea {
    pub fn new(canvas: &Canvas, x: Span, y: Span) -> Self {
        let (w, h) = (canvas.width(), canvas.height());
        PlotArea {
            left: w * MARGIN,
            top: h * MARGIN,
            right: w * (1.0 - MARGIN / 2.0),
            bottom: h * (1.0 - MARGIN),
            x,
            y,
        }
    }

    pub fn px(&self, x: f64) -> f64 {
        self.left + self.x.fraction(x) * (self.right - self.left)
    }

    pub fn py(&self, y: f64) -> f64 {
        self.bottom - self.y.fraction(y) * (self.bottom - self.top)
    }

    pub fn point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.px(x), self.py(y))
    }

    /// Grid lines, both axes and tick marks.
    pub fn draw_axes(&self, canvas: &mut Canvas) {
        for i in 0..=TICKS {
            let t = i as f64 / TICKS as f64;
            let gx = self.left + t * (self.right - self.left);
            let gy = self.bottom - t * (self.bottom - self.top);
            canvas.line((gx, self.top), (gx, self.bottom), 1, color::GRID);
            canvas.line((self.left, gy), (self.right, gy), 1, color::GRID);
            canvas.line((gx, self.bottom), (gx, self.bottom + 6.0), 1, color::AXIS);
            canvas.line((self.left - 6.0, gy), (self.left, gy), 1, color::AXIS);
        }
        canvas.line((self.left, self.bottom), (self.right, self.bottom), 2, color::AXIS);
        canvas.line((self.left, self.top), (self.left, self.bottom), 2, color::AXIS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_outside_the_buffer_is_clipped() {
        let mut c = Canvas::new(10, 10);
        c.line((-50.0, -50.0), (50.0, 50.0), 3, color::AXIS);
        c.disc((0.0, 0.0), 30.0, color::SERIES);
        let img = c.into_image();
        assert_eq!(*img.get_pixel(9, 9), color::SERIES);
    }

    #[test]
    fn non_finite_and_huge_coordinates_stay_bounded() {
        let mut c = Canvas::new(20, 10);
        c.fill_rect((2.0, 2.0), (5.0, f64::INFINITY), color::AXIS);
        c.line((0.0, 0.0), (f64::NEG_INFINITY, 5.0), 2, color::AXIS);
        c.disc((f64::INFINITY, 3.0), 4.0, color::AXIS);
        c.pie((10.0, 5.0), f64::NAN, &[(1.0, color::AXIS)]);
        assert!(c.image.pixels().all(|p| *p == color::BACKGROUND));

        // Finite but far off the buffer: clipped to the visible part.
        c.fill_rect((-1e300, 4.0), (1e300, 6.0), color::SERIES);
        c.line((0.0, 8.0), (1e18, 8.0), 1, color::SERIES);
        c.disc((1e12, 1e12), 3.0, color::AXIS);
        let img = c.into_image();
        assert_eq!(*img.get_pixel(0, 5), color::SERIES);
        assert_eq!(*img.get_pixel(19, 5), color::SERIES);
        assert_eq!(*img.get_pixel(19, 8), color::SERIES);
        assert!(img.pixels().all(|p| *p != color::AXIS));
    }

    #[test]
    fn pie_slices_start_at_twelve_oclock_clockwise() {
        let red = Rgb([255, 0, 0]);
        let blue = Rgb([0, 0, 255]);
        let mut c = Canvas::new(101, 101);
        c.pie((50.0, 50.0), 40.0, &[(0.25, red), (0.75, blue)]);
        let img = c.into_image();
        // First quarter runs from the top to three o'clock.
        assert_eq!(*img.get_pixel(70, 30), red);
        assert_eq!(*img.get_pixel(30, 30), blue);
        assert_eq!(*img.get_pixel(50, 80), blue);
        assert_eq!(*img.get_pixel(0, 0), color::BACKGROUND);
    }

    #[test]
    fn degenerate_span_is_widened() {
        let s = Span::of([3.0, 3.0]).unwrap();
        assert!(s.min < 3.0 && s.max > 3.0);
        assert_eq!(Span::of([f64::NAN]), None);
    }

    #[test]
    fn plot_area_maps_corners() {
        let c = Canvas::new(100, 100);
        let area = PlotArea::new(&c, Span { min: 0.0, max: 10.0 }, Span { min: 0.0, max: 1.0 });
        assert!((area.px(0.0) - area.left).abs() < 1e-9);
        assert!((area.py(1.0) - area.top).abs() < 1e-9);
        assert!((area.py(0.0) - area.bottom).abs() < 1e-9);
    }
}
