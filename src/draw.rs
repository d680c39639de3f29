//! Software rasterizer for the easel back buffer
//!
//! All drawing lands in a raw ARGB8888 pixel buffer. A [`Painter`] borrows
//! the buffer for the duration of a frame's draw calls; shapes are clipped
//! to the buffer bounds and accumulate on top of whatever is already there.

use std::path::Path;

use crate::geometry::{Point, Rect};

/// An RGBA color. Channel values range 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 200, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// This color with every channel raised by `amount`, clamped at 255.
    /// Alpha is untouched.
    pub fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
            a: self.a,
        }
    }

    /// This color with every channel lowered by `amount`, clamped at 0.
    /// Alpha is untouched.
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }

    /// Byte layout for little-endian ARGB8888, the wl_shm format the canvas
    /// presents in.
    pub(crate) fn to_argb8888(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

/// A caller-owned font plus pixel size, passed explicitly into
/// [`Painter::draw_text`]. There is no process-wide default font.
pub struct TextStyle {
    font: fontdue::Font,
    size: f32,
}

impl TextStyle {
    /// Parse a font from raw file data (TTF/OTF).
    pub fn from_bytes(data: &[u8], size: f32) -> Result<Self, Box<dyn std::error::Error>> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())?;
        Ok(Self { font, size })
    }

    /// Load a font file from disk.
    pub fn load(path: &Path, size: f32) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, size)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Horizontal space the text would take when drawn, in pixels.
    pub fn measure(&self, text: &str) -> i32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, self.size).advance_width)
            .sum::<f32>()
            .round() as i32
    }
}

/// Drawing context over a raw pixel buffer. Every shape call clips to the
/// buffer bounds, so callers never need to worry about drawing off the edge.
pub struct Painter<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Painter<'a> {
    /// Wrap a raw ARGB8888 buffer. `pixels` must hold `width * height * 4`
    /// bytes.
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn put_pixel(&mut self, x: i32, y: i32, argb: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&argb);
    }

    /// Flood the whole buffer with one color.
    pub fn fill(&mut self, color: Color) {
        let argb = color.to_argb8888();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&argb);
        }
    }

    /// Draw a filled rectangle. The rectangle is normalized first, so
    /// negative extents draw the same as their normalized form.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.normalize();
        let x_start = rect.x.max(0);
        let y_start = rect.y.max(0);
        let x_end = (rect.x + rect.width).min(self.width as i32);
        let y_end = (rect.y + rect.height).min(self.height as i32);

        if x_end <= x_start || y_end <= y_start {
            return; // Nothing to draw
        }

        let argb = color.to_argb8888();
        for y in y_start..y_end {
            for x in x_start..x_end {
                let idx = (y as u32 * self.width + x as u32) as usize * 4;
                self.pixels[idx..idx + 4].copy_from_slice(&argb);
            }
        }
    }

    /// Draw the outline of a rectangle with the given stroke thickness,
    /// growing inward from the rectangle's edge.
    pub fn outline_rect(&mut self, rect: Rect, thickness: i32, color: Color) {
        let rect = rect.normalize();
        let t = thickness
            .max(1)
            .min(rect.width / 2 + 1)
            .min(rect.height / 2 + 1);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(
            Rect::new(rect.x, rect.y + rect.height - t, rect.width, t),
            color,
        );
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.height), color);
        self.fill_rect(
            Rect::new(rect.x + rect.width - t, rect.y, t, rect.height),
            color,
        );
    }

    /// Draw a filled ellipse centered at `center` with the given radii.
    pub fn fill_ellipse(&mut self, center: Point, radius_x: i32, radius_y: i32, color: Color) {
        if radius_x <= 0 || radius_y <= 0 {
            return;
        }
        let argb = color.to_argb8888();
        for dy in -radius_y..=radius_y {
            // Horizontal half-extent of the ellipse on this scanline.
            let f = 1.0 - (dy as f64 / radius_y as f64).powi(2);
            let half = (radius_x as f64 * f.max(0.0).sqrt()).round() as i32;
            for dx in -half..=half {
                self.put_pixel(center.x + dx, center.y + dy, argb);
            }
        }
    }

    /// Draw a filled circle centered at `center` with the given radius.
    pub fn fill_circle(&mut self, center: Point, radius: i32, color: Color) {
        self.fill_ellipse(center, radius, radius, color);
    }

    /// Draw the outline of an ellipse as a ring of the given thickness,
    /// growing inward from the outer radius.
    pub fn outline_ellipse(
        &mut self,
        center: Point,
        radius_x: i32,
        radius_y: i32,
        thickness: i32,
        color: Color,
    ) {
        if radius_x <= 0 || radius_y <= 0 {
            return;
        }
        let t = thickness.max(1);
        let inner_x = (radius_x - t) as f64;
        let inner_y = (radius_y - t) as f64;
        let argb = color.to_argb8888();
        for dy in -radius_y..=radius_y {
            for dx in -radius_x..=radius_x {
                let outer =
                    (dx as f64 / radius_x as f64).powi(2) + (dy as f64 / radius_y as f64).powi(2);
                if outer > 1.0 {
                    continue;
                }
                let inside_inner = inner_x > 0.0
                    && inner_y > 0.0
                    && (dx as f64 / inner_x).powi(2) + (dy as f64 / inner_y).powi(2) <= 1.0;
                if !inside_inner {
                    self.put_pixel(center.x + dx, center.y + dy, argb);
                }
            }
        }
    }

    /// Draw the outline of a circle.
    pub fn outline_circle(&mut self, center: Point, radius: i32, thickness: i32, color: Color) {
        self.outline_ellipse(center, radius, radius, thickness, color);
    }

    /// Draw a line from `start` to `end` with the given thickness.
    pub fn line(&mut self, start: Point, end: Point, thickness: i32, color: Color) {
        // Bresenham walk, stamping a dot at each step for thickness > 1.
        let radius = (thickness.max(1) - 1) / 2;
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        let sx = if start.x < end.x { 1 } else { -1 };
        let sy = if start.y < end.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = start.x;
        let mut y = start.y;
        let argb = color.to_argb8888();

        loop {
            if radius == 0 {
                self.put_pixel(x, y, argb);
            } else {
                self.fill_circle(Point::new(x, y), radius, color);
            }
            if x == end.x && y == end.y {
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

    /// Draw a filled triangle with the three given corner points.
    pub fn fill_triangle(&mut self, p1: Point, p2: Point, p3: Point, color: Color) {
        fn edge(a: Point, b: Point, x: i32, y: i32) -> i64 {
            (b.x - a.x) as i64 * (y - a.y) as i64 - (b.y - a.y) as i64 * (x - a.x) as i64
        }

        let area = edge(p1, p2, p3.x, p3.y);
        if area == 0 {
            return; // Degenerate
        }

        let min_x = p1.x.min(p2.x).min(p3.x).max(0);
        let max_x = p1.x.max(p2.x).max(p3.x).min(self.width as i32 - 1);
        let min_y = p1.y.min(p2.y).min(p3.y).max(0);
        let max_y = p1.y.max(p2.y).max(p3.y).min(self.height as i32 - 1);

        let argb = color.to_argb8888();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let w0 = edge(p1, p2, x, y);
                let w1 = edge(p2, p3, x, y);
                let w2 = edge(p3, p1, x, y);
                let inside = if area > 0 {
                    w0 >= 0 && w1 >= 0 && w2 >= 0
                } else {
                    w0 <= 0 && w1 <= 0 && w2 <= 0
                };
                if inside {
                    self.put_pixel(x, y, argb);
                }
            }
        }
    }

    /// Draw the outline of a triangle with the three given corner points.
    pub fn outline_triangle(
        &mut self,
        p1: Point,
        p2: Point,
        p3: Point,
        thickness: i32,
        color: Color,
    ) {
        self.line(p1, p2, thickness, color);
        self.line(p2, p3, thickness, color);
        self.line(p3, p1, thickness, color);
    }

    /// Draw text with its baseline starting at `bottom_left`, alpha-blending
    /// glyph coverage over the existing pixels.
    pub fn draw_text(&mut self, style: &TextStyle, text: &str, color: Color, bottom_left: Point) {
        let mut pen_x = bottom_left.x as f32;
        for ch in text.chars() {
            let (metrics, bitmap) = style.font.rasterize(ch, style.size);
            if metrics.width == 0 {
                // Whitespace and other coverage-free glyphs still advance.
                pen_x += metrics.advance_width;
                continue;
            }
            let glyph_x = pen_x.round() as i32 + metrics.xmin;
            let glyph_top = bottom_left.y - metrics.height as i32 - metrics.ymin;
            for (row, chunk) in bitmap.chunks_exact(metrics.width).enumerate() {
                for (col, &coverage) in chunk.iter().enumerate() {
                    if coverage == 0 {
                        continue;
                    }
                    self.blend_pixel(glyph_x + col as i32, glyph_top + row as i32, color, coverage);
                }
            }
            pen_x += metrics.advance_width;
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize * 4;
        let alpha = coverage as u32 * color.a as u32 / 255;
        let inv = 255 - alpha;
        let src = color.to_argb8888();
        for c in 0..3 {
            let dst = self.pixels[idx + c] as u32;
            self.pixels[idx + c] = ((src[c] as u32 * alpha + dst * inv) / 255) as u8;
        }
        self.pixels[idx + 3] = self.pixels[idx + 3].max(alpha as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height * 4) as usize]
    }

    fn pixel_at(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [
            pixels[idx],
            pixels[idx + 1],
            pixels[idx + 2],
            pixels[idx + 3],
        ]
    }

    #[test]
    fn fill_rect_writes_argb_bytes() {
        let mut pixels = buffer(8, 8);
        let mut painter = Painter::new(&mut pixels, 8, 8);
        painter.fill_rect(Rect::new(2, 2, 3, 3), Color::RED);

        // Little-endian ARGB8888: B, G, R, A.
        assert_eq!(pixel_at(&pixels, 8, 2, 2), [0, 0, 255, 255]);
        assert_eq!(pixel_at(&pixels, 8, 4, 4), [0, 0, 255, 255]);
        assert_eq!(pixel_at(&pixels, 8, 5, 5), [0, 0, 0, 0]);
        assert_eq!(pixel_at(&pixels, 8, 1, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn fill_rect_normalizes_negative_extents() {
        let mut forward = buffer(8, 8);
        let mut backward = buffer(8, 8);
        Painter::new(&mut forward, 8, 8).fill_rect(Rect::new(2, 2, 3, 3), Color::BLUE);
        Painter::new(&mut backward, 8, 8).fill_rect(Rect::new(5, 5, -3, -3), Color::BLUE);
        assert_eq!(forward, backward);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut pixels = buffer(4, 4);
        let mut painter = Painter::new(&mut pixels, 4, 4);
        painter.fill_rect(Rect::new(-10, -10, 100, 100), Color::WHITE);
        for chunk in pixels.chunks_exact(4) {
            assert_eq!(chunk, [255, 255, 255, 255]);
        }
    }

    #[test]
    fn draws_accumulate_until_filled_over() {
        let mut pixels = buffer(8, 8);
        let mut painter = Painter::new(&mut pixels, 8, 8);
        painter.fill_rect(Rect::new(0, 0, 4, 4), Color::RED);
        painter.fill_rect(Rect::new(2, 2, 4, 4), Color::GREEN);

        drop(painter);

        // Overlap shows the later call, non-overlap keeps the earlier one.
        assert_eq!(pixel_at(&pixels, 8, 1, 1), Color::RED.to_argb8888());
        assert_eq!(pixel_at(&pixels, 8, 3, 3), Color::GREEN.to_argb8888());

        let mut painter = Painter::new(&mut pixels, 8, 8);
        painter.fill(Color::BLACK);
        assert_eq!(pixel_at(&pixels, 8, 1, 1), Color::BLACK.to_argb8888());
        assert_eq!(pixel_at(&pixels, 8, 3, 3), Color::BLACK.to_argb8888());
    }

    #[test]
    fn circle_covers_center_and_skips_corners() {
        let mut pixels = buffer(16, 16);
        let mut painter = Painter::new(&mut pixels, 16, 16);
        painter.fill_circle(Point::new(8, 8), 4, Color::RED);
        assert_eq!(pixel_at(&pixels, 16, 8, 8), Color::RED.to_argb8888());
        assert_eq!(pixel_at(&pixels, 16, 12, 8), Color::RED.to_argb8888());
        // Bounding-box corner stays untouched.
        assert_eq!(pixel_at(&pixels, 16, 12, 12), [0, 0, 0, 0]);
    }

    #[test]
    fn line_touches_both_endpoints() {
        let mut pixels = buffer(8, 8);
        let mut painter = Painter::new(&mut pixels, 8, 8);
        painter.line(Point::new(1, 1), Point::new(6, 4), 1, Color::CYAN);
        assert_eq!(pixel_at(&pixels, 8, 1, 1), Color::CYAN.to_argb8888());
        assert_eq!(pixel_at(&pixels, 8, 6, 4), Color::CYAN.to_argb8888());
    }

    #[test]
    fn triangle_contains_its_centroid() {
        let mut pixels = buffer(16, 16);
        let mut painter = Painter::new(&mut pixels, 16, 16);
        painter.fill_triangle(
            Point::new(2, 2),
            Point::new(14, 2),
            Point::new(8, 14),
            Color::BLUE,
        );
        assert_eq!(pixel_at(&pixels, 16, 8, 5), Color::BLUE.to_argb8888());
        // Outside the left edge.
        assert_eq!(pixel_at(&pixels, 16, 2, 14), [0, 0, 0, 0]);
    }

    #[test]
    fn lighten_and_darken_saturate() {
        let c = Color::new(240, 10, 128, 200);
        let lighter = c.lighten(50);
        assert_eq!(
            (lighter.r, lighter.g, lighter.b, lighter.a),
            (255, 60, 178, 200)
        );
        let darker = c.darken(30);
        assert_eq!((darker.r, darker.g, darker.b, darker.a), (210, 0, 98, 200));
    }
}
