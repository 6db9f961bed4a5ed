use super::Rgb;

/// 2D drawing target supplied by the host.
///
/// Coordinates are canvas units with the origin at the top left. Shapes that
/// fall partly outside the surface are clipped by the implementation.
pub trait DrawSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);
    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, line_width: f64, color: Rgb);
    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb);
}

const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// In-memory raster, one pixel per canvas unit.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::new(0, 0, 0); width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Pixel range covered by `[start, start + len)`, clipped to `[0, limit)`.
    fn span(start: f64, len: f64, limit: usize) -> (usize, usize) {
        let lo = start.round().max(0.0) as usize;
        let hi = (start + len).round().max(0.0) as usize;
        let lo = lo.min(limit);
        (lo, hi.min(limit).max(lo))
    }

    /// Downsample to `rows` lines of `cols` characters by brightness.
    pub fn to_ascii(&self, cols: usize, rows: usize) -> String {
        let mut out = String::with_capacity((cols + 1) * rows);
        if cols == 0 || rows == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        for row in 0..rows {
            let y0 = row * self.height / rows;
            let y1 = ((row + 1) * self.height / rows).max(y0 + 1);
            for col in 0..cols {
                let x0 = col * self.width / cols;
                let x1 = ((col + 1) * self.width / cols).max(x0 + 1);
                // brightest pixel wins so thin lines survive the downsample
                let mut luma = 0u8;
                for y in y0..y1.min(self.height) {
                    for x in x0..x1.min(self.width) {
                        luma = luma.max(self.pixels[y * self.width + x].luma());
                    }
                }
                let idx = luma as usize * (ASCII_RAMP.len() - 1) / 255;
                out.push(ASCII_RAMP[idx] as char);
            }
            out.push('\n');
        }
        out
    }
}

impl DrawSurface for Framebuffer {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgb::new(0, 0, 0));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let (x0, x1) = Self::span(x, w, self.width);
        let (y0, y1) = Self::span(y, h, self.height);
        for py in y0..y1 {
            let row = py * self.width;
            self.pixels[row + x0..row + x1].fill(color);
        }
    }

    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, line_width: f64, color: Rgb) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        let half = (line_width / 2.0).max(0.5);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let cx = x0 + (x1 - x0) * t;
            let cy = y0 + (y1 - y0) * t;
            let (lo_x, hi_x) = ((cx - half).round() as i64, (cx + half).round() as i64);
            let (lo_y, hi_y) = ((cy - half).round() as i64, (cy + half).round() as i64);
            for py in lo_y..hi_y.max(lo_y + 1) {
                for px in lo_x..hi_x.max(lo_x + 1) {
                    self.put(px, py, color);
                }
            }
        }
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let (x0, x1) = Self::span(x, w, self.width);
        let (y0, y1) = Self::span(y, h, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                // distance from the pixel centre to the nearest corner centre
                let cx = px as f64 + 0.5;
                let cy = py as f64 + 0.5;
                let dx = (x + r - cx).max(cx - (x + w - r)).max(0.0);
                let dy = (y + r - cy).max(cy - (y + h - r)).max(0.0);
                if dx * dx + dy * dy <= r * r {
                    self.pixels[py * self.width + px] = color;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_rect(-5.0, 8.0, 8.0, 10.0, WHITE);
        assert_eq!(fb.pixel(0, 9), Some(WHITE));
        assert_eq!(fb.pixel(2, 8), Some(WHITE));
        assert_eq!(fb.pixel(3, 8), Some(Rgb::new(0, 0, 0)));
        assert_eq!(fb.pixel(0, 7), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn round_rect_skips_corners() {
        let mut fb = Framebuffer::new(20, 20);
        fb.fill_round_rect(0.0, 0.0, 20.0, 20.0, 6.0, WHITE);
        assert_eq!(fb.pixel(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(fb.pixel(10, 10), Some(WHITE));
        assert_eq!(fb.pixel(10, 0), Some(WHITE));
    }

    #[test]
    fn vertical_line_is_drawn() {
        let mut fb = Framebuffer::new(10, 10);
        fb.stroke_line(4.0, 0.0, 4.0, 10.0, 2.0, WHITE);
        for y in 0..10 {
            assert_eq!(fb.pixel(4, y), Some(WHITE));
        }
        assert_eq!(fb.pixel(8, 5), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn ascii_preview_shape() {
        let mut fb = Framebuffer::new(60, 12);
        fb.fill_rect(0.0, 0.0, 30.0, 12.0, WHITE);
        let text = fb.to_ascii(6, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "@@@   ");
    }
}
