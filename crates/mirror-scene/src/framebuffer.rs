/// Packed `0x00RRGGBB` pixels, row-major, the layout the window takes.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Follow a window size change. Contents are cleared to black.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Mix `color` over the current pixel at `alpha`.
    pub fn blend(&mut self, x: usize, y: usize, color: u32, alpha: f32) {
        let Some(under) = self.get(x, y) else {
            return;
        };
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |shift: u32| {
            let a = ((color >> shift) & 0xff) as f32;
            let b = ((under >> shift) & 0xff) as f32;
            ((a * alpha + b * (1.0 - alpha)).round() as u32) << shift
        };
        self.set(x, y, mix(16) | mix(8) | mix(0));
    }

    /// Blended Bresenham line, clipped to the buffer.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: u32, alpha: f32) {
        let Some(((mut x0, mut y0), (x1, y1))) =
            clip_line(from, to, self.width as i32, self.height as i32)
        else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.blend(x0 as usize, y0 as usize, color, alpha);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Filled disc; `shade` gets the offset from the centre divided by the
    /// radius and returns the colour for that pixel.
    pub fn fill_disc<F>(&mut self, center: (f32, f32), radius: f32, alpha: f32, mut shade: F)
    where
        F: FnMut(f32, f32) -> u32,
    {
        let radius = radius.max(1.0);
        let x_min = (center.0 - radius).floor().max(0.0) as i32;
        let y_min = (center.1 - radius).floor().max(0.0) as i32;
        let x_max = (center.0 + radius).ceil().min(self.width as f32 - 1.0) as i32;
        let y_max = (center.1 + radius).ceil().min(self.height as f32 - 1.0) as i32;

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let u = (x as f32 + 0.5 - center.0) / radius;
                let v = (y as f32 + 0.5 - center.1) / radius;
                if u * u + v * v <= 1.0 {
                    let color = shade(u, v);
                    self.blend(x as usize, y as usize, color, alpha);
                }
            }
        }
    }
}

// Cohen-Sutherland outcodes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: i64, y: i64, width: i64, height: i64) -> u8 {
    let mut code = INSIDE;
    if x < 0 {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y >= height {
        code |= BOTTOM;
    }
    code
}

// `start + delta * num / den`; the product needs 128 bits when both
// endpoints are near the ends of the `i32` range.
fn step(start: i64, delta: i64, num: i64, den: i64) -> i64 {
    start + (delta as i128 * num as i128 / den as i128) as i64
}

/// Clip a segment to `[0, width) x [0, height)`, `None` if nothing remains.
///
/// Works in `i64` throughout: endpoints may be anywhere in the `i32` range.
fn clip_line(
    from: (i32, i32),
    to: (i32, i32),
    width: i32,
    height: i32,
) -> Option<((i32, i32), (i32, i32))> {
    if width <= 0 || height <= 0 {
        return None;
    }
    let (width, height) = (width as i64, height as i64);
    let (mut x0, mut y0) = (from.0 as i64, from.1 as i64);
    let (mut x1, mut y1) = (to.0 as i64, to.1 as i64);
    loop {
        let code0 = outcode(x0, y0, width, height);
        let code1 = outcode(x1, y1, width, height);
        if code0 | code1 == 0 {
            // both ends are inside the buffer now
            return Some(((x0 as i32, y0 as i32), (x1 as i32, y1 as i32)));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let code = if code0 != 0 { code0 } else { code1 };
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (x, y) = if code & TOP != 0 {
            (step(x0, dx, 0 - y0, dy), 0)
        } else if code & BOTTOM != 0 {
            (step(x0, dx, height - 1 - y0, dy), height - 1)
        } else if code & LEFT != 0 {
            (0, step(y0, dy, 0 - x0, dx))
        } else {
            (width - 1, step(y0, dy, width - 1 - x0, dx))
        };

        if code == code0 {
            (x0, y0) = (x, y);
        } else {
            (x1, y1) = (x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_line_inside() {
        assert_eq!(clip_line((1, 1), (5, 5), 10, 10), Some(((1, 1), (5, 5))));
    }

    #[test]
    fn test_clip_line_crossing() {
        assert_eq!(clip_line((-10, 5), (20, 5), 10, 10), Some(((0, 5), (9, 5))));
    }

    #[test]
    fn test_clip_line_extreme_endpoints() {
        let clipped = clip_line((i32::MIN, 5), (i32::MAX, 5), 10, 10);
        assert_eq!(clipped, Some(((0, 5), (9, 5))));

        let (a, b) = clip_line((5, 5), (i32::MIN, i32::MAX), 10, 10).unwrap();
        assert_eq!(a, (5, 5));
        assert!((0..10).contains(&b.0) && (0..10).contains(&b.1));
    }

    #[test]
    fn test_clip_line_corner_to_corner() {
        let clipped = clip_line((i32::MIN, i32::MIN), (i32::MAX, i32::MAX), 10, 10);
        let (a, b) = clipped.unwrap();
        assert!((0..10).contains(&a.0) && (0..10).contains(&a.1));
        assert!((0..10).contains(&b.0) && (0..10).contains(&b.1));
    }

    #[test]
    fn test_clip_line_outside() {
        assert_eq!(clip_line((-5, -5), (-1, 20), 10, 10), None);
    }
}
