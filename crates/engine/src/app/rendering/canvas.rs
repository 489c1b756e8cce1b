use crate::app::Rgba;

/// Borrowed RGBA8 framebuffer with clipped drawing primitives.
pub(crate) struct Canvas<'a> {
    pixels: &'a mut [u8],
    width: i32,
    height: i32,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            pixels,
            width: width as i32,
            height: height as i32,
        }
    }

    pub(crate) fn width(&self) -> i32 {
        self.width
    }

    pub(crate) fn height(&self) -> i32 {
        self.height
    }

    pub(crate) fn clear(&mut self, color: Rgba) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    /// Alpha-blends `color` over the existing pixel; out-of-bounds writes are dropped.
    pub(crate) fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let Some(pixel) = self.pixels.get_mut(offset..offset + 4) else {
            return;
        };
        if color[3] == 255 {
            pixel.copy_from_slice(&color);
            return;
        }
        let alpha = color[3] as u32;
        for channel in 0..3 {
            let src = color[channel] as u32;
            let dst = pixel[channel] as u32;
            pixel[channel] = ((src * alpha + dst * (255 - alpha)) / 255) as u8;
        }
        pixel[3] = 255;
    }

    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    pub(crate) fn rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        if w <= 1 || h <= 1 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    pub(crate) fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba) {
        let Some((from, to)) = clip_segment_to_rect(from, to, self.width, self.height) else {
            return;
        };
        let (mut x0, mut y0) = (from.0.round() as i32, from.1.round() as i32);
        let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub(crate) fn circle(&mut self, center: (f32, f32), radius: f32, color: Rgba) {
        if radius < 0.5 {
            self.put(center.0.round() as i32, center.1.round() as i32, color);
            return;
        }
        let segments = ((radius * 0.75) as usize).clamp(12, 64);
        let step = std::f32::consts::TAU / segments as f32;
        let mut previous = (center.0 + radius, center.1);
        for index in 1..=segments {
            let angle = step * index as f32;
            let next = (
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            );
            self.line(previous, next, color);
            previous = next;
        }
    }
}

/// Liang-Barsky clip against the padded canvas rectangle.
fn clip_segment_to_rect(
    from: (f32, f32),
    to: (f32, f32),
    width: i32,
    height: i32,
) -> Option<((f32, f32), (f32, f32))> {
    let (min_x, min_y) = (-1.0, -1.0);
    let (max_x, max_y) = (width as f32, height as f32);
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0: f32 = 0.0;
    let mut t1: f32 = 1.0;
    for (p, q) in [
        (-dx, from.0 - min_x),
        (dx, max_x - from.0),
        (-dy, from.1 - min_y),
        (dy, max_y - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        (from.0 + dx * t0, from.1 + dy * t0),
        (from.0 + dx * t1, from.1 + dy * t1),
    ))
}
