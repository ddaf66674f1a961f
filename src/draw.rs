use crate::{Bgra, Image};

/// Draws a black line from `(x0, y0)` to `(x1, y1)`, both ends included.
///
/// Integer [Bresenham](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm). Points that
/// fall outside the image are skipped, so either end may be off canvas. Drawn pixels get their
/// alpha (if any) forced to opaque.
pub fn draw_line(img: &mut Image, x0: i32, y0: i32, x1: i32, y1: i32) {
    // i64 so that |x1 - x0| and 2 * err can't overflow
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        plot(img, x, y);
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

fn plot(img: &mut Image, x: i64, y: i64) {
    let alpha = img.channels() == Bgra;
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(px) = img.pixel_mut(x, y) {
        px[..3].fill(0);
        if alpha {
            px[3] = 255;
        }
    }
}
