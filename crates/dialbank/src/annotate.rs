//! Annotation overlay: a write-only rendering pass over an owned frame
//! copy and an immutable [`BankReading`]. Nothing here feeds back into
//! analysis.

use dialbank_core::RgbImage;

use crate::reader::BankReading;

pub const COLOR_MAGENTA: [u8; 3] = [255, 0, 255];
pub const COLOR_GREEN: [u8; 3] = [0, 255, 0];
pub const COLOR_ORANGE: [u8; 3] = [255, 128, 0];
pub const COLOR_BLUE: [u8; 3] = [0, 0, 255];

/// Draw needle lines, dial outlines, per-dial values, and the composed
/// reading onto a frame copy. All primitives clip at the buffer edges.
pub fn annotate(frame: &mut RgbImage, result: &BankReading) {
    for dial in &result.dials {
        let ctr = dial.circle.center();
        let radius = dial.circle.radius;
        draw_line(
            frame,
            ctr.x,
            ctr.y,
            dial.needle.tip.x,
            dial.needle.tip.y,
            COLOR_MAGENTA,
            2,
        );
        draw_circle_outline(frame, ctr.x, ctr.y, radius, COLOR_GREEN, 4);
        fill_rect(
            frame,
            ctr.x - 2,
            ctr.y - 2,
            ctr.x + 2,
            ctr.y + 2,
            COLOR_ORANGE,
        );
        draw_text(
            frame,
            &format!("{:.1}", dial.value),
            ctr.x - 20,
            ctr.y + radius + 20,
            1,
            COLOR_BLUE,
        );
    }

    // Composed reading under the leftmost dial.
    if let Some(first) = result.dials.first() {
        let ctr = first.circle.center();
        draw_text(
            frame,
            &result.reading,
            ctr.x,
            ctr.y + first.circle.radius + 100,
            2,
            COLOR_BLUE,
        );
    }
}

fn brush(frame: &mut RgbImage, x: i32, y: i32, color: [u8; 3], thickness: i32) {
    let half = thickness / 2;
    for dy in -half..=half {
        for dx in -half..=half {
            frame.put_pixel(x + dx, y + dy, color);
        }
    }
}

/// Bresenham line with a square brush.
pub fn draw_line(
    frame: &mut RgbImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: [u8; 3],
    thickness: i32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        brush(frame, x, y, color, thickness);
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

/// Circle outline drawn as a distance band of the given thickness.
pub fn draw_circle_outline(
    frame: &mut RgbImage,
    cx: i32,
    cy: i32,
    radius: i32,
    color: [u8; 3],
    thickness: i32,
) {
    let outer = radius as f32 + thickness as f32 / 2.0;
    let inner = (radius as f32 - thickness as f32 / 2.0).max(0.0);
    let reach = outer.ceil() as i32;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            if dist >= inner && dist <= outer {
                frame.put_pixel(cx + dx, cy + dy, color);
            }
        }
    }
}

pub fn fill_rect(frame: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
    for y in y0.min(y1)..=y0.max(y1) {
        for x in x0.min(x1)..=x0.max(x1) {
            frame.put_pixel(x, y, color);
        }
    }
}

const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;

/// 5x7 bitmaps for the characters a reading can contain. Each row is the
/// low 5 bits, MSB leftmost.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}

/// Render text with the embedded bitmap font at an integer scale.
/// Unknown characters advance the cursor without drawing.
pub fn draw_text(
    frame: &mut RgbImage,
    text: &str,
    x: i32,
    y: i32,
    scale: i32,
    color: [u8; 3],
) {
    let scale = scale.max(1);
    let advance = (GLYPH_WIDTH + 1) * scale;
    let mut cursor = x;

    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        fill_rect(
                            frame,
                            cursor + col * scale,
                            y + row as i32 * scale,
                            cursor + col * scale + scale - 1,
                            y + row as i32 * scale + scale - 1,
                            color,
                        );
                    }
                }
            }
        }
        cursor += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::needle::NeedleReading;
    use crate::reader::DialReadout;
    use crate::value::DialConvention;
    use dialbank_core::CircleCandidate;
    use nalgebra::Point2;

    fn reading_with_one_dial() -> BankReading {
        let circle = CircleCandidate::new(100, 100, 50);
        BankReading {
            reading: "3".to_string(),
            dials: vec![DialReadout {
                circle,
                convention: DialConvention::Clockwise,
                raw_value: 3.5,
                value: 3.5,
                needle: NeedleReading {
                    raw_value: 3.5,
                    tip: Point2::new(130, 120),
                },
            }],
        }
    }

    fn pixel(frame: &RgbImage, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * frame.width + x) * 3;
        [frame.data[idx], frame.data[idx + 1], frame.data[idx + 2]]
    }

    #[test]
    fn overlay_touches_needle_circle_and_center() {
        let mut frame = RgbImage::filled(300, 300, [255, 255, 255]);
        annotate(&mut frame, &reading_with_one_dial());

        assert_eq!(pixel(&frame, 100, 100), COLOR_ORANGE); // center marker
        assert_eq!(pixel(&frame, 150, 100), COLOR_GREEN); // circle rim
        assert_eq!(pixel(&frame, 130, 120), COLOR_MAGENTA); // needle tip
    }

    #[test]
    fn drawing_off_screen_dial_does_not_panic() {
        let mut frame = RgbImage::filled(50, 50, [0, 0, 0]);
        annotate(&mut frame, &reading_with_one_dial());
    }

    #[test]
    fn text_renders_known_glyphs_only() {
        let mut frame = RgbImage::filled(100, 20, [0, 0, 0]);
        draw_text(&mut frame, "3.5", 2, 2, 1, COLOR_BLUE);
        assert!(frame.data.iter().any(|&b| b != 0));

        let mut blank = RgbImage::filled(100, 20, [0, 0, 0]);
        draw_text(&mut blank, "x ", 2, 2, 1, COLOR_BLUE);
        assert!(blank.data.iter().all(|&b| b == 0));
    }
}
