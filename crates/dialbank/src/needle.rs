//! Needle location by radial dark-pixel scanning.
//!
//! Rays are cast from the dial center at fixed angular steps; each ray is
//! scored by the total number of dark samples along it and the best-scoring
//! ray gives the needle angle as a 0-10 scalar.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use dialbank_core::{mean_intensity, CircleCandidate, RgbImageView};

/// Configuration for the radial needle scan.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedleScanParams {
    /// Number of angular slices over the full circle (40 gives 9 deg steps).
    pub slices: u32,
    /// Scan length as a fraction of the dial radius; stays inside the face
    /// to avoid the rim and printed markings.
    pub reach_frac: f32,
    /// Naive-mean intensity below which a sample counts as dark.
    pub dark_threshold: f32,
}

impl Default for NeedleScanParams {
    fn default() -> Self {
        Self {
            slices: 40,
            reach_frac: 0.8,
            dark_threshold: 100.0,
        }
    }
}

/// Needle position on one dial.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct NeedleReading {
    /// Angular position scaled to `[0, 10)`; slice 0 points to 12 o'clock.
    pub raw_value: f32,
    /// Last sampled point of the winning ray (its far end).
    pub tip: Point2<i32>,
}

/// Locate the needle on one dial face.
///
/// Slice `i` is cast at `i * (360/slices) - 90` degrees in image
/// coordinates (y down), so slice 0 is the dial's 12 o'clock and the scalar
/// grows clockwise. `radius` evenly spaced points are sampled along each
/// ray, roughly one per pixel of travel, and out-of-bounds samples are
/// never dark.
///
/// A ray is scored by its total dark-sample count, not by the longest
/// unbroken dark streak; the first slice with a strictly greater score than
/// any earlier one wins. A fully bright dial yields `None`.
pub fn locate_needle(
    frame: &RgbImageView<'_>,
    circle: &CircleCandidate,
    params: &NeedleScanParams,
) -> Option<NeedleReading> {
    if circle.radius <= 0 || params.slices == 0 {
        return None;
    }

    let center = circle.center();
    let (cx, cy) = (center.x, center.y);
    let reach = params.reach_frac * circle.radius as f32;
    let step_deg = 360.0 / params.slices as f32;
    let samples = circle.radius as usize;
    let denom = samples.saturating_sub(1).max(1) as f32;

    let mut best: Option<NeedleReading> = None;
    let mut best_dark = 0u32;

    for i in 0..params.slices {
        let angle = (i as f32 * step_deg - 90.0).to_radians();
        let x2 = cx + (reach * angle.cos()) as i32;
        let y2 = cy + (reach * angle.sin()) as i32;

        let mut dark = 0u32;
        let mut last = Point2::new(cx, cy);
        for k in 0..samples {
            let t = k as f32 / denom;
            let px = (cx as f32 + t * (x2 - cx) as f32) as i32;
            let py = (cy as f32 + t * (y2 - cy) as f32) as i32;
            last = Point2::new(px, py);
            if let Some(intensity) = mean_intensity(frame, px, py) {
                if intensity < params.dark_threshold {
                    dark += 1;
                }
            }
        }

        // Strictly greater: on a tie the earlier slice keeps the win.
        if dark > best_dark {
            best_dark = dark;
            best = Some(NeedleReading {
                raw_value: 10.0 * i as f32 / params.slices as f32,
                tip: last,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dialbank_core::RgbImage;

    const WHITE: [u8; 3] = [255, 255, 255];
    const BLACK: [u8; 3] = [0, 0, 0];

    fn bright_frame() -> RgbImage {
        RgbImage::filled(200, 200, WHITE)
    }

    /// Paint a dark band along one scan slice of a dial at (100, 100).
    fn paint_needle(frame: &mut RgbImage, slice: u32, len: i32) {
        let angle = (slice as f32 * 9.0 - 90.0).to_radians();
        for t in 0..=len {
            let x = 100.0 + t as f32 * angle.cos();
            let y = 100.0 + t as f32 * angle.sin();
            for dy in -1..=1 {
                for dx in -1..=1 {
                    frame.put_pixel(x as i32 + dx, y as i32 + dy, BLACK);
                }
            }
        }
    }

    #[test]
    fn dark_wedge_at_slice_ten_wins() {
        let mut frame = bright_frame();
        paint_needle(&mut frame, 10, 38);
        let circle = CircleCandidate::new(100, 100, 50);

        let reading = locate_needle(
            &frame.as_view(),
            &circle,
            &NeedleScanParams::default(),
        )
        .expect("needle");

        // 10 * 10 / 40
        assert_relative_eq!(reading.raw_value, 2.5);
        // Slice 10 points east; the tip is the ray's far end at 0.8 * r.
        assert_eq!(reading.tip, nalgebra::Point2::new(140, 100));
    }

    #[test]
    fn fully_bright_dial_is_unreadable() {
        let frame = bright_frame();
        let circle = CircleCandidate::new(100, 100, 50);
        let reading = locate_needle(
            &frame.as_view(),
            &circle,
            &NeedleScanParams::default(),
        );
        assert!(reading.is_none());
    }

    #[test]
    fn tie_goes_to_the_first_maximal_slice() {
        // Only the shared center pixel is dark, so every ray scores 1 and
        // slice 0 must keep the win.
        let mut frame = bright_frame();
        frame.put_pixel(100, 100, BLACK);
        let circle = CircleCandidate::new(100, 100, 50);

        let reading = locate_needle(
            &frame.as_view(),
            &circle,
            &NeedleScanParams::default(),
        )
        .expect("needle");
        assert_relative_eq!(reading.raw_value, 0.0);
    }

    #[test]
    fn scan_near_frame_edge_does_not_panic() {
        let mut frame = bright_frame();
        paint_needle(&mut frame, 0, 30);
        // Dial hanging off the top-left corner; out-of-bounds samples are
        // simply not dark.
        let circle = CircleCandidate::new(5, 5, 50);
        let _ = locate_needle(&frame.as_view(), &circle, &NeedleScanParams::default());
    }
}
