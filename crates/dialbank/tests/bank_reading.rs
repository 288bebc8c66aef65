//! End-to-end reading of a synthetic three-dial frame.

use approx::assert_relative_eq;

use dialbank::{
    CircleCandidate, DialConvention, GaugeReader, GaugeReaderParams, ReadError, RgbImage,
};

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [20, 20, 20];

/// Paint a dark needle along one scan slice (9 degree steps, slice 0 at
/// 12 o'clock) of a dial centred at (cx, cy).
fn paint_needle(frame: &mut RgbImage, cx: i32, cy: i32, slice: u32, len: i32) {
    let angle = (slice as f32 * 9.0 - 90.0).to_radians();
    for t in 0..=len {
        let x = cx as f32 + t as f32 * angle.cos();
        let y = cy as f32 + t as f32 * angle.sin();
        for dy in -1..=1 {
            for dx in -1..=1 {
                frame.put_pixel(x as i32 + dx, y as i32 + dy, BLACK);
            }
        }
    }
}

fn bank_params() -> GaugeReaderParams {
    GaugeReaderParams::for_bank(vec![
        DialConvention::Clockwise,
        DialConvention::Counterclockwise,
        DialConvention::Clockwise,
    ])
}

fn dial_circles() -> Vec<CircleCandidate> {
    vec![
        CircleCandidate::new(100, 100, 50),
        CircleCandidate::new(250, 103, 50),
        CircleCandidate::new(400, 99, 50),
    ]
}

/// Frame showing 3.5 (CW), raw 4.0 => 6.0 (CCW), 1.5 (CW).
fn three_dial_frame() -> RgbImage {
    let mut frame = RgbImage::filled(520, 240, WHITE);
    paint_needle(&mut frame, 100, 100, 14, 38);
    paint_needle(&mut frame, 250, 103, 16, 38);
    paint_needle(&mut frame, 400, 99, 6, 38);
    frame
}

#[test]
fn reads_a_three_dial_bank() {
    let frame = three_dial_frame();
    let reader = GaugeReader::new(bank_params());

    let result = reader
        .read(&frame.as_view(), &dial_circles())
        .expect("reading");

    // floor(3.5), floor(6.0) with no borrow, floor(1.5)
    assert_eq!(result.reading, "361");
    assert_eq!(result.dials.len(), 3);
    assert_relative_eq!(result.dials[0].value, 3.5);
    assert_relative_eq!(result.dials[1].raw_value, 4.0);
    assert_relative_eq!(result.dials[1].value, 6.0);
    assert_relative_eq!(result.dials[2].value, 1.5);
}

#[test]
fn vertical_outlier_does_not_break_the_row() {
    let mut frame = three_dial_frame();
    // A spurious detection well below the dial row.
    paint_needle(&mut frame, 250, 200, 20, 38);
    let mut circles = dial_circles();
    circles.push(CircleCandidate::new(250, 200, 50));

    let reader = GaugeReader::new(bank_params());
    let result = reader.read(&frame.as_view(), &circles).expect("reading");
    assert_eq!(result.reading, "361");
}

#[test]
fn missing_dial_aborts_with_count_mismatch() {
    let frame = three_dial_frame();
    let circles = &dial_circles()[..2];
    let reader = GaugeReader::new(bank_params());

    let err = reader.read(&frame.as_view(), circles).unwrap_err();
    assert_eq!(
        err,
        ReadError::DialCountMismatch {
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn needleless_dial_aborts_the_whole_frame() {
    let mut frame = RgbImage::filled(520, 240, WHITE);
    paint_needle(&mut frame, 100, 100, 14, 38);
    paint_needle(&mut frame, 250, 103, 16, 38);
    // Dial 2 left fully bright.

    let reader = GaugeReader::new(bank_params());
    let err = reader.read(&frame.as_view(), &dial_circles()).unwrap_err();
    assert_eq!(err, ReadError::UnreadableNeedle { dial: 2 });
}

#[test]
fn empty_detection_aborts() {
    let frame = three_dial_frame();
    let reader = GaugeReader::new(bank_params());
    let err = reader.read(&frame.as_view(), &[]).unwrap_err();
    assert_eq!(err, ReadError::DetectionEmpty);
}

#[test]
fn five_dial_bank_yields_five_digits() {
    let mut frame = RgbImage::filled(700, 240, WHITE);
    let xs = [100, 220, 340, 460, 580];
    let slices = [14, 16, 6, 30, 22];
    let mut circles = Vec::new();
    for (&x, &slice) in xs.iter().zip(&slices) {
        paint_needle(&mut frame, x, 100, slice, 38);
        circles.push(CircleCandidate::new(x, 100, 50));
    }

    // Alternating conventions, leftmost clockwise.
    let conventions = (0..5)
        .map(|i| {
            if i % 2 == 0 {
                DialConvention::Clockwise
            } else {
                DialConvention::Counterclockwise
            }
        })
        .collect();
    let reader = GaugeReader::new(GaugeReaderParams::for_bank(conventions));

    let result = reader.read(&frame.as_view(), &circles).expect("reading");
    assert_eq!(result.reading.len(), 5);
    assert!(result.reading.chars().all(|c| c.is_ascii_digit()));
    // Values 3.5, 6.0, 1.5, 2.5, 5.5; no borrow fires anywhere.
    assert_eq!(result.reading, "36125");
}

#[test]
fn borrow_rule_applies_across_dials() {
    // Dial 0 just past 3 (slice 13, raw 3.25) with dial 1 deep in its
    // upper half (raw 7.0 CW): the leading digit drops to 2.
    let mut frame = RgbImage::filled(520, 240, WHITE);
    paint_needle(&mut frame, 100, 100, 13, 38);
    paint_needle(&mut frame, 250, 103, 28, 38);
    paint_needle(&mut frame, 400, 99, 8, 38);

    let params = GaugeReaderParams::for_bank(vec![DialConvention::Clockwise; 3]);
    let reader = GaugeReader::new(params);
    let result = reader
        .read(&frame.as_view(), &dial_circles())
        .expect("reading");

    assert_relative_eq!(result.dials[0].value, 3.25);
    assert_relative_eq!(result.dials[1].value, 7.0);
    assert_relative_eq!(result.dials[2].value, 2.0);
    assert_eq!(result.reading, "272");
}
