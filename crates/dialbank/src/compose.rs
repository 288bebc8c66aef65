//! Combines ordered per-dial values into one integer reading string.

/// Compose the final reading from per-dial values, most significant first.
///
/// For every dial but the last, the digit is the floor of its value, minus
/// one when the dial sits in its low decimal zone (`< 0.5` past a digit
/// boundary) while the next, less significant dial is already past its
/// high zone (`> 5`). This is the standard multi-dial borrow: the coarser
/// dial's needle lags the true rollover. The least significant dial is
/// floored with no adjustment.
///
/// The rule is a heuristic and is applied verbatim near exact boundaries.
pub fn compose_reading(values: &[f32]) -> String {
    let mut reading = String::with_capacity(values.len());

    for (i, &v) in values.iter().enumerate() {
        let mut whole = v.floor() as i64;
        if i + 1 < values.len() {
            let decimal = v - whole as f32;
            if decimal < 0.5 && values[i + 1] > 5.0 {
                whole -= 1;
            }
        }
        reading.push_str(&whole.to_string());
    }

    reading
}
