//! Dial-row selection: keep detected circles that sit on one horizontal
//! baseline and order them left to right.

use serde::{Deserialize, Serialize};

use dialbank_core::CircleCandidate;

/// Settings for horizontal-baseline filtering.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RowFilterParams {
    /// Maximum vertical deviation (pixels, exclusive) from the topmost
    /// candidate for a circle to count as part of the row.
    pub max_y_deviation: i32,
}

impl Default for RowFilterParams {
    fn default() -> Self {
        Self { max_y_deviation: 20 }
    }
}

/// Select the circles forming a single horizontal row of dials.
///
/// Candidates are sorted ascending by `center_x`; a candidate survives iff
/// its `center_y` deviates from the minimum `center_y` of the *full* input
/// set by strictly less than `max_y_deviation`. The output is a subsequence
/// of the input in left-to-right order.
///
/// Count validation against the expected dial count is the caller's job.
pub fn select_dial_row(
    candidates: &[CircleCandidate],
    params: &RowFilterParams,
) -> Vec<CircleCandidate> {
    let mut sorted: Vec<CircleCandidate> = candidates.to_vec();
    sorted.sort_by_key(|c| c.center_x);

    let Some(min_y) = sorted.iter().map(|c| c.center_y).min() else {
        return Vec::new();
    };

    sorted
        .into_iter()
        .filter(|c| (c.center_y - min_y).abs() < params.max_y_deviation)
        .collect()
}
