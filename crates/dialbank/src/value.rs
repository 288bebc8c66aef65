//! Per-dial value convention: maps a raw 0-10 needle scalar to the value
//! the dial actually displays.

use serde::{Deserialize, Serialize};

/// Direction in which a dial's printed scale increases.
///
/// Adjacent dials on a mechanical meter are usually geared in alternating
/// directions, so the convention is supplied per dial position.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialConvention {
    Clockwise,
    Counterclockwise,
}

/// Apply the reading convention to a raw needle scalar in `[0, 10)`.
///
/// Counter-clockwise dials mirror the scale (`10 - raw`); a result of
/// exactly 10 wraps to 0 so the output stays in `[0, 10)`.
pub fn read_value(raw: f32, convention: DialConvention) -> f32 {
    let result = match convention {
        DialConvention::Counterclockwise => 10.0 - raw,
        DialConvention::Clockwise => raw,
    };
    if result == 10.0 {
        0.0
    } else {
        result
    }
}
