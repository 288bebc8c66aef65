use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One circular dial face located by an external detector.
///
/// Centers and radii are integer pixels; the detector's ordering is not
/// meaningful and callers must sort before use.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CircleCandidate {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
}

impl CircleCandidate {
    pub fn new(center_x: i32, center_y: i32, radius: i32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Center as a point, for geometry helpers.
    #[inline]
    pub fn center(&self) -> Point2<i32> {
        Point2::new(self.center_x, self.center_y)
    }
}
