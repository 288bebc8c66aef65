//! The gauge-bank reading pipeline: dial-row selection, per-dial needle
//! scans, convention mapping, and reading composition.

use serde::{Deserialize, Serialize};

use dialbank_core::{CircleCandidate, RgbImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::compose::compose_reading;
use crate::error::ReadError;
use crate::filter::{select_dial_row, RowFilterParams};
use crate::needle::{locate_needle, NeedleReading, NeedleScanParams};
use crate::value::{read_value, DialConvention};

/// Configuration for a [`GaugeReader`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GaugeReaderParams {
    /// Number of dials the meter carries. A frame whose filtered candidate
    /// count differs is rejected outright.
    pub expected_dials: usize,
    /// Reading convention per dial position, leftmost first.
    pub conventions: Vec<DialConvention>,
    #[serde(default)]
    pub filter: RowFilterParams,
    #[serde(default)]
    pub scan: NeedleScanParams,
}

impl GaugeReaderParams {
    /// Build a configuration for a meter with the given dial conventions.
    pub fn for_bank(conventions: Vec<DialConvention>) -> Self {
        Self {
            expected_dials: conventions.len(),
            conventions,
            filter: RowFilterParams::default(),
            scan: NeedleScanParams::default(),
        }
    }
}

/// Analysis output for one dial, left intact for the annotation pass.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DialReadout {
    pub circle: CircleCandidate,
    pub convention: DialConvention,
    /// Needle angle as a raw 0-10 scalar, before the convention.
    pub raw_value: f32,
    /// Dial value after convention and wraparound.
    pub value: f32,
    pub needle: NeedleReading,
}

/// One successfully read frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankReading {
    /// Final digit string, most significant dial first.
    pub reading: String,
    /// Per-dial detail in left-to-right order.
    pub dials: Vec<DialReadout>,
}

/// Reads a horizontal bank of dials from a frame plus detected circles.
pub struct GaugeReader {
    params: GaugeReaderParams,
}

impl GaugeReader {
    /// Create a reader. A conventions list shorter than the expected dial
    /// count is padded with [`DialConvention::Clockwise`].
    pub fn new(mut params: GaugeReaderParams) -> Self {
        if params.conventions.len() < params.expected_dials {
            log::warn!(
                "only {} conventions for {} dials, padding with clockwise",
                params.conventions.len(),
                params.expected_dials
            );
            params
                .conventions
                .resize(params.expected_dials, DialConvention::Clockwise);
        }
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &GaugeReaderParams {
        &self.params
    }

    /// Run one full analysis pass over a frame.
    ///
    /// All-or-nothing: any unreadable dial or a wrong dial count rejects
    /// the whole frame so a partial or guessed reading is never emitted.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame, candidates), fields(width = frame.width, height = frame.height))
    )]
    pub fn read(
        &self,
        frame: &RgbImageView<'_>,
        candidates: &[CircleCandidate],
    ) -> Result<BankReading, ReadError> {
        if candidates.is_empty() {
            return Err(ReadError::DetectionEmpty);
        }

        let row = select_dial_row(candidates, &self.params.filter);
        log::debug!("{} of {} circles on the baseline", row.len(), candidates.len());
        if row.len() != self.params.expected_dials {
            return Err(ReadError::DialCountMismatch {
                expected: self.params.expected_dials,
                found: row.len(),
            });
        }

        let mut dials = Vec::with_capacity(row.len());
        for (i, (circle, &convention)) in
            row.iter().zip(&self.params.conventions).enumerate()
        {
            let needle = locate_needle(frame, circle, &self.params.scan)
                .ok_or(ReadError::UnreadableNeedle { dial: i })?;
            let value = read_value(needle.raw_value, convention);
            log::info!(
                "dial {i}: ({}, {}) radius {} value {value:.2}",
                circle.center_x,
                circle.center_y,
                circle.radius
            );
            dials.push(DialReadout {
                circle: *circle,
                convention,
                raw_value: needle.raw_value,
                value,
                needle,
            });
        }

        let values: Vec<f32> = dials.iter().map(|d| d.value).collect();
        let reading = compose_reading(&values);
        log::info!("reading: {reading}");

        Ok(BankReading { reading, dials })
    }
}
