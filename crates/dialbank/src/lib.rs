//! Reads a bank of analog rotary dial gauges from a still frame and
//! composes one multi-digit reading, the way an odometer built from
//! independent round dials is read.
//!
//! The pipeline is: select the circles forming one horizontal dial row,
//! locate each needle by radial dark-pixel scanning, map each angle to a
//! dial value under its clockwise/counter-clockwise convention, then
//! combine the per-dial values with the cross-dial borrow rule. Circle
//! detection and frame acquisition are collaborator seams; see
//! [`orchestrator`].

pub mod annotate;
pub mod compose;
pub mod error;
pub mod filter;
pub mod needle;
pub mod orchestrator;
pub mod reader;
#[cfg(feature = "image")]
pub mod snapshot;
pub mod value;

pub use dialbank_core::{init_with_level, CircleCandidate, GrayImageView, RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
pub use dialbank_core::{init_tracing, TraceFormat};

pub use compose::compose_reading;
pub use error::ReadError;
pub use filter::{select_dial_row, RowFilterParams};
pub use needle::{locate_needle, NeedleReading, NeedleScanParams};
pub use orchestrator::{CircleDetector, FrameSource, Orchestrator, ReadingSink};
pub use reader::{BankReading, DialReadout, GaugeReader, GaugeReaderParams};
pub use value::{read_value, DialConvention};
