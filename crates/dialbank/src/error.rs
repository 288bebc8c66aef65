/// Errors aborting one read cycle.
///
/// All variants are transient and local to a single frame; the poll loop
/// logs them and retries on the next tick. No partial reading is ever
/// produced from a frame that hits one of these.
#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReadError {
    #[error("frame acquisition failed")]
    AcquisitionFailed,
    #[error("circle detector returned no candidates")]
    DetectionEmpty,
    #[error("expected {expected} dials, found {found}")]
    DialCountMismatch { expected: usize, found: usize },
    #[error("no dark pixels on any ray of dial {dial}")]
    UnreadableNeedle { dial: usize },
}
