//! Single-threaded poll loop driving one read cycle per tick.
//!
//! Frame acquisition, circle detection, and reading delivery are
//! collaborator seams expressed as traits; the orchestrator owns its
//! collaborators explicitly instead of reaching for process-global state.

use std::time::Duration;

use dialbank_core::{to_gray, CircleCandidate, GrayImageView, RgbImage};

use crate::annotate::annotate;
use crate::error::ReadError;
use crate::reader::{BankReading, GaugeReader};

/// Blocking frame provider (camera, snapshot file, test fixture).
pub trait FrameSource {
    /// Acquire the next frame, or `None` when acquisition failed this tick.
    fn acquire(&mut self) -> Option<RgbImage>;
}

/// External circle detector operating on a grayscale derivation of the
/// frame. Returns zero or more candidates in no particular order.
pub trait CircleDetector {
    fn detect(&mut self, gray: &GrayImageView<'_>) -> Vec<CircleCandidate>;
}

/// Receives cycle outputs: display, persistence, downstream consumers.
pub trait ReadingSink {
    /// Called once per successfully acquired frame, before any analysis.
    /// Raw-frame persistence hooks in here.
    fn frame_acquired(&mut self, _frame: &RgbImage) {}

    /// Called only when a cycle produced a reading, with the annotated
    /// frame copy.
    fn cycle_complete(&mut self, annotated: &RgbImage, reading: &BankReading);
}

/// Owns the collaborators for the poll loop. One cycle is in flight at a
/// time; a cycle runs to completion or abort before the next tick starts.
pub struct Orchestrator<S, D, K> {
    source: S,
    detector: D,
    reader: GaugeReader,
    sink: K,
    interval: Duration,
}

impl<S, D, K> Orchestrator<S, D, K>
where
    S: FrameSource,
    D: CircleDetector,
    K: ReadingSink,
{
    pub fn new(source: S, detector: D, reader: GaugeReader, sink: K) -> Self {
        Self {
            source,
            detector,
            reader,
            sink,
            interval: Duration::from_secs(2),
        }
    }

    /// Override the inter-cycle sleep (default 2 s).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[inline]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Run one full read cycle: acquire, detect, read, annotate, deliver.
    ///
    /// Every failure is transient; the caller decides whether to retry.
    pub fn run_once(&mut self) -> Result<BankReading, ReadError> {
        let frame = self.source.acquire().ok_or(ReadError::AcquisitionFailed)?;
        self.sink.frame_acquired(&frame);

        let gray = to_gray(&frame.as_view());
        let candidates = self.detector.detect(&gray.as_view());

        let reading = self.reader.read(&frame.as_view(), &candidates)?;

        let mut annotated = frame.clone();
        annotate(&mut annotated, &reading);
        self.sink.cycle_complete(&annotated, &reading);

        Ok(reading)
    }

    /// Poll forever. Aborted cycles are logged and retried next tick;
    /// nothing here is fatal to the process.
    pub fn run(&mut self) -> ! {
        loop {
            match self.run_once() {
                Ok(reading) => log::info!("cycle complete: {}", reading.reading),
                Err(err) => log::debug!("cycle aborted: {err}"),
            }
            std::thread::sleep(self.interval);
        }
    }
}
