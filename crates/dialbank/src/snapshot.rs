//! Timestamped raw/annotated frame dumps, for offline inspection of what
//! the reader saw. Enabled with the `image` feature.

use std::path::{Path, PathBuf};

use dialbank_core::RgbImage;

/// Errors while persisting a snapshot.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("frame dimensions do not fit an image buffer")]
    BadDimensions,
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}

/// Writes raw and annotated frames into a directory with names derived
/// from the wall clock, one pair per minute-resolution timestamp.
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist the frame as acquired, before any overlay.
    pub fn save_raw(&self, frame: &RgbImage) -> Result<PathBuf, SnapshotError> {
        self.save(frame, "")
    }

    /// Persist the annotated copy produced by a successful cycle.
    pub fn save_annotated(&self, frame: &RgbImage) -> Result<PathBuf, SnapshotError> {
        self.save(frame, "-out")
    }

    fn save(&self, frame: &RgbImage, suffix: &str) -> Result<PathBuf, SnapshotError> {
        let _ = std::fs::create_dir_all(&self.dir);
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M");
        let path = self.dir.join(format!("sample-{stamp}{suffix}.jpg"));

        let (w, h) = (
            u32::try_from(frame.width).map_err(|_| SnapshotError::BadDimensions)?,
            u32::try_from(frame.height).map_err(|_| SnapshotError::BadDimensions)?,
        );
        let buf = image::RgbImage::from_raw(w, h, frame.data.clone())
            .ok_or(SnapshotError::BadDimensions)?;
        buf.save(&path)?;
        Ok(path)
    }
}
