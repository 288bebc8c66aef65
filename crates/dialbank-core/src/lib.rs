//! Core types and utilities for analog dial-bank reading.
//!
//! This crate is intentionally small and purely pixel-level. It does *not*
//! depend on any concrete circle detector, frame source, or image codec.

mod circle;
mod image;
mod logger;

pub use circle::CircleCandidate;
pub use image::{
    mean_intensity, to_gray, GrayImage, GrayImageView, RgbImage, RgbImageView,
};

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, TraceFormat};

pub use logger::init_with_level;
