#![forbid(unsafe_code)]

//! Headless chord diagram model.
//!
//! This crate holds everything about a chord diagram that does not touch a graphics backend:
//! - the chord input types ([`Chord`], [`Finger`], [`Barre`])
//! - partial settings, their validation and per-read default resolution
//! - fretboard geometry helpers

pub mod error;
pub mod geometry;
pub mod model;
pub mod settings;

pub use error::{Error, Result};
pub use geometry::FretboardGeometry;
pub use model::{Barre, Chord, Finger, FingerValue, OPEN, SILENT};
pub use settings::{
    ChordSettings, ChordStyle, DEFAULT_COLOR, DEFAULT_FONT_FAMILY, DIAGRAM_WIDTH,
    FretLabelPosition, ResolvedChordSettings,
};
