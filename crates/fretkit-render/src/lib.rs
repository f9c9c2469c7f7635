#![forbid(unsafe_code)]

//! Chord diagram layout and graphics backends.
//!
//! - [`chord::draw_chord`] turns a chord plus resolved settings into draw calls
//! - [`graphics::Graphics`] is the backend contract
//! - [`SvgGraphics`] draws exact SVG primitives, [`RoughGraphics`] sketches them with `roughr`

pub mod backend;
pub mod chord;
pub mod graphics;
pub mod normal;
pub mod recording;
pub mod rough;
pub mod svg;
pub mod text;

pub use backend::{Backend, BackendOptions};
pub use chord::{DiagramSize, draw_chord};
pub use graphics::{Alignment, BBox, ElementId, Graphics, GraphicsElement};
pub use normal::SvgGraphics;
pub use recording::{DrawCall, RecordingGraphics};
pub use rough::RoughGraphics;
pub use svg::{SvgDocument, SvgElement};
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
