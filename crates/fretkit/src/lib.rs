#![forbid(unsafe_code)]

//! `fretkit` renders guitar chord diagrams headlessly.
//!
//! ```no_run
//! use fretkit::{Chord, ChordDiagram, ChordSettings, Finger};
//!
//! let mut diagram = ChordDiagram::new();
//! diagram
//!     .configure(ChordSettings::new().with_title("Em").with_position(1))?
//!     .chord(Chord::new(
//!         vec![Finger::fret(5, 2), Finger::fret(4, 2), Finger::open(1)],
//!         vec![],
//!     ));
//! let size = diagram.draw()?;
//! let svg = diagram.svg()?;
//! # let _ = (size, svg);
//! # Ok::<(), fretkit::Error>(())
//! ```
//!
//! Settings are kept as given and resolved against the defaults table on every `draw()`, so
//! keys that were never configured follow later changes to the defaults.

pub use fretkit_core::*;

pub mod render {
    pub use fretkit_render::graphics::{Alignment, BBox, ElementId, Graphics, GraphicsElement};
    pub use fretkit_render::svg::{SvgDocument, SvgElement};
    pub use fretkit_render::text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics};
    pub use fretkit_render::{Backend, DrawCall, RecordingGraphics, draw_chord};
}

pub use fretkit_render::DiagramSize;

/// Options for the graphics backends created by a [`ChordDiagram`].
pub type RenderOptions = fretkit_render::BackendOptions;

use fretkit_render::Backend;

/// A chord diagram: settings, chord data and a lazily created graphics backend.
///
/// The backend matches the configured style. It is created on first use and reused by later
/// draws until a configuration call changes the style.
#[derive(Debug, Clone, Default)]
pub struct ChordDiagram {
    graphics: Option<Backend>,
    settings: ChordSettings,
    defaults: ResolvedChordSettings,
    chord: Chord,
    options: RenderOptions,
}

impl ChordDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Validates `settings` and merges them over the current ones.
    ///
    /// Nothing changes when validation fails. A different `style` discards the current backend.
    pub fn configure(&mut self, settings: ChordSettings) -> Result<&mut Self> {
        settings.validate()?;

        if let Some(style) = settings.style.as_deref() {
            if style != self.effective_style() {
                tracing::debug!(from = self.effective_style(), to = style, "style changed");
                self.graphics = None;
            }
        }

        self.settings.merge(settings);
        Ok(self)
    }

    /// Like [`ChordDiagram::configure`], from a camelCase JSON object.
    pub fn configure_json(&mut self, json: &str) -> Result<&mut Self> {
        let settings = ChordSettings::from_json(json)?;
        self.configure(settings)
    }

    /// Replaces the chord data. Strings and frets are not checked against the settings.
    pub fn chord(&mut self, chord: Chord) -> &mut Self {
        self.chord = chord;
        self
    }

    pub fn chord_json(&mut self, json: &str) -> Result<&mut Self> {
        let chord = Chord::from_json(json)?;
        Ok(self.chord(chord))
    }

    /// Replaces the defaults table. Keys never configured follow it on the next draw.
    pub fn set_defaults(&mut self, defaults: ResolvedChordSettings) -> &mut Self {
        let before = self.effective_style().to_string();
        self.defaults = defaults;
        if before != self.effective_style() {
            self.graphics = None;
        }
        self
    }

    pub fn settings(&self) -> &ChordSettings {
        &self.settings
    }

    pub fn defaults(&self) -> &ResolvedChordSettings {
        &self.defaults
    }

    /// The settings a draw would use right now.
    pub fn resolved_settings(&self) -> ResolvedChordSettings {
        self.settings.resolve(&self.defaults)
    }

    pub fn current_chord(&self) -> &Chord {
        &self.chord
    }

    /// The backend, if one has been created.
    pub fn backend(&self) -> Option<&Backend> {
        self.graphics.as_ref()
    }

    /// Clears the backend and draws the whole diagram.
    pub fn draw(&mut self) -> Result<DiagramSize> {
        let resolved = self.resolved_settings();
        let backend = backend_for(&mut self.graphics, &resolved.style, &self.options)?;
        Ok(fretkit_render::draw_chord(backend, &self.chord, &resolved))
    }

    pub fn clear(&mut self) -> Result<()> {
        let style = self.effective_style().to_string();
        let backend = backend_for(&mut self.graphics, &style, &self.options)?;
        fretkit_render::Graphics::clear(backend);
        Ok(())
    }

    /// Serializes what is currently drawn.
    pub fn svg(&mut self) -> Result<String> {
        let style = self.effective_style().to_string();
        let backend = backend_for(&mut self.graphics, &style, &self.options)?;
        Ok(backend.to_svg_string())
    }

    fn effective_style(&self) -> &str {
        self.settings
            .style
            .as_deref()
            .unwrap_or(self.defaults.style.as_str())
    }
}

fn backend_for<'a>(
    slot: &'a mut Option<Backend>,
    style: &str,
    options: &RenderOptions,
) -> Result<&'a mut Backend> {
    let backend = match slot.take() {
        Some(backend) => backend,
        None => {
            let style: ChordStyle = style.parse()?;
            tracing::debug!(%style, "creating graphics backend");
            Backend::for_style(style, options)
        }
    };
    Ok(slot.insert(backend))
}
