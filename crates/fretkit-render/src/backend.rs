//! Backend selection by chord diagram style.

use crate::graphics::{Alignment, ElementId, Graphics, GraphicsElement};
use crate::normal::SvgGraphics;
use crate::rough::{DEFAULT_SEED, RoughGraphics};
use crate::svg::SvgDocument;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use fretkit_core::ChordStyle;
use std::sync::Arc;

#[derive(Clone)]
pub struct BackendOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Seed for the hand-drawn backend. `0` draws different strokes every time.
    pub hand_drawn_seed: u64,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            hand_drawn_seed: DEFAULT_SEED,
        }
    }
}

impl std::fmt::Debug for BackendOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendOptions")
            .field("hand_drawn_seed", &self.hand_drawn_seed)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Backend {
    Normal(SvgGraphics),
    Handdrawn(RoughGraphics),
}

impl Backend {
    pub fn for_style(style: ChordStyle, options: &BackendOptions) -> Self {
        let measurer = Arc::clone(&options.text_measurer);
        match style {
            ChordStyle::Normal => Self::Normal(SvgGraphics::new(measurer)),
            ChordStyle::Handdrawn => {
                Self::Handdrawn(RoughGraphics::new(measurer, options.hand_drawn_seed))
            }
        }
    }

    pub fn style(&self) -> ChordStyle {
        match self {
            Self::Normal(_) => ChordStyle::Normal,
            Self::Handdrawn(_) => ChordStyle::Handdrawn,
        }
    }

    pub fn document(&self) -> &SvgDocument {
        match self {
            Self::Normal(g) => g.document(),
            Self::Handdrawn(g) => g.document(),
        }
    }

    pub fn to_svg_string(&self) -> String {
        self.document().to_svg_string()
    }

    fn graphics(&mut self) -> &mut dyn Graphics {
        match self {
            Self::Normal(g) => g,
            Self::Handdrawn(g) => g,
        }
    }
}

impl Graphics for Backend {
    fn line(
        &mut self,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        stroke_width: f64,
        color: &str,
    ) {
        self.graphics()
            .line(from_x, from_y, to_x, to_y, stroke_width, color);
    }

    fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke_width: f64,
        stroke_color: &str,
        fill: Option<&str>,
        radius: Option<f64>,
    ) -> GraphicsElement {
        self.graphics().rect(
            x,
            y,
            width,
            height,
            stroke_width,
            stroke_color,
            fill,
            radius,
        )
    }

    fn circle(
        &mut self,
        x: f64,
        y: f64,
        diameter: f64,
        stroke_width: f64,
        stroke_color: &str,
        fill: Option<&str>,
    ) -> GraphicsElement {
        self.graphics()
            .circle(x, y, diameter, stroke_width, stroke_color, fill)
    }

    fn text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_size: f64,
        color: &str,
        font_family: &str,
        alignment: Alignment,
    ) -> GraphicsElement {
        self.graphics()
            .text(text, x, y, font_size, color, font_family, alignment)
    }

    fn remove(&mut self, id: ElementId) {
        self.graphics().remove(id);
    }

    fn size(&mut self, width: f64, height: f64) {
        self.graphics().size(width, height);
    }

    fn clear(&mut self) {
        self.graphics().clear();
    }
}
