//! Precise SVG backend.

use crate::graphics::{Alignment, BBox, ElementId, Graphics, GraphicsElement};
use crate::svg::{SvgDocument, SvgElement};
use crate::text::{TextMeasurer, TextStyle};
use fretkit_core::DIAGRAM_WIDTH;
use std::sync::Arc;

/// Draws exact primitives into an [`SvgDocument`].
#[derive(Clone)]
pub struct SvgGraphics {
    document: SvgDocument,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl SvgGraphics {
    pub fn new(measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        Self {
            document: SvgDocument::new(DIAGRAM_WIDTH, 0.0),
            measurer,
        }
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_svg_string()
    }
}

impl std::fmt::Debug for SvgGraphics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgGraphics")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl Graphics for SvgGraphics {
    fn line(
        &mut self,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        stroke_width: f64,
        color: &str,
    ) {
        self.document.push(SvgElement::Line {
            x1: from_x,
            y1: from_y,
            x2: to_x,
            y2: to_y,
            stroke_width,
            color: color.to_string(),
        });
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
        let id = self.document.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            stroke_width,
            stroke: stroke_color.to_string(),
            fill: fill.map(str::to_string),
            radius: radius.unwrap_or(0.0),
        });
        GraphicsElement {
            id,
            bbox: BBox::new(x, y, width, height),
        }
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
        let id = self.document.push(SvgElement::Circle {
            x,
            y,
            diameter,
            stroke_width,
            stroke: stroke_color.to_string(),
            fill: fill.map(str::to_string),
        });
        GraphicsElement {
            id,
            bbox: BBox::new(x, y, diameter, diameter),
        }
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
        let metrics = self
            .measurer
            .measure(text, &TextStyle::new(font_family, font_size));
        let id = self.document.push(SvgElement::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color: color.to_string(),
            font_family: font_family.to_string(),
            alignment,
        });
        GraphicsElement {
            id,
            bbox: BBox::for_text(metrics, x, y, alignment),
        }
    }

    fn remove(&mut self, id: ElementId) {
        self.document.remove(id);
    }

    fn size(&mut self, width: f64, height: f64) {
        self.document.set_size(width, height);
    }

    fn clear(&mut self) {
        self.document.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;

    fn graphics() -> SvgGraphics {
        SvgGraphics::new(Arc::new(DeterministicTextMeasurer::default()))
    }

    #[test]
    fn text_box_is_measured() {
        let mut g = graphics();
        let el = g.text("Am", 200.0, 5.0, 10.0, "#000", "Arial", Alignment::Middle);

        assert_eq!(el.bbox, BBox::new(194.0, 5.0, 12.0, 12.0));
    }

    #[test]
    fn remove_and_clear_drop_elements() {
        let mut g = graphics();
        g.line(0.0, 0.0, 1.0, 1.0, 2.0, "#000");
        let circle = g.circle(0.0, 0.0, 4.0, 1.0, "#000", None);
        g.remove(circle.id);
        assert_eq!(g.document().len(), 1);

        g.clear();
        assert!(g.document().is_empty());
    }

    #[test]
    fn size_sets_the_view_box() {
        let mut g = graphics();
        g.size(400.0, 321.5);
        assert!(g.to_svg_string().contains(r#"viewBox="0 0 400 321.5""#));
    }
}
