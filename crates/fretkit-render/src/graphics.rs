//! The drawing contract between the chord layout engine and a backend.

use crate::text::TextMetrics;

/// Horizontal anchor of a text element relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Start,
    Middle,
    End,
}

impl Alignment {
    /// Value of the SVG `text-anchor` attribute.
    pub fn as_svg_anchor(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }

    /// Left edge of a box of `width` anchored at `x`.
    pub fn box_left(self, x: f64, width: f64) -> f64 {
        match self {
            Self::Start => x,
            Self::Middle => x - width / 2.0,
            Self::End => x - width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of a text anchored at `(x, y)`, where `y` is the top edge.
    pub fn for_text(metrics: TextMetrics, x: f64, y: f64, alignment: Alignment) -> Self {
        Self::new(
            alignment.box_left(x, metrics.width),
            y,
            metrics.width,
            metrics.height,
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Handle of a drawn element, valid until the element is removed or the backend is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// A drawn element together with its rendered bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsElement {
    pub id: ElementId,
    pub bbox: BBox,
}

/// A vector graphics backend.
///
/// Text boxes returned by [`Graphics::text`] must come from real measurement of the given font
/// and size: the layout engine uses them to detect overflow and to stack content vertically.
pub trait Graphics {
    fn line(
        &mut self,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        stroke_width: f64,
        color: &str,
    );

    #[allow(clippy::too_many_arguments)]
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
    ) -> GraphicsElement;

    /// `(x, y)` is the top-left corner of the circle's bounding square.
    fn circle(
        &mut self,
        x: f64,
        y: f64,
        diameter: f64,
        stroke_width: f64,
        stroke_color: &str,
        fill: Option<&str>,
    ) -> GraphicsElement;

    /// `(x, y)` is the anchor point; `y` is the top of the text box.
    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_size: f64,
        color: &str,
        font_family: &str,
        alignment: Alignment,
    ) -> GraphicsElement;

    /// Retracts a previously drawn element. Unknown ids are ignored.
    fn remove(&mut self, id: ElementId);

    /// Sets the overall canvas extent.
    fn size(&mut self, width: f64, height: f64);

    /// Removes everything drawn so far.
    fn clear(&mut self);
}
