//! Hand-drawn SVG backend.
//!
//! Shapes are turned into sketchy path data with `roughr` (a RoughJS port). Every shape gets its
//! own seed derived from the backend seed and the number of shapes drawn since the last
//! `clear()`, so redrawing the same diagram yields the same strokes.

use crate::graphics::{Alignment, BBox, ElementId, Graphics, GraphicsElement};
use crate::svg::{SketchPath, SketchShape, SvgDocument, SvgElement, fmt};
use crate::text::{TextMeasurer, TextStyle};
use fretkit_core::DIAGRAM_WIDTH;
use roughr::Point2D;
use roughr::core::{FillStyle, OpSet, OpType, Options, OptionsBuilder};
use std::f64::consts::TAU;
use std::fmt::Write as _;
use std::sync::Arc;

pub const DEFAULT_SEED: u64 = 1;

const CIRCLE_FILL_SEGMENTS: usize = 36;
const CORNER_SEGMENTS: usize = 6;
// Cubic Bezier handle length for a quarter circle.
const KAPPA: f64 = 0.552_284_749_8;
const ROUGHNESS: f32 = 1.0;

#[derive(Clone)]
pub struct RoughGraphics {
    document: SvgDocument,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    seed: u64,
    shapes_drawn: u64,
}

impl RoughGraphics {
    /// A seed of `0` lets `roughr` pick random values on every draw.
    pub fn new(measurer: Arc<dyn TextMeasurer + Send + Sync>, seed: u64) -> Self {
        Self {
            document: SvgDocument::new(DIAGRAM_WIDTH, 0.0),
            measurer,
            seed,
            shapes_drawn: 0,
        }
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_svg_string()
    }

    fn next_options(&mut self, stroke_width: f64) -> Option<Options> {
        let seed = if self.seed == 0 {
            0
        } else {
            self.seed.wrapping_add(self.shapes_drawn).max(1)
        };
        self.shapes_drawn += 1;

        OptionsBuilder::default()
            .seed(seed)
            .roughness(ROUGHNESS)
            .stroke_width(stroke_width as f32)
            .fill_style(FillStyle::Solid)
            .disable_multi_stroke(false)
            .disable_multi_stroke_fill(false)
            .build()
            .ok()
    }

    fn push_sketch(
        &mut self,
        shape: SketchShape,
        exact: SvgElement,
        paths: Option<Vec<SketchPath>>,
    ) -> ElementId {
        match paths {
            Some(paths) => self.document.push(SvgElement::Sketch { shape, paths }),
            None => {
                tracing::debug!(?shape, "rough options rejected; drawing exact shape");
                self.document.push(exact)
            }
        }
    }
}

impl std::fmt::Debug for RoughGraphics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoughGraphics")
            .field("document", &self.document)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

fn is_painted(color: Option<&str>) -> bool {
    color.is_some_and(|c| {
        let c = c.trim();
        !c.is_empty() && c != "none" && c != "transparent"
    })
}

fn ops_to_svg_path_d(opset: &OpSet<f64>) -> String {
    let mut out = String::new();
    for op in &opset.ops {
        match op.op {
            OpType::Move => {
                let _ = write!(&mut out, "M{} {} ", fmt(op.data[0]), fmt(op.data[1]));
            }
            OpType::BCurveTo => {
                let _ = write!(
                    &mut out,
                    "C{} {}, {} {}, {} {} ",
                    fmt(op.data[0]),
                    fmt(op.data[1]),
                    fmt(op.data[2]),
                    fmt(op.data[3]),
                    fmt(op.data[4]),
                    fmt(op.data[5])
                );
            }
            OpType::LineTo => {
                let _ = write!(&mut out, "L{} {} ", fmt(op.data[0]), fmt(op.data[1]));
            }
        }
    }
    out.trim_end().to_string()
}

/// Outline of a rectangle with rounded corners as SVG path data (cubic corners).
fn rounded_rect_path_d(x: f64, y: f64, w: f64, h: f64, radius: f64) -> String {
    let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return format!(
            "M{} {} L{} {} L{} {} L{} {} Z",
            fmt(x),
            fmt(y),
            fmt(x + w),
            fmt(y),
            fmt(x + w),
            fmt(y + h),
            fmt(x),
            fmt(y + h)
        );
    }

    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);
    let mut d = String::new();
    let _ = write!(&mut d, "M{} {} ", fmt(x + r), fmt(y));
    let _ = write!(&mut d, "L{} {} ", fmt(right - r), fmt(y));
    let _ = write!(
        &mut d,
        "C{} {}, {} {}, {} {} ",
        fmt(right - r + k),
        fmt(y),
        fmt(right),
        fmt(y + r - k),
        fmt(right),
        fmt(y + r)
    );
    let _ = write!(&mut d, "L{} {} ", fmt(right), fmt(bottom - r));
    let _ = write!(
        &mut d,
        "C{} {}, {} {}, {} {} ",
        fmt(right),
        fmt(bottom - r + k),
        fmt(right - r + k),
        fmt(bottom),
        fmt(right - r),
        fmt(bottom)
    );
    let _ = write!(&mut d, "L{} {} ", fmt(x + r), fmt(bottom));
    let _ = write!(
        &mut d,
        "C{} {}, {} {}, {} {} ",
        fmt(x + r - k),
        fmt(bottom),
        fmt(x),
        fmt(bottom - r + k),
        fmt(x),
        fmt(bottom - r)
    );
    let _ = write!(&mut d, "L{} {} ", fmt(x), fmt(y + r));
    let _ = write!(
        &mut d,
        "C{} {}, {} {}, {} {} Z",
        fmt(x),
        fmt(y + r - k),
        fmt(x + r - k),
        fmt(y),
        fmt(x + r),
        fmt(y)
    );
    d
}

/// Polygon approximation of a rounded rectangle, used as the fill area.
fn rounded_rect_points<U>(
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radius: f64,
) -> Vec<Point2D<f64, U>> {
    let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return vec![
            Point2D::new(x, y),
            Point2D::new(x + w, y),
            Point2D::new(x + w, y + h),
            Point2D::new(x, y + h),
        ];
    }

    // Corner centers, clockwise from top-right, each with its start angle.
    let corners = [
        (x + w - r, y + r, -TAU / 4.0),
        (x + w - r, y + h - r, 0.0),
        (x + r, y + h - r, TAU / 4.0),
        (x + r, y + r, TAU / 2.0),
    ];
    let mut points = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS + 1));
    for (cx, cy, start) in corners {
        for step in 0..=CORNER_SEGMENTS {
            let angle = start + (TAU / 4.0) * step as f64 / CORNER_SEGMENTS as f64;
            points.push(Point2D::new(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    points
}

fn circle_points<U>(cx: f64, cy: f64, radius: f64) -> Vec<Point2D<f64, U>> {
    (0..CIRCLE_FILL_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f64 / CIRCLE_FILL_SEGMENTS as f64;
            Point2D::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

impl Graphics for RoughGraphics {
    fn line(
        &mut self,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        stroke_width: f64,
        color: &str,
    ) {
        let exact = SvgElement::Line {
            x1: from_x,
            y1: from_y,
            x2: to_x,
            y2: to_y,
            stroke_width,
            color: color.to_string(),
        };
        let paths = self.next_options(stroke_width).map(|mut opts| {
            let d = format!(
                "M{} {} L{} {}",
                fmt(from_x),
                fmt(from_y),
                fmt(to_x),
                fmt(to_y)
            );
            let opset = roughr::renderer::svg_path::<f64>(d, &mut opts);
            vec![SketchPath {
                d: ops_to_svg_path_d(&opset),
                stroke: Some(color.to_string()),
                stroke_width,
                fill: None,
            }]
        });
        self.push_sketch(SketchShape::Line, exact, paths);
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
        let radius = radius.unwrap_or(0.0);
        let exact = SvgElement::Rect {
            x,
            y,
            width,
            height,
            stroke_width,
            stroke: stroke_color.to_string(),
            fill: fill.map(str::to_string),
            radius,
        };
        let paths = self.next_options(stroke_width).map(|mut opts| {
            let outline = roughr::renderer::svg_path::<f64>(
                rounded_rect_path_d(x, y, width, height, radius),
                &mut opts,
            );
            let mut paths = Vec::with_capacity(2);
            if is_painted(fill) {
                let polygon = vec![rounded_rect_points(x, y, width, height, radius)];
                let fill_opset = roughr::renderer::solid_fill_polygon(&polygon, &mut opts);
                paths.push(SketchPath {
                    d: ops_to_svg_path_d(&fill_opset),
                    stroke: None,
                    stroke_width: 0.0,
                    fill: fill.map(str::to_string),
                });
            }
            if stroke_width > 0.0 && is_painted(Some(stroke_color)) {
                paths.push(SketchPath {
                    d: ops_to_svg_path_d(&outline),
                    stroke: Some(stroke_color.to_string()),
                    stroke_width,
                    fill: None,
                });
            }
            paths
        });
        let id = self.push_sketch(SketchShape::Rect, exact, paths);
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
        let exact = SvgElement::Circle {
            x,
            y,
            diameter,
            stroke_width,
            stroke: stroke_color.to_string(),
            fill: fill.map(str::to_string),
        };
        let bbox = BBox::new(x, y, diameter, diameter);

        // Zero-size circles only pin the canvas extent; there is nothing to sketch.
        if diameter <= 0.0 {
            let id = self.document.push(exact);
            return GraphicsElement { id, bbox };
        }

        let radius = diameter / 2.0;
        let (cx, cy) = (x + radius, y + radius);
        let paths = self.next_options(stroke_width).map(|mut opts| {
            let outline = roughr::renderer::ellipse::<f64>(cx, cy, diameter, diameter, &mut opts);
            let mut paths = Vec::with_capacity(2);
            if is_painted(fill) {
                let polygon = vec![circle_points(cx, cy, radius)];
                let fill_opset = roughr::renderer::solid_fill_polygon(&polygon, &mut opts);
                paths.push(SketchPath {
                    d: ops_to_svg_path_d(&fill_opset),
                    stroke: None,
                    stroke_width: 0.0,
                    fill: fill.map(str::to_string),
                });
            }
            if stroke_width > 0.0 && is_painted(Some(stroke_color)) {
                paths.push(SketchPath {
                    d: ops_to_svg_path_d(&outline),
                    stroke: Some(stroke_color.to_string()),
                    stroke_width,
                    fill: None,
                });
            }
            paths
        });
        let id = self.push_sketch(SketchShape::Circle, exact, paths);
        GraphicsElement { id, bbox }
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
        self.shapes_drawn = 0;
    }
}
