//! Retained SVG element list shared by the SVG backends.

use crate::graphics::{Alignment, ElementId};
use std::fmt::Write as _;

/// Which primitive a sketched (hand-drawn) element stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchShape {
    Line,
    Rect,
    Circle,
}

impl SketchShape {
    fn class(self) -> &'static str {
        match self {
            Self::Line => "sketch-line",
            Self::Rect => "sketch-rect",
            Self::Circle => "sketch-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SketchPath {
    pub d: String,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub fill: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
        color: String,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke_width: f64,
        stroke: String,
        fill: Option<String>,
        radius: f64,
    },
    Circle {
        x: f64,
        y: f64,
        diameter: f64,
        stroke_width: f64,
        stroke: String,
        fill: Option<String>,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        color: String,
        font_family: String,
        alignment: Alignment,
    },
    Sketch {
        shape: SketchShape,
        paths: Vec<SketchPath>,
    },
}

impl SvgElement {
    fn write_markup(&self, out: &mut String) {
        match self {
            SvgElement::Line {
                x1,
                y1,
                x2,
                y2,
                stroke_width,
                color,
            } => {
                let _ = writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" />"#,
                    fmt(*x1),
                    fmt(*y1),
                    fmt(*x2),
                    fmt(*y2),
                    escape_attr(color),
                    fmt(*stroke_width)
                );
            }
            SvgElement::Rect {
                x,
                y,
                width,
                height,
                stroke_width,
                stroke,
                fill,
                radius,
            } => {
                let _ = writeln!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
                    fmt(*x),
                    fmt(*y),
                    fmt(*width),
                    fmt(*height),
                    fmt(*radius),
                    fmt(*radius),
                    escape_attr(fill.as_deref().unwrap_or("none")),
                    escape_attr(stroke),
                    fmt(*stroke_width)
                );
            }
            SvgElement::Circle {
                x,
                y,
                diameter,
                stroke_width,
                stroke,
                fill,
            } => {
                let r = diameter / 2.0;
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
                    fmt(x + r),
                    fmt(y + r),
                    fmt(r),
                    escape_attr(fill.as_deref().unwrap_or("none")),
                    escape_attr(stroke),
                    fmt(*stroke_width)
                );
            }
            SvgElement::Text {
                text,
                x,
                y,
                font_size,
                color,
                font_family,
                alignment,
            } => {
                let _ = writeln!(
                    out,
                    r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}" dominant-baseline="text-before-edge">{}</text>"#,
                    fmt(*x),
                    fmt(*y),
                    escape_attr(font_family),
                    fmt(*font_size),
                    escape_attr(color),
                    alignment.as_svg_anchor(),
                    escape_xml(text)
                );
            }
            SvgElement::Sketch { shape, paths } => {
                let _ = writeln!(out, r#"<g class="{}">"#, shape.class());
                for path in paths {
                    let _ = writeln!(
                        out,
                        r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
                        path.d,
                        escape_attr(path.fill.as_deref().unwrap_or("none")),
                        escape_attr(path.stroke.as_deref().unwrap_or("none")),
                        fmt(path.stroke_width)
                    );
                }
                out.push_str("</g>\n");
            }
        }
    }
}

/// Ordered element list with a view box.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    elements: Vec<(ElementId, SvgElement)>,
    next_id: u64,
    width: f64,
    height: f64,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn push(&mut self, element: SvgElement) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push((id, element));
        id
    }

    /// Returns whether an element was removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|(element_id, _)| *element_id != id);
        self.elements.len() != before
    }

    /// Drops all elements. Ids are never reused, so stale handles stay harmless.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.elements.iter().map(|(_, element)| element)
    }

    pub fn get(&self, id: ElementId) -> Option<&SvgElement> {
        self.elements
            .iter()
            .find(|(element_id, _)| *element_id == id)
            .map(|(_, element)| element)
    }

    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            &mut out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" preserveAspectRatio="xMidYMid meet" viewBox="0 0 {} {}">"#,
            fmt(self.width),
            fmt(self.height)
        );
        for (_, element) in &self.elements {
            element.write_markup(&mut out);
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Number formatting for SVG attributes: shortest round-trippable form, without `-0` and
/// without float noise around integers.
pub fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fmt_trims_noise() {
        assert_eq!(fmt(2.0), "2");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1.0000000001), "1");
        assert_eq!(fmt(0.25), "0.25");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn removed_elements_are_not_serialized() {
        let mut doc = SvgDocument::new(400.0, 0.0);
        let keep = doc.push(SvgElement::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
            stroke_width: 2.0,
            color: "#000".to_string(),
        });
        let drop = doc.push(SvgElement::Text {
            text: "C".to_string(),
            x: 200.0,
            y: 5.0,
            font_size: 48.0,
            color: "#000".to_string(),
            font_family: "Arial".to_string(),
            alignment: Alignment::Middle,
        });

        assert!(doc.remove(drop));
        assert!(!doc.remove(drop));
        assert!(doc.get(keep).is_some());
        doc.set_size(400.0, 120.5);

        assert_eq!(
            doc.to_svg_string(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" preserveAspectRatio="xMidYMid meet" viewBox="0 0 400 120.5">"#,
                "\n",
                r##"<line x1="0" y1="0" x2="10" y2="0" stroke="#000" stroke-width="2" />"##,
                "\n",
                "</svg>\n"
            )
        );
    }

    #[test]
    fn text_is_escaped() {
        let mut doc = SvgDocument::new(100.0, 100.0);
        doc.push(SvgElement::Text {
            text: "A<B & \"C\"".to_string(),
            x: 0.0,
            y: 0.0,
            font_size: 10.0,
            color: "#000".to_string(),
            font_family: r#"Arial, "Helvetica Neue""#.to_string(),
            alignment: Alignment::Start,
        });
        let svg = doc.to_svg_string();
        assert!(svg.contains("A&lt;B &amp; &quot;C&quot;</text>"));
        assert!(svg.contains(r#"font-family="Arial, &quot;Helvetica Neue&quot;""#));
    }

    #[test]
    fn circles_are_written_from_their_center() {
        let mut doc = SvgDocument::new(100.0, 100.0);
        doc.push(SvgElement::Circle {
            x: 10.0,
            y: 20.0,
            diameter: 8.0,
            stroke_width: 0.0,
            stroke: "#000".to_string(),
            fill: Some("#000".to_string()),
        });
        assert!(doc.to_svg_string().contains(r##"<circle cx="14" cy="24" r="4" fill="#000""##));
    }
}
