//! A backend that only records what was drawn. Used to assert on layout decisions without
//! parsing SVG.

use crate::graphics::{Alignment, BBox, ElementId, Graphics, GraphicsElement};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Line {
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        stroke_width: f64,
        color: String,
    },
    Rect {
        id: ElementId,
        bbox: BBox,
        stroke_width: f64,
        stroke_color: String,
        fill: Option<String>,
        radius: Option<f64>,
    },
    Circle {
        id: ElementId,
        bbox: BBox,
        stroke_width: f64,
        stroke_color: String,
        fill: Option<String>,
    },
    Text {
        id: ElementId,
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        color: String,
        font_family: String,
        alignment: Alignment,
        bbox: BBox,
    },
    Remove(ElementId),
    Size {
        width: f64,
        height: f64,
    },
    Clear,
}

#[derive(Clone)]
pub struct RecordingGraphics {
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    calls: Vec<DrawCall>,
    next_id: u64,
}

impl Default for RecordingGraphics {
    fn default() -> Self {
        Self::new(Arc::new(DeterministicTextMeasurer::default()))
    }
}

impl std::fmt::Debug for RecordingGraphics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingGraphics")
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

impl RecordingGraphics {
    pub fn new(measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        Self {
            measurer,
            calls: Vec::new(),
            next_id: 0,
        }
    }

    /// Every call in order, including removals and clears.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls made since the last `clear()` whose elements were not removed afterwards.
    pub fn visible(&self) -> Vec<&DrawCall> {
        let start = self
            .calls
            .iter()
            .rposition(|call| matches!(call, DrawCall::Clear))
            .map_or(0, |i| i + 1);
        let live = &self.calls[start..];
        let removed: Vec<ElementId> = live
            .iter()
            .filter_map(|call| match call {
                DrawCall::Remove(id) => Some(*id),
                _ => None,
            })
            .collect();

        live.iter()
            .filter(|call| match call {
                DrawCall::Rect { id, .. }
                | DrawCall::Circle { id, .. }
                | DrawCall::Text { id, .. } => !removed.contains(id),
                DrawCall::Remove(_) | DrawCall::Clear => false,
                DrawCall::Line { .. } | DrawCall::Size { .. } => true,
            })
            .collect()
    }

    pub fn visible_lines(&self) -> Vec<&DrawCall> {
        self.visible()
            .into_iter()
            .filter(|call| matches!(call, DrawCall::Line { .. }))
            .collect()
    }

    pub fn visible_circles(&self) -> Vec<&DrawCall> {
        self.visible()
            .into_iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
            .collect()
    }

    pub fn visible_rects(&self) -> Vec<&DrawCall> {
        self.visible()
            .into_iter()
            .filter(|call| matches!(call, DrawCall::Rect { .. }))
            .collect()
    }

    pub fn visible_texts(&self) -> Vec<&DrawCall> {
        self.visible()
            .into_iter()
            .filter(|call| matches!(call, DrawCall::Text { .. }))
            .collect()
    }

    /// The visible text element with exactly this content.
    pub fn find_text(&self, content: &str) -> Option<&DrawCall> {
        self.visible()
            .into_iter()
            .find(|call| matches!(call, DrawCall::Text { text, .. } if text == content))
    }

    /// The most recent `size()` call.
    pub fn last_size(&self) -> Option<(f64, f64)> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::Size { width, height } => Some((*width, *height)),
            _ => None,
        })
    }

    fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Graphics for RecordingGraphics {
    fn line(
        &mut self,
        from_x: f64,
        from_y: f64,
        to_x: f64,
        to_y: f64,
        stroke_width: f64,
        color: &str,
    ) {
        self.calls.push(DrawCall::Line {
            from_x,
            from_y,
            to_x,
            to_y,
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
        let id = self.next_id();
        let bbox = BBox::new(x, y, width, height);
        self.calls.push(DrawCall::Rect {
            id,
            bbox,
            stroke_width,
            stroke_color: stroke_color.to_string(),
            fill: fill.map(str::to_string),
            radius,
        });
        GraphicsElement { id, bbox }
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
        let id = self.next_id();
        let bbox = BBox::new(x, y, diameter, diameter);
        self.calls.push(DrawCall::Circle {
            id,
            bbox,
            stroke_width,
            stroke_color: stroke_color.to_string(),
            fill: fill.map(str::to_string),
        });
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
        let id = self.next_id();
        let metrics = self
            .measurer
            .measure(text, &TextStyle::new(font_family, font_size));
        let bbox = BBox::for_text(metrics, x, y, alignment);
        self.calls.push(DrawCall::Text {
            id,
            text: text.to_string(),
            x,
            y,
            font_size,
            color: color.to_string(),
            font_family: font_family.to_string(),
            alignment,
            bbox,
        });
        GraphicsElement { id, bbox }
    }

    fn remove(&mut self, id: ElementId) {
        self.calls.push(DrawCall::Remove(id));
    }

    fn size(&mut self, width: f64, height: f64) {
        self.calls.push(DrawCall::Size { width, height });
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }
}
