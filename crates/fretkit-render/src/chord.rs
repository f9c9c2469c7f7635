//! Chord diagram layout.
//!
//! [`draw_chord`] lays the diagram out top to bottom. Each stage receives the vertical cursor
//! left by the previous one and returns where the next stage starts:
//!
//! title → empty-string indicators → top fret → (position label) → grid → tunings
//!
//! All positions derive from the canvas width, so the output height depends only on settings
//! and on the measured text boxes.

use crate::graphics::{Alignment, Graphics};
use fretkit_core::{Chord, FretLabelPosition, FretboardGeometry, ResolvedChordSettings};
use serde::{Deserialize, Serialize};

/// Title boxes whose left edge is past this are considered overflowing.
const TITLE_OVERFLOW_EPSILON: f64 = -0.0001;
/// Smallest title size, relative to the configured one, the fit loop will try.
const MIN_TITLE_SCALE: f64 = 0.01;
/// Smallest position label multiplier before the label is dropped.
const MIN_LABEL_MULTIPLIER: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramSize {
    pub width: f64,
    pub height: f64,
}

/// Draws `chord` onto `graphics` and returns the size of the resulting diagram.
///
/// The backend is cleared first, so repeated calls with the same input produce the same output.
/// Strings and frets outside the configured counts are drawn where the arithmetic puts them.
pub fn draw_chord(
    graphics: &mut dyn Graphics,
    chord: &Chord,
    settings: &ResolvedChordSettings,
) -> DiagramSize {
    let layout = ChordLayout {
        settings,
        geometry: FretboardGeometry::new(settings),
    };
    layout.check_ranges(chord);

    graphics.clear();
    layout.draw_top_edges(graphics);

    let y = layout.draw_title(graphics);
    let y = layout.draw_empty_string_indicators(graphics, chord, y);
    let y = layout.draw_top_fret(graphics, y);
    layout.draw_position(graphics, y);
    let y = layout.draw_grid(graphics, chord, y);
    let y = layout.draw_tunings(graphics, y);

    // Trailing padding relative to the fret spacing.
    let height = y + layout.geometry.fret_spacing() / 10.0;
    graphics.size(settings.width, height);

    DiagramSize {
        width: settings.width,
        height,
    }
}

struct ChordLayout<'a> {
    settings: &'a ResolvedChordSettings,
    geometry: FretboardGeometry,
}

impl ChordLayout<'_> {
    fn first_string_x(&self) -> f64 {
        self.geometry.start_x()
    }

    fn last_string_x(&self) -> f64 {
        self.geometry.end_x()
    }

    fn nut_size(&self) -> f64 {
        self.settings.nut_size * self.geometry.string_spacing()
    }

    fn check_ranges(&self, chord: &Chord) {
        let strings = self.settings.strings;
        let frets = self.settings.frets;
        for finger in &chord.fingers {
            let fret_out_of_range = finger.value.fret().is_some_and(|fret| fret > frets);
            if finger.string == 0 || finger.string > strings || fret_out_of_range {
                tracing::debug!(
                    string = finger.string,
                    value = ?finger.value,
                    strings,
                    frets,
                    "finger outside the configured fretboard"
                );
            }
        }
        for barre in &chord.barres {
            let string_out_of_range = [barre.from_string, barre.to_string]
                .iter()
                .any(|&s| s == 0 || s > strings);
            if string_out_of_range || barre.fret == 0 || barre.fret > frets {
                tracing::debug!(?barre, strings, frets, "barre outside the configured fretboard");
            }
        }
    }

    /// Invisible markers pinning the canvas to the full width, even when the content is narrower.
    fn draw_top_edges(&self, graphics: &mut dyn Graphics) {
        let width = self.settings.width;
        graphics.circle(width, 0.0, 0.0, 0.0, "transparent", Some("none"));
        graphics.circle(0.0, 0.0, 0.0, 0.0, "transparent", Some("none"));
    }

    fn draw_title(&self, graphics: &mut dyn Graphics) -> f64 {
        let s = self.settings;
        if s.title.is_empty() {
            return s.title_bottom_margin;
        }

        let width = s.width;
        let min_size = s.title_font_size * MIN_TITLE_SCALE;
        let mut size = s.title_font_size;
        loop {
            let title = graphics.text(
                &s.title,
                width / 2.0,
                5.0,
                size,
                &s.title_color,
                &s.font_family,
                Alignment::Middle,
            );
            if title.bbox.x >= TITLE_OVERFLOW_EPSILON || title.bbox.width <= 0.0 {
                return title.bbox.bottom() + s.title_bottom_margin;
            }

            let next = size * (width / title.bbox.width);
            if next < min_size {
                tracing::warn!(
                    title = %s.title,
                    font_size = size,
                    "title does not fit the diagram width; keeping the smallest attempt"
                );
                return title.bbox.bottom() + s.title_bottom_margin;
            }

            tracing::debug!(from = size, to = next, "shrinking title to fit");
            graphics.remove(title.id);
            size = next;
        }
    }

    fn draw_empty_string_indicators(
        &self,
        graphics: &mut dyn Graphics,
        chord: &Chord,
        y: f64,
    ) -> f64 {
        let s = self.settings;
        let size = s.empty_string_indicator_size * self.geometry.string_spacing();
        // Space above and below the indicators.
        let padding = size / 3.0;

        let mut has_empty = false;
        for finger in chord.empty_strings() {
            has_empty = true;
            let x = self.geometry.string_x(self.geometry.to_array_index(finger.string));

            if finger.value.is_open() {
                graphics.circle(
                    x - size / 2.0,
                    y + padding,
                    size,
                    s.stroke_width,
                    &s.color,
                    None,
                );
            } else {
                let start_x = x - size / 2.0;
                let end_x = start_x + size;
                let start_y = y + padding;
                let end_y = start_y + size;

                graphics.line(start_x, start_y, end_x, end_y, s.stroke_width, &s.color);
                graphics.line(start_x, end_y, end_x, start_y, s.stroke_width, &s.color);
            }
        }

        if has_empty {
            y + size + 2.0 * padding
        } else {
            y + padding
        }
    }

    fn draw_top_fret(&self, graphics: &mut dyn Graphics, y: f64) -> f64 {
        let s = self.settings;
        let thickness = if s.position > 1 {
            s.stroke_width
        } else {
            s.top_fret_width
        };
        let start_x = self.first_string_x() - s.stroke_width / 2.0;
        let end_x = self.last_string_x() + s.stroke_width / 2.0;

        graphics.line(
            start_x,
            y + thickness / 2.0,
            end_x,
            y + thickness / 2.0,
            thickness,
            &s.fret_color,
        );

        y + thickness
    }

    fn draw_position(&self, graphics: &mut dyn Graphics, y: f64) {
        let s = self.settings;
        if s.position <= 1 {
            return;
        }

        let text = format!("{}fr", s.position);
        // At least half a nut plus some room, so the first nut never covers the label.
        let padding = (self.geometry.string_spacing() / 5.0).max(self.nut_size() / 2.0 + 5.0);

        let (x, alignment, shrink) = match s.fret_label_position {
            FretLabelPosition::Right => (self.last_string_x() + padding, Alignment::Start, 0.9),
            FretLabelPosition::Left => (self.first_string_x() - padding, Alignment::End, 0.8),
        };

        let mut multiplier = 1.0;
        while multiplier >= MIN_LABEL_MULTIPLIER {
            let label = graphics.text(
                &text,
                x,
                y,
                s.fret_label_font_size * multiplier,
                &s.fret_label_color,
                &s.font_family,
                alignment,
            );
            let overflows = match s.fret_label_position {
                FretLabelPosition::Right => label.bbox.right() > s.width,
                FretLabelPosition::Left => label.bbox.x < 0.0,
            };
            if !overflows {
                return;
            }

            tracing::debug!(label = %text, multiplier, "position label overflows; shrinking");
            graphics.remove(label.id);
            multiplier *= shrink;
        }

        tracing::warn!(
            label = %text,
            "not enough space to draw the starting fret label"
        );
    }

    fn draw_grid(&self, graphics: &mut dyn Graphics, chord: &Chord, y: f64) -> f64 {
        let s = self.settings;
        let g = &self.geometry;
        let string_spacing = g.string_spacing();
        let fret_spacing = g.fret_spacing();
        let height = g.grid_height();
        let nut_size = self.nut_size();
        let start_x = self.first_string_x();
        let end_x = self.last_string_x();

        for fret_y in g.fret_lines_y(y) {
            graphics.line(start_x, fret_y, end_x, fret_y, s.stroke_width, &s.fret_color);
        }

        for string_x in g.string_x_positions() {
            graphics.line(
                string_x,
                y,
                string_x,
                y + height,
                s.stroke_width,
                &s.string_color,
            );
        }

        // Nuts sit between fret `n - 1` and fret `n`.
        for (finger, fret) in chord.pressed() {
            let index = g.to_array_index(finger.string);
            graphics.circle(
                start_x - nut_size / 2.0 + index as f64 * string_spacing,
                y - fret_spacing / 2.0 - nut_size / 2.0 + f64::from(fret) * fret_spacing,
                nut_size,
                0.0,
                &s.nut_color,
                Some(&s.nut_color),
            );
        }

        for barre in &chord.barres {
            let from = g.to_array_index(barre.from_string);
            let to = g.to_array_index(barre.to_string);
            graphics.rect(
                g.string_x(from.min(to)) - string_spacing / 4.0,
                g.fret_line_y(y, i64::from(barre.fret)) - fret_spacing / 2.0 - nut_size / 2.0,
                f64::from(barre.span()) * string_spacing + string_spacing / 2.0,
                nut_size,
                0.0,
                &s.nut_color,
                Some(&s.nut_color),
                Some(nut_size * s.barre_chord_radius),
            );
        }

        y + height
    }

    fn draw_tunings(&self, graphics: &mut dyn Graphics, y: f64) -> f64 {
        let s = self.settings;
        let padding = self.geometry.fret_spacing() / 5.0;

        let mut tallest: Option<f64> = None;
        for (i, tuning) in s.tuning.iter().enumerate().take(s.strings as usize) {
            let label = graphics.text(
                tuning,
                self.geometry.string_x(i as i64),
                y + padding,
                s.tunings_font_size,
                &s.tunings_color,
                &s.font_family,
                Alignment::Middle,
            );
            if !tuning.is_empty() {
                let height = label.bbox.height;
                tallest = Some(tallest.map_or(height, |h| h.max(height)));
            }
        }

        match tallest {
            Some(height) => y + height + padding * 2.0,
            None => y,
        }
    }
}
