//! Fretboard geometry: where strings and frets land on the canvas.
//!
//! Positions are computed arithmetically for any index so that chord data referencing strings
//! or frets outside the configured counts yields off-grid coordinates instead of a panic.

use crate::settings::ResolvedChordSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretboardGeometry {
    pub width: f64,
    pub side_padding: f64,
    pub strings: u32,
    pub frets: u32,
    pub fret_size: f64,
}

impl FretboardGeometry {
    pub fn new(settings: &ResolvedChordSettings) -> Self {
        Self {
            width: settings.width,
            side_padding: settings.side_padding,
            strings: settings.strings,
            frets: settings.frets,
            fret_size: settings.fret_size,
        }
    }

    /// X of the first (array index 0) string.
    pub fn start_x(&self) -> f64 {
        self.width * self.side_padding
    }

    /// X of the last string.
    pub fn end_x(&self) -> f64 {
        self.string_x(i64::from(self.strings) - 1)
    }

    pub fn string_spacing(&self) -> f64 {
        let start_x = self.start_x();
        let end_x = self.width - start_x;
        (end_x - start_x) / f64::from(self.strings.saturating_sub(1).max(1))
    }

    pub fn string_x(&self, array_index: i64) -> f64 {
        self.start_x() + self.string_spacing() * array_index as f64
    }

    pub fn string_x_positions(&self) -> Vec<f64> {
        (0..i64::from(self.strings))
            .map(|i| self.string_x(i))
            .collect()
    }

    pub fn fret_spacing(&self) -> f64 {
        self.string_spacing() * self.fret_size
    }

    /// Y of fret line `fret` (1-based) below a grid starting at `start_y`.
    pub fn fret_line_y(&self, start_y: f64, fret: i64) -> f64 {
        start_y + self.fret_spacing() * fret as f64
    }

    pub fn fret_lines_y(&self, start_y: f64) -> Vec<f64> {
        (1..=i64::from(self.frets))
            .map(|fret| self.fret_line_y(start_y, fret))
            .collect()
    }

    pub fn grid_height(&self) -> f64 {
        self.fret_spacing() * f64::from(self.frets)
    }

    /// Converts a 1-based string number (as presented to the player) to an array index.
    pub fn to_array_index(&self, string: u32) -> i64 {
        (i64::from(string) - i64::from(self.strings)).abs()
    }
}
