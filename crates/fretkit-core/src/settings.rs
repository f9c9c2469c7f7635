//! Chord diagram settings.
//!
//! [`ChordSettings`] is what callers configure: every field is optional and later
//! configurations override earlier ones key by key. Defaults are *not* folded in at merge time;
//! [`ChordSettings::resolve`] reads each field as "explicit value, else default" against a
//! [`ResolvedChordSettings`] table, so swapping that table affects every key that was never set.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the diagram in user units. Heights are derived from it.
pub const DIAGRAM_WIDTH: f64 = 400.0;

pub const DEFAULT_FONT_FAMILY: &str = r#"Arial, "Helvetica Neue", Helvetica, sans-serif"#;

pub const DEFAULT_COLOR: &str = "#000";

/// Visual style of the diagram, selecting the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordStyle {
    #[default]
    Normal,
    Handdrawn,
}

impl ChordStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Handdrawn => "handdrawn",
        }
    }
}

impl fmt::Display for ChordStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChordStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "handdrawn" => Ok(Self::Handdrawn),
            other => Err(Error::UnknownStyle {
                style: other.to_string(),
            }),
        }
    }
}

/// Side of the grid where the starting fret label (e.g. "3fr") is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FretLabelPosition {
    Left,
    #[default]
    Right,
}

/// Partial chord diagram configuration.
///
/// Relative sizes (`nut_size`, `fret_size`, `empty_string_indicator_size`,
/// `barre_chord_radius`, `side_padding`) are fractions of another measure; see the field docs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChordSettings {
    /// Style name: `normal` or `handdrawn`. Kept as a string so an unknown name only fails when
    /// a backend is actually needed.
    pub style: Option<String>,
    pub strings: Option<u32>,
    pub frets: Option<u32>,
    /// The starting fret (first fret is 1).
    pub position: Option<u32>,
    /// Labels under the strings, lowest string first.
    pub tuning: Option<Vec<String>>,
    pub fret_label_position: Option<FretLabelPosition>,
    pub fret_label_font_size: Option<f64>,
    pub tunings_font_size: Option<f64>,
    /// Nut diameter relative to the string spacing.
    pub nut_size: Option<f64>,
    pub nut_color: Option<String>,
    /// Fret height relative to the string spacing.
    pub fret_size: Option<f64>,
    /// Space between the outer strings and the canvas edge, relative to the width.
    pub side_padding: Option<f64>,
    pub font_family: Option<String>,
    pub title: Option<String>,
    /// Initial title font size; oversized titles are scaled down until they fit.
    pub title_font_size: Option<f64>,
    pub title_bottom_margin: Option<f64>,
    /// Global color, overridden by the per-element colors.
    pub color: Option<String>,
    pub title_color: Option<String>,
    pub string_color: Option<String>,
    pub fret_label_color: Option<String>,
    pub tunings_color: Option<String>,
    pub fret_color: Option<String>,
    /// Barre corner radius relative to the nut size (1 is fully round, 0 is square).
    pub barre_chord_radius: Option<f64>,
    /// Size of the X and O markers relative to the string spacing.
    pub empty_string_indicator_size: Option<f64>,
    pub stroke_width: Option<f64>,
    /// Thickness of the top fret, only used when the position is 1.
    pub top_fret_width: Option<f64>,
}

impl ChordSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses camelCase JSON. Counts below their minimum are reported as invalid settings
    /// rather than as type errors, so `{"frets": -1}` reads the same as any other bad value.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        check_minimum(&value, "strings", 2.0, "Must have at least 2 strings")?;
        check_minimum(&value, "frets", 0.0, "Cannot have less than 0 frets")?;
        check_minimum(&value, "position", 1.0, "Position cannot be less than 1")?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_style(mut self, style: ChordStyle) -> Self {
        self.style = Some(style.as_str().to_string());
        self
    }

    pub fn with_strings(mut self, strings: u32) -> Self {
        self.strings = Some(strings);
        self
    }

    pub fn with_frets(mut self, frets: u32) -> Self {
        self.frets = Some(frets);
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_tuning<I, S>(mut self, tuning: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tuning = Some(tuning.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_fret_label_position(mut self, position: FretLabelPosition) -> Self {
        self.fret_label_position = Some(position);
        self
    }

    /// Rejects out-of-domain values. Only keys that are present are checked.
    pub fn validate(&self) -> Result<()> {
        if let Some(strings) = self.strings {
            if strings <= 1 {
                return Err(Error::invalid_settings("Must have at least 2 strings"));
            }
        }

        if let Some(position) = self.position {
            if position < 1 {
                return Err(Error::invalid_settings("Position cannot be less than 1"));
            }
        }

        check_non_negative("Fret size", self.fret_size)?;
        check_non_negative("Nut size", self.nut_size)?;
        check_non_negative("Stroke width", self.stroke_width)?;

        Ok(())
    }

    /// Shallow merge: every key present in `incoming` replaces the stored one.
    pub fn merge(&mut self, incoming: ChordSettings) {
        macro_rules! overlay {
            ($dst:ident, $src:ident; $($field:ident),* $(,)?) => {
                $(
                    if $src.$field.is_some() {
                        $dst.$field = $src.$field;
                    }
                )*
            };
        }

        overlay!(
            self,
            incoming;
            style,
            strings,
            frets,
            position,
            tuning,
            fret_label_position,
            fret_label_font_size,
            tunings_font_size,
            nut_size,
            nut_color,
            fret_size,
            side_padding,
            font_family,
            title,
            title_font_size,
            title_bottom_margin,
            color,
            title_color,
            string_color,
            fret_label_color,
            tunings_color,
            fret_color,
            barre_chord_radius,
            empty_string_indicator_size,
            stroke_width,
            top_fret_width,
        );
    }

    /// Reads every field as "explicit value, else default".
    ///
    /// Per-element colors resolve as explicit element color, else explicit `color`, else the
    /// defaults' `color`. The per-element colors of `defaults` are never read.
    pub fn resolve(&self, defaults: &ResolvedChordSettings) -> ResolvedChordSettings {
        let color = self.color.as_ref().unwrap_or(&defaults.color);
        let element_color = |explicit: &Option<String>| explicit.as_ref().unwrap_or(color).clone();

        ResolvedChordSettings {
            width: defaults.width,
            style: self.style.clone().unwrap_or_else(|| defaults.style.clone()),
            strings: self.strings.unwrap_or(defaults.strings),
            frets: self.frets.unwrap_or(defaults.frets),
            position: self.position.unwrap_or(defaults.position),
            tuning: self
                .tuning
                .clone()
                .unwrap_or_else(|| defaults.tuning.clone()),
            fret_label_position: self
                .fret_label_position
                .unwrap_or(defaults.fret_label_position),
            fret_label_font_size: self
                .fret_label_font_size
                .unwrap_or(defaults.fret_label_font_size),
            tunings_font_size: self.tunings_font_size.unwrap_or(defaults.tunings_font_size),
            nut_size: self.nut_size.unwrap_or(defaults.nut_size),
            nut_color: element_color(&self.nut_color),
            fret_size: self.fret_size.unwrap_or(defaults.fret_size),
            side_padding: self.side_padding.unwrap_or(defaults.side_padding),
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| defaults.font_family.clone()),
            title: self.title.clone().unwrap_or_else(|| defaults.title.clone()),
            title_font_size: self.title_font_size.unwrap_or(defaults.title_font_size),
            title_bottom_margin: self
                .title_bottom_margin
                .unwrap_or(defaults.title_bottom_margin),
            color: color.clone(),
            title_color: element_color(&self.title_color),
            string_color: element_color(&self.string_color),
            fret_label_color: element_color(&self.fret_label_color),
            tunings_color: element_color(&self.tunings_color),
            fret_color: element_color(&self.fret_color),
            barre_chord_radius: self.barre_chord_radius.unwrap_or(defaults.barre_chord_radius),
            empty_string_indicator_size: self
                .empty_string_indicator_size
                .unwrap_or(defaults.empty_string_indicator_size),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            top_fret_width: self.top_fret_width.unwrap_or(defaults.top_fret_width),
        }
    }
}

fn check_minimum(value: &serde_json::Value, key: &str, min: f64, message: &str) -> Result<()> {
    match value.get(key).and_then(serde_json::Value::as_f64) {
        Some(n) if n < min => Err(Error::invalid_settings(message)),
        _ => Ok(()),
    }
}

fn check_non_negative(name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(Error::invalid_settings(format!(
            "{name} must be a finite number"
        ))),
        Some(v) if v < 0.0 => Err(Error::invalid_settings(format!(
            "{name} cannot be smaller than 0"
        ))),
        _ => Ok(()),
    }
}

/// Fully resolved settings; `Default` is the defaults table.
///
/// Used as a defaults table, only `color` feeds the per-element colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChordSettings {
    pub width: f64,
    pub style: String,
    pub strings: u32,
    pub frets: u32,
    pub position: u32,
    pub tuning: Vec<String>,
    pub fret_label_position: FretLabelPosition,
    pub fret_label_font_size: f64,
    pub tunings_font_size: f64,
    pub nut_size: f64,
    pub nut_color: String,
    pub fret_size: f64,
    pub side_padding: f64,
    pub font_family: String,
    pub title: String,
    pub title_font_size: f64,
    pub title_bottom_margin: f64,
    pub color: String,
    pub title_color: String,
    pub string_color: String,
    pub fret_label_color: String,
    pub tunings_color: String,
    pub fret_color: String,
    pub barre_chord_radius: f64,
    pub empty_string_indicator_size: f64,
    pub stroke_width: f64,
    pub top_fret_width: f64,
}

impl Default for ResolvedChordSettings {
    fn default() -> Self {
        Self {
            width: DIAGRAM_WIDTH,
            style: ChordStyle::Normal.as_str().to_string(),
            strings: 6,
            frets: 5,
            position: 1,
            tuning: Vec::new(),
            fret_label_position: FretLabelPosition::Right,
            fret_label_font_size: 38.0,
            tunings_font_size: 28.0,
            nut_size: 0.65,
            nut_color: DEFAULT_COLOR.to_string(),
            fret_size: 1.5,
            side_padding: 0.2,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            title: String::new(),
            title_font_size: 48.0,
            title_bottom_margin: 0.0,
            color: DEFAULT_COLOR.to_string(),
            title_color: DEFAULT_COLOR.to_string(),
            string_color: DEFAULT_COLOR.to_string(),
            fret_label_color: DEFAULT_COLOR.to_string(),
            tunings_color: DEFAULT_COLOR.to_string(),
            fret_color: DEFAULT_COLOR.to_string(),
            barre_chord_radius: 0.25,
            empty_string_indicator_size: 0.6,
            stroke_width: 2.0,
            top_fret_width: 10.0,
        }
    }
}

impl ResolvedChordSettings {
    /// Parses the style name. Unknown names fail here, not at configuration time.
    pub fn chord_style(&self) -> Result<ChordStyle> {
        self.style.parse()
    }
}
