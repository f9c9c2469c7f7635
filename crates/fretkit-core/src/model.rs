//! Chord input types.
//!
//! The JSON form is compatible with Vexchords-style input: fingers are `[string, value]` or
//! `[string, value, label]` arrays where `value` is a fret number, `0` for an open string or
//! `"x"` for a silent one; barres are `{ "fromString", "toString", "fret" }` objects.

use serde::{Deserialize, Serialize};

/// Value for an open string (O).
pub const OPEN: FingerValue = FingerValue::Open;

/// Value for a silent string (X).
pub const SILENT: FingerValue = FingerValue::Silent;

/// What a finger does on its string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFingerValue", into = "RawFingerValue")]
pub enum FingerValue {
    /// The string is played without pressing a fret.
    Open,
    /// The string is not played.
    Silent,
    /// The string is pressed at this fret (relative to the diagram's first visible fret).
    Fret(u32),
}

impl FingerValue {
    /// Maps a fret number to a value; fret `0` is the open string.
    pub fn from_fret(fret: u32) -> Self {
        if fret == 0 { Self::Open } else { Self::Fret(fret) }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::Fret(0))
    }

    pub fn is_silent(self) -> bool {
        self == Self::Silent
    }

    /// Open and silent strings are drawn above the grid instead of on it.
    pub fn is_empty_string(self) -> bool {
        self.is_open() || self.is_silent()
    }

    /// The pressed fret, if any.
    pub fn fret(self) -> Option<u32> {
        match self {
            Self::Fret(fret) if fret > 0 => Some(fret),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawFingerValue {
    Number(u32),
    Marker(String),
}

impl TryFrom<RawFingerValue> for FingerValue {
    type Error = String;

    fn try_from(raw: RawFingerValue) -> Result<Self, Self::Error> {
        match raw {
            RawFingerValue::Number(fret) => Ok(Self::from_fret(fret)),
            RawFingerValue::Marker(marker) => match marker.trim().to_ascii_lowercase().as_str() {
                "x" => Ok(Self::Silent),
                "o" | "0" => Ok(Self::Open),
                other => other
                    .parse::<u32>()
                    .map(Self::from_fret)
                    .map_err(|_| format!("invalid finger value `{marker}`")),
            },
        }
    }
}

impl From<FingerValue> for RawFingerValue {
    fn from(value: FingerValue) -> Self {
        match value {
            FingerValue::Open => Self::Number(0),
            FingerValue::Silent => Self::Marker("x".to_string()),
            FingerValue::Fret(fret) => Self::Number(fret),
        }
    }
}

/// One finger (or empty-string marker) of a chord.
///
/// `string` is 1-based and counted the way the chord is presented to the player; the optional
/// label (usually the finger number) is kept for callers but not drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFinger", into = "RawFinger")]
pub struct Finger {
    pub string: u32,
    pub value: FingerValue,
    pub label: Option<String>,
}

impl Finger {
    pub fn new(string: u32, value: FingerValue) -> Self {
        Self {
            string,
            value,
            label: None,
        }
    }

    pub fn fret(string: u32, fret: u32) -> Self {
        Self::new(string, FingerValue::from_fret(fret))
    }

    pub fn open(string: u32) -> Self {
        Self::new(string, FingerValue::Open)
    }

    pub fn silent(string: u32) -> Self {
        Self::new(string, FingerValue::Silent)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawFinger {
    Labeled(u32, FingerValue, String),
    Plain(u32, FingerValue),
}

impl From<RawFinger> for Finger {
    fn from(raw: RawFinger) -> Self {
        match raw {
            RawFinger::Labeled(string, value, label) => Self {
                string,
                value,
                label: Some(label),
            },
            RawFinger::Plain(string, value) => Self::new(string, value),
        }
    }
}

impl From<Finger> for RawFinger {
    fn from(finger: Finger) -> Self {
        match finger.label {
            Some(label) => Self::Labeled(finger.string, finger.value, label),
            None => Self::Plain(finger.string, finger.value),
        }
    }
}

/// A single finger pressing several strings at the same fret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    pub from_string: u32,
    pub to_string: u32,
    pub fret: u32,
}

impl Barre {
    pub fn new(from_string: u32, to_string: u32, fret: u32) -> Self {
        Self {
            from_string,
            to_string,
            fret,
        }
    }

    /// Number of string gaps covered by the barre, independent of direction.
    pub fn span(&self) -> u32 {
        self.from_string.abs_diff(self.to_string)
    }
}

/// The complete note layout of one diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    #[serde(default)]
    pub fingers: Vec<Finger>,
    #[serde(default)]
    pub barres: Vec<Barre>,
}

impl Chord {
    pub fn new(fingers: Vec<Finger>, barres: Vec<Barre>) -> Self {
        Self { fingers, barres }
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fingers drawn above the grid (open or silent strings).
    pub fn empty_strings(&self) -> impl Iterator<Item = &Finger> {
        self.fingers.iter().filter(|f| f.value.is_empty_string())
    }

    /// Fingers that press a fret, paired with that fret.
    pub fn pressed(&self) -> impl Iterator<Item = (&Finger, u32)> {
        self.fingers
            .iter()
            .filter_map(|f| f.value.fret().map(|fret| (f, fret)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_json_accepts_numbers_and_markers() {
        let chord = Chord::from_json(
            r#"{"fingers": [[1, 0], [2, 2, "1"], [6, "x"], [5, "O"]], "barres": []}"#,
        )
        .expect("chord");

        assert_eq!(chord.fingers[0], Finger::open(1));
        assert_eq!(chord.fingers[1], Finger::fret(2, 2).with_label("1"));
        assert_eq!(chord.fingers[2], Finger::silent(6));
        assert_eq!(chord.fingers[3], Finger::open(5));
    }

    #[test]
    fn finger_json_rejects_unknown_marker() {
        let err = Chord::from_json(r#"{"fingers": [[1, "y"]]}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn chord_json_defaults_missing_lists() {
        let chord = Chord::from_json(r#"{"barres": [{"fromString": 6, "toString": 1, "fret": 1}]}"#)
            .expect("chord");
        assert!(chord.fingers.is_empty());
        assert_eq!(chord.barres, vec![Barre::new(6, 1, 1)]);
        assert_eq!(chord.barres[0].span(), 5);
    }

    #[test]
    fn finger_serializes_back_to_tuple_form() {
        let json = serde_json::to_string(&vec![
            Finger::silent(6),
            Finger::fret(3, 2).with_label("2"),
        ])
        .expect("json");
        assert_eq!(json, r#"[[6,"x"],[3,2,"2"]]"#);
    }

    #[test]
    fn fret_zero_is_open() {
        assert!(FingerValue::Fret(0).is_open());
        assert_eq!(FingerValue::Fret(0).fret(), None);
        assert_eq!(FingerValue::from_fret(0), OPEN);
        assert!(SILENT.is_empty_string());
    }

    #[test]
    fn chord_splits_empty_strings_and_pressed_fingers() {
        let chord = Chord::new(
            vec![Finger::open(1), Finger::fret(2, 1), Finger::silent(6)],
            Vec::new(),
        );
        assert_eq!(chord.empty_strings().count(), 2);
        assert_eq!(chord.pressed().map(|(_, fret)| fret).collect::<Vec<_>>(), vec![1]);
    }
}
