use approx::assert_relative_eq;
use fretkit::{
    ChordDiagram, ChordSettings, Error, Finger, FingerValue, FretLabelPosition, RenderOptions,
    ResolvedChordSettings,
};
use pretty_assertions::assert_eq;

const OPEN_C: &str = r#"{ "fingers": [[1, 0], [2, 2], [3, 2], [4, 1], [5, 0], [6, "x"]] }"#;

fn open_c_diagram() -> ChordDiagram {
    let mut diagram = ChordDiagram::new();
    diagram.chord_json(OPEN_C).expect("chord json");
    diagram
}

#[test]
fn repeated_draws_are_identical() {
    let mut diagram = open_c_diagram();
    diagram
        .configure_json(r#"{ "title": "C", "tuning": ["E", "A", "D", "G", "B", "E"] }"#)
        .expect("settings json");

    let first_size = diagram.draw().expect("draw");
    let first = diagram.svg().expect("svg");
    let second_size = diagram.draw().expect("draw");
    let second = diagram.svg().expect("svg");

    assert_eq!(first_size, second_size);
    assert_eq!(first, second);
}

#[test]
fn settings_merge_key_by_key() {
    let mut diagram = ChordDiagram::new();
    diagram
        .configure_json(r#"{ "strings": 4, "title": "G7", "color": "red" }"#)
        .expect("settings json")
        .configure_json(r#"{ "title": "G", "fretColor": "blue" }"#)
        .expect("settings json");

    let resolved = diagram.resolved_settings();
    assert_eq!(resolved.strings, 4);
    assert_eq!(resolved.title, "G");
    assert_eq!(resolved.fret_color, "blue");
    // per-element colors fall back to the configured global color
    assert_eq!(resolved.nut_color, "red");
    assert_eq!(resolved.frets, 5);
}

#[test]
fn unconfigured_keys_follow_new_defaults() {
    let mut diagram = open_c_diagram();
    diagram
        .configure(ChordSettings::new().with_frets(3))
        .expect("configure");
    let before = diagram.draw().expect("draw");

    diagram.set_defaults(ResolvedChordSettings {
        frets: 8,
        fret_size: 1.0,
        ..Default::default()
    });
    let after = diagram.draw().expect("draw");

    // frets stay at 3 (configured), fret spacing drops from 72 to 48
    assert_relative_eq!(
        before.height - after.height,
        3.0 * 24.0 + 7.2 - 4.8,
        epsilon = 1e-9
    );
}

#[test]
fn default_color_reaches_every_element() {
    let mut diagram = ChordDiagram::new();
    diagram.set_defaults(ResolvedChordSettings {
        color: "red".to_string(),
        ..Default::default()
    });

    let resolved = diagram.resolved_settings();
    for color in [
        &resolved.nut_color,
        &resolved.fret_color,
        &resolved.string_color,
        &resolved.tunings_color,
        &resolved.fret_label_color,
        &resolved.title_color,
    ] {
        assert_eq!(color, "red");
    }

    diagram
        .configure_json(r#"{ "fretColor": "blue" }"#)
        .expect("settings json");
    let resolved = diagram.resolved_settings();
    assert_eq!(resolved.fret_color, "blue");
    assert_eq!(resolved.nut_color, "red");
}

#[test]
fn chord_json_is_kept_as_the_current_chord() {
    let diagram = open_c_diagram();
    let chord = diagram.current_chord();

    assert_eq!(chord.fingers.len(), 6);
    assert!(chord.barres.is_empty());
    assert_eq!(chord.fingers[1], Finger::fret(2, 2));
    assert_eq!(chord.fingers[5].value, FingerValue::Silent);
}

#[test]
fn fret_label_can_move_to_the_left() {
    let mut diagram = open_c_diagram();
    diagram
        .configure(
            ChordSettings::new()
                .with_position(5)
                .with_fret_label_position(FretLabelPosition::Left),
        )
        .expect("configure");
    assert_eq!(
        diagram.resolved_settings().fret_label_position,
        FretLabelPosition::Left
    );

    diagram.draw().expect("draw");
    let svg = diagram.svg().expect("svg");
    assert!(svg.contains(r#"text-anchor="end" dominant-baseline="text-before-edge">5fr</text>"#));
}

#[test]
fn explicit_zero_is_a_value() {
    let mut diagram = ChordDiagram::new();
    diagram
        .configure_json(r#"{ "strokeWidth": 0, "topFretWidth": 0 }"#)
        .expect("settings json");
    let resolved = diagram.resolved_settings();
    assert_eq!(resolved.stroke_width, 0.0);
    assert_eq!(resolved.top_fret_width, 0.0);
}

#[test]
fn invalid_json_settings_are_reported() {
    let mut diagram = ChordDiagram::new();
    let err = diagram.configure_json(r#"{ "strings": "six" }"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)));

    let err = diagram
        .configure_json(r#"{ "nutSize": -0.5 }"#)
        .unwrap_err();
    assert!(err.to_string().contains("Nut size"));

    let err = diagram.configure_json(r#"{ "frets": -1 }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidSettings { .. }));
    assert!(err.to_string().contains("less than 0 frets"));
    assert_eq!(diagram.settings(), &ChordSettings::default());
}

#[test]
fn handdrawn_output_is_seeded() {
    let render = |seed: u64| {
        let mut diagram = ChordDiagram::with_options(RenderOptions {
            hand_drawn_seed: seed,
            ..Default::default()
        });
        diagram.chord_json(OPEN_C).expect("chord json");
        diagram
            .configure_json(r#"{ "style": "handdrawn" }"#)
            .expect("settings json");
        diagram.draw().expect("draw");
        diagram.svg().expect("svg")
    };

    assert_eq!(render(3), render(3));
    assert!(render(3).contains("sketch-circle"));
}
