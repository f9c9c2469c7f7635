use fretkit_core::{ChordSettings, FretboardGeometry, ResolvedChordSettings};
use proptest::prelude::*;

fn geometry(strings: u32, frets: u32, fret_size: f64, side_padding: f64) -> FretboardGeometry {
    let settings = ChordSettings {
        strings: Some(strings),
        frets: Some(frets),
        fret_size: Some(fret_size),
        side_padding: Some(side_padding),
        ..Default::default()
    };
    settings.validate().expect("valid settings");
    FretboardGeometry::new(&settings.resolve(&ResolvedChordSettings::default()))
}

proptest! {
    #[test]
    fn string_positions_are_evenly_spaced_and_centered(
        strings in 2u32..24,
        side_padding in 0.0f64..0.45,
    ) {
        let geometry = geometry(strings, 5, 1.5, side_padding);
        let xs = geometry.string_x_positions();
        let spacing = geometry.string_spacing();

        prop_assert_eq!(xs.len(), strings as usize);
        for pair in xs.windows(2) {
            prop_assert!(pair[1] > pair[0]);
            prop_assert!((pair[1] - pair[0] - spacing).abs() <= 1e-9);
        }

        let first = xs[0];
        let last = xs[xs.len() - 1];
        prop_assert!((first - geometry.width * side_padding).abs() <= 1e-9);
        prop_assert!(((first + last) / 2.0 - geometry.width / 2.0).abs() <= 1e-9);
    }

    #[test]
    fn grid_height_is_frets_times_fret_spacing(
        strings in 2u32..13,
        frets in 0u32..30,
        fret_size in 0.0f64..4.0,
    ) {
        let geometry = geometry(strings, frets, fret_size, 0.2);
        let expected = f64::from(frets) * geometry.string_spacing() * fret_size;

        prop_assert!((geometry.grid_height() - expected).abs() <= 1e-9);
        prop_assert_eq!(geometry.fret_lines_y(0.0).len(), frets as usize);
    }

    #[test]
    fn array_index_mirrors_string_number(strings in 2u32..13, string in 1u32..13) {
        prop_assume!(string <= strings);
        let geometry = geometry(strings, 5, 1.5, 0.2);
        let index = geometry.to_array_index(string);

        prop_assert_eq!(index, i64::from(strings - string));
        prop_assert_eq!(geometry.to_array_index(strings - index as u32), index);
    }
}
