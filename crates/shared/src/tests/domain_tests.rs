use super::*;

#[test]
fn parses_long_and_short_hex_colors() {
    assert_eq!("#666666".parse::<Color>().expect("hex"), Color::DEFAULT_SELECTED);
    assert_eq!("#FFFFFF".parse::<Color>().expect("hex"), Color::WHITE);
    assert_eq!("#f00".parse::<Color>().expect("short"), Color::rgb(0xff, 0, 0));
    assert_eq!(Color::rgb(0xab, 0x01, 0xff).to_hex(), "#ab01ff");

    for bad in ["666666", "#12345", "#gggggg", "", "#ééé"] {
        assert!(
            matches!(bad.parse::<Color>(), Err(DraftError::InvalidColor(_))),
            "{bad}"
        );
    }
}

#[test]
fn cell_colors_read_null_and_transparent_as_unset() {
    let cells: Vec<CellColor> =
        serde_json::from_str(r##"[null, "transparent", "", "#000000"]"##).expect("cells");
    assert_eq!(
        cells,
        vec![
            CellColor::Unset,
            CellColor::Unset,
            CellColor::Unset,
            CellColor::Set(Color::BLACK)
        ]
    );
    assert_eq!(
        serde_json::to_string(&cells).expect("json"),
        r##"[null,null,null,"#000000"]"##
    );
}

#[test]
fn toggled_clears_only_the_selected_color() {
    let red = Color::rgb(0xff, 0, 0);
    assert_eq!(CellColor::Unset.toggled(red), CellColor::Set(red));
    assert_eq!(CellColor::Set(red).toggled(red), CellColor::Unset);
    assert_eq!(CellColor::Set(Color::BLACK).toggled(red), CellColor::Set(red));
}

#[test]
fn settings_serialize_with_camel_case_field_names() {
    let json = serde_json::to_value(Settings::default()).expect("json");
    assert_eq!(
        json,
        serde_json::json!({
            "treadleCount": 4,
            "shaftCount": 4,
            "chartWidth": 40,
            "chartHeight": 40,
            "tieupLocation": "right-up",
            "mode": "to",
            "threadAction": "up",
            "selectedColor": "#666666"
        })
    );

    let parsed: Settings = serde_json::from_value(json).expect("settings");
    assert_eq!(parsed, Settings::default());
}

#[test]
fn out_of_range_settings_fail_validation_but_clamp() {
    let settings = Settings {
        shaft_count: 0,
        chart_width: 101,
        ..Settings::default()
    };
    assert!(matches!(settings.validate(), Err(DraftError::InvalidFormat(_))));

    let clamped = settings.clamped();
    assert_eq!(clamped.shaft_count, 1);
    assert_eq!(clamped.chart_width, 100);
    assert!(clamped.validate().is_ok());
    assert!(settings.dimensions_differ(&clamped));
}

#[test]
fn tieup_locations_parse_from_their_names() {
    for location in TieupLocation::ALL {
        assert_eq!(location.as_str().parse::<TieupLocation>().ok(), Some(location));
    }
    assert!("upside-down".parse::<TieupLocation>().is_err());
}
