use fastchart::data_types::Rgba;
use fastchart::theme::{parse_hex, ChartTheme};

#[test]
fn test_parse_hex_colors() {
    assert_eq!(parse_hex("#ff0000").unwrap(), Rgba::opaque(255, 0, 0));
    assert_eq!(parse_hex("00ff7f").unwrap(), Rgba::opaque(0, 255, 127));
    assert_eq!(parse_hex("#11223344").unwrap(), Rgba::new(0x11, 0x22, 0x33, 0x44));
}

#[test]
fn test_parse_hex_rejects_garbage() {
    assert!(parse_hex("#ff00").is_err());
    assert!(parse_hex("#zzzzzz").is_err());
    assert!(parse_hex("").is_err());
}

#[test]
fn test_theme_json_round_trip_and_errors() {
    let theme = ChartTheme::default();
    let json = theme.to_json().unwrap();
    assert_eq!(ChartTheme::from_json(&json).unwrap(), theme);

    assert!(ChartTheme::from_json("{not json").is_err());
}

#[test]
fn test_palette_cycles() {
    let theme = ChartTheme::default();
    let n = theme.series_palette.len();
    assert_eq!(theme.series_color(0), theme.series_color(n));
    assert_eq!(theme.series_color(1), theme.series_palette[1]);
}
