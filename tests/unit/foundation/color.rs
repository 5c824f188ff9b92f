use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    let c: Color = "#0f0".parse().unwrap();
    assert_eq!(c.to_rgba8(), Rgba8::opaque(0, 255, 0));

    let c: Color = "#38BDF8".parse().unwrap();
    assert_eq!(c.to_rgba8(), Rgba8::opaque(0x38, 0xbd, 0xf8));
}

#[test]
fn parses_rgb_functions_and_names() {
    let c: Color = "rgb(255, 128, 0)".parse().unwrap();
    assert_eq!(c.to_rgba8(), Rgba8::opaque(255, 128, 0));

    let c: Color = "rgba(0, 0, 0, 0.5)".parse().unwrap();
    assert_eq!(c.to_rgba8().a, 128);

    let c: Color = " Black ".parse().unwrap();
    assert_eq!(c, Color::BLACK);

    let c: Color = "transparent".parse().unwrap();
    assert_eq!(c.to_rgba8().a, 0);
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn rejects_malformed_colors() {
    assert!("#12345".parse::<Color>().is_err());
    assert!("#zzzzzz".parse::<Color>().is_err());
    assert!("rgb(1, 2)".parse::<Color>().is_err());
    assert!("rgb(1, 2, 3".parse::<Color>().is_err());
    assert!("chartreuse-ish".parse::<Color>().is_err());
    assert!(serde_json::from_value::<Color>(json!([1.0, 2.0])).is_err());
}
