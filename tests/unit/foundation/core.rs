use super::*;
use serde_json::json;

#[test]
fn rgb_parses_hex_and_array() {
    let c: Rgb8 = serde_json::from_value(json!("#FAFFCE")).unwrap();
    assert_eq!(c, Rgb8::new(0xfa, 0xff, 0xce));

    let c: Rgb8 = serde_json::from_value(json!([255, 150, 150])).unwrap();
    assert_eq!(c, Rgb8::new(255, 150, 150));
}

#[test]
fn rgb_rejects_short_hex() {
    assert!(serde_json::from_value::<Rgb8>(json!("#fff")).is_err());
    assert!(serde_json::from_value::<Rgb8>(json!("#gg0000")).is_err());
}

#[test]
fn rgb_serializes_as_lowercase_hex() {
    let v = serde_json::to_value(Rgb8::new(100, 150, 180)).unwrap();
    assert_eq!(v, json!("#6496b4"));
}

#[test]
fn with_alpha_keeps_channels() {
    let c = Rgb8::new(1, 2, 3).with_alpha(4);
    assert_eq!((c.r, c.g, c.b, c.a), (1, 2, 3, 4));
}
