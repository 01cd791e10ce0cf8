use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: HexColor = serde_json::from_value(json!("#0369a1")).unwrap();
    assert_eq!(c, HexColor::rgb(0x03, 0x69, 0xA1));

    let c: HexColor = "0000ff80".parse().unwrap();
    assert_eq!(c.rgba().b, 255);
    assert_eq!(c.rgba().a, 128);
}

#[test]
fn rejects_malformed() {
    assert!("#12345".parse::<HexColor>().is_err());
    assert!("#zzzzzz".parse::<HexColor>().is_err());
    assert!("#ééé".parse::<HexColor>().is_err());
    assert!(serde_json::from_value::<HexColor>(json!(12)).is_err());
}

#[test]
fn display_is_uppercase_and_drops_opaque_alpha() {
    assert_eq!(HexColor::rgb(255, 255, 255).to_string(), "#FFFFFF");
    let c: HexColor = "#11223344".parse().unwrap();
    assert_eq!(c.to_string(), "#11223344");
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#11223344"));
}
