use super::*;

#[test]
fn canvas_validation() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(1080, 1080).unwrap();
    assert_eq!(c, Canvas::default());
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 1080.0, 1080.0));
    assert_eq!(c.rgba_len(), 1080 * 1080 * 4);
}

#[test]
fn premultiply_rounds_and_keeps_opaque_channels() {
    assert_eq!(Rgba8::opaque(3, 105, 161).premultiplied(), [3, 105, 161, 255]);
    let half = Rgba8 {
        r: 255,
        g: 0,
        b: 128,
        a: 128,
    };
    assert_eq!(half.premultiplied(), [128, 0, 64, 128]);
}
