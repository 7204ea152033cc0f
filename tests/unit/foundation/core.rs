use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(
        Canvas::new(1240, 1754).unwrap(),
        Canvas {
            width: 1240,
            height: 1754
        }
    );
}

#[test]
fn round_px_rounds_halves_up() {
    assert_eq!(round_px(2.5), 3);
    assert_eq!(round_px(2.49), 2);
    assert_eq!(round_px(-2.5), -2);
    assert_eq!(round_px(0.0), 0);
}
