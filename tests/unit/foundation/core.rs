use super::*;

#[test]
fn mockup_canvas_is_fixed_portrait() {
    assert_eq!(Canvas::MOCKUP.width, 300);
    assert_eq!(Canvas::MOCKUP.height, 600);
    assert_eq!(Canvas::MOCKUP.rgba_len(), 300 * 600 * 4);
}

#[test]
fn pixel_rect_rejects_empty() {
    assert!(PixelRect::new(0, 0, 0, 10).is_err());
    assert!(PixelRect::new(0, 0, 10, 0).is_err());
    assert!(PixelRect::new(5, 5, 1, 1).is_ok());
}

#[test]
fn pixel_rect_contains_is_half_open() {
    let r = PixelRect::new(15, 60, 270, 480).unwrap();
    assert!(r.contains(15, 60));
    assert!(r.contains(284, 539));
    assert!(!r.contains(285, 100));
    assert!(!r.contains(100, 540));
    assert!(!r.contains(14, 100));
    assert!(r.fits_in(Canvas::MOCKUP));
    assert!(!PixelRect::new(250, 0, 60, 60).unwrap().fits_in(Canvas::MOCKUP));
}

#[test]
fn pixel_rect_to_rect_matches_edges() {
    let r = PixelRect::new(10, 40, 280, 520).unwrap().to_rect();
    assert_eq!(r.x0, 10.0);
    assert_eq!(r.y0, 40.0);
    assert_eq!(r.x1, 290.0);
    assert_eq!(r.y1, 560.0);
}

#[test]
fn premul_from_straight_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(
        Rgba8Premul::from_straight_array([10, 20, 30, 0]),
        Rgba8Premul::transparent()
    );
}
