use proptest::prelude::*;

use super::*;

#[test]
fn wide_image_is_trimmed_horizontally() {
    let c = resolve_crop(1000.0, 500.0, 270.0, 480.0).unwrap();
    assert_eq!(c.sw, 281.25);
    assert_eq!(c.sx, 359.375);
    assert_eq!(c.sy, 0.0);
    assert_eq!(c.sh, 500.0);
}

#[test]
fn tall_image_is_trimmed_vertically() {
    let c = resolve_crop(500.0, 2000.0, 280.0, 520.0).unwrap();
    assert_eq!(c.sx, 0.0);
    assert_eq!(c.sw, 500.0);
    let expected_sh = 500.0 / (280.0 / 520.0);
    assert!((c.sh - expected_sh).abs() < 1e-9);
    assert!((c.sy - (2000.0 - expected_sh) / 2.0).abs() < 1e-9);
}

#[test]
fn equal_ratio_selects_full_image() {
    let c = resolve_crop(540.0, 960.0, 270.0, 480.0).unwrap();
    assert!(c.is_full(540.0, 960.0));
}

#[test]
fn crop_window_rect_spans_window() {
    let r = resolve_crop(1000.0, 500.0, 270.0, 480.0).unwrap().to_rect();
    assert_eq!(r.x0, 359.375);
    assert_eq!(r.x1, 359.375 + 281.25);
    assert_eq!(r.y1, 500.0);
}

#[test]
fn non_positive_or_non_finite_inputs_are_rejected() {
    assert!(resolve_crop(0.0, 10.0, 10.0, 10.0).is_err());
    assert!(resolve_crop(10.0, -1.0, 10.0, 10.0).is_err());
    assert!(resolve_crop(10.0, 10.0, f64::NAN, 10.0).is_err());
    assert!(resolve_crop(10.0, 10.0, 10.0, f64::INFINITY).is_err());
}

proptest! {
    #[test]
    fn crop_stays_in_bounds_and_matches_box_ratio(
        img_w in 1u32..8192,
        img_h in 1u32..8192,
        box_w in 1u32..4096,
        box_h in 1u32..4096,
    ) {
        let (iw, ih, bw, bh) = (
            f64::from(img_w),
            f64::from(img_h),
            f64::from(box_w),
            f64::from(box_h),
        );
        let c = resolve_crop(iw, ih, bw, bh).unwrap();
        let eps = 1e-9 * iw.max(ih);

        prop_assert!(c.sx >= 0.0);
        prop_assert!(c.sy >= 0.0);
        prop_assert!(c.sw > 0.0 && c.sh > 0.0);
        prop_assert!(c.sx + c.sw <= iw + eps);
        prop_assert!(c.sy + c.sh <= ih + eps);

        let got = c.sw / c.sh;
        let want = bw / bh;
        prop_assert!(((got - want) / want).abs() < 1e-9, "ratio {got} vs {want}");
    }

    #[test]
    fn crop_is_centered(
        img_w in 1u32..8192,
        img_h in 1u32..8192,
        box_w in 1u32..4096,
        box_h in 1u32..4096,
    ) {
        let (iw, ih) = (f64::from(img_w), f64::from(img_h));
        let c = resolve_crop(iw, ih, f64::from(box_w), f64::from(box_h)).unwrap();
        let left = c.sx;
        let right = iw - (c.sx + c.sw);
        let top = c.sy;
        let bottom = ih - (c.sy + c.sh);
        prop_assert!((left - right).abs() < 1e-6 * iw);
        prop_assert!((top - bottom).abs() < 1e-6 * ih);
    }
}
