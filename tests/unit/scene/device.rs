use super::*;
use crate::foundation::core::Canvas;

#[test]
fn screen_rects_match_builtin_profiles() {
    assert_eq!(
        DeviceProfile::TypeA.screen_rect(),
        PixelRect::new(15, 60, 270, 480).unwrap()
    );
    assert_eq!(
        DeviceProfile::TypeB.screen_rect(),
        PixelRect::new(10, 40, 280, 520).unwrap()
    );
    for d in DeviceProfile::ALL {
        assert!(d.screen_rect().fits_in(Canvas::MOCKUP));
    }
}

#[test]
fn frame_paths_follow_device_name() {
    assert_eq!(DeviceProfile::TypeA.frame_path(), "mockups/iphone-frame.svg");
    assert_eq!(
        DeviceProfile::TypeB.frame_asset(),
        AssetRef::Static("mockups/android-frame.svg".to_string())
    );
}

#[test]
fn parse_accepts_names_and_type_aliases() {
    assert_eq!("iphone".parse::<DeviceProfile>().unwrap(), DeviceProfile::TypeA);
    assert_eq!(" Android ".parse::<DeviceProfile>().unwrap(), DeviceProfile::TypeB);
    assert_eq!("type-b".parse::<DeviceProfile>().unwrap(), DeviceProfile::TypeB);
    assert!("pixel".parse::<DeviceProfile>().is_err());
}

#[test]
fn serde_accepts_both_spellings() {
    let a: DeviceProfile = serde_json::from_str("\"type-a\"").unwrap();
    let b: DeviceProfile = serde_json::from_str("\"android\"").unwrap();
    assert_eq!(a, DeviceProfile::TypeA);
    assert_eq!(b, DeviceProfile::TypeB);
    assert_eq!(serde_json::to_string(&a).unwrap(), "\"type-a\"");
}
