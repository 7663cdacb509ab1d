use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MockupError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        MockupError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        MockupError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        MockupError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MockupError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MockupError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_asset_load_reports_as_load_failure() {
    assert!(MockupError::asset_load("frame").is_asset_load());
    assert!(!MockupError::encoding("not ready").is_asset_load());
    assert!(!MockupError::invalid_input("text/plain").is_asset_load());
}
