//! Default frame and icon art compiled into the crate.

const BUILTIN: &[(&str, &[u8])] = &[
    (
        "mockups/iphone-frame.svg",
        include_bytes!("../../assets/mockups/iphone-frame.svg"),
    ),
    (
        "mockups/android-frame.svg",
        include_bytes!("../../assets/mockups/android-frame.svg"),
    ),
    ("icons/app1.svg", include_bytes!("../../assets/icons/app1.svg")),
    ("icons/app2.svg", include_bytes!("../../assets/icons/app2.svg")),
    ("icons/app3.svg", include_bytes!("../../assets/icons/app3.svg")),
    ("icons/app4.svg", include_bytes!("../../assets/icons/app4.svg")),
];

/// Embedded bytes for a normalized static asset path.
pub(crate) fn builtin_bytes(norm_path: &str) -> Option<&'static [u8]> {
    BUILTIN
        .iter()
        .find(|(path, _)| *path == norm_path)
        .map(|(_, bytes)| *bytes)
}

/// Paths of every embedded asset.
pub(crate) fn builtin_paths() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(path, _)| *path)
}
