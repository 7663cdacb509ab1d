use std::fmt;
use std::str::FromStr;

use crate::assets::loader::AssetRef;
use crate::foundation::core::PixelRect;
use crate::foundation::error::{MockupError, MockupResult};

/// Built-in device silhouettes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceProfile {
    /// Rounded phone with a home button (`iphone`).
    #[default]
    #[serde(alias = "iphone")]
    TypeA,
    /// Edge-to-edge phone (`android`).
    #[serde(alias = "android")]
    TypeB,
}

impl DeviceProfile {
    /// Every built-in profile, in presentation order.
    pub const ALL: [DeviceProfile; 2] = [DeviceProfile::TypeA, DeviceProfile::TypeB];

    /// Stable short name used in asset paths and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::TypeA => "iphone",
            Self::TypeB => "android",
        }
    }

    /// Region of the surface where wallpaper content is visible.
    pub fn screen_rect(self) -> PixelRect {
        match self {
            Self::TypeA => PixelRect {
                x: 15,
                y: 60,
                width: 270,
                height: 480,
            },
            Self::TypeB => PixelRect {
                x: 10,
                y: 40,
                width: 280,
                height: 520,
            },
        }
    }

    /// Static path of the device frame art.
    pub fn frame_path(self) -> String {
        format!("mockups/{}-frame.svg", self.name())
    }

    /// Frame art as an asset reference.
    pub fn frame_asset(self) -> AssetRef {
        AssetRef::Static(self.frame_path())
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceProfile {
    type Err = MockupError;

    fn from_str(s: &str) -> MockupResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iphone" | "type-a" | "a" => Ok(Self::TypeA),
            "android" | "type-b" | "b" => Ok(Self::TypeB),
            other => Err(MockupError::validation(format!(
                "unknown device profile '{other}' (expected iphone or android)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/device.rs"]
mod tests;
