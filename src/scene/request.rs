use chrono::NaiveTime;

use crate::scene::device::DeviceProfile;
use crate::scene::icons::{IconDescriptor, default_icons};

/// Optional UI chrome drawn over the wallpaper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayToggles {
    /// Draw the app icon grid.
    pub show_icons: bool,
    /// Draw the clock.
    pub show_clock: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            show_icons: true,
            show_clock: true,
        }
    }
}

impl OverlayToggles {
    /// No overlays at all.
    pub fn none() -> Self {
        Self {
            show_icons: false,
            show_clock: false,
        }
    }
}

/// Immutable input snapshot for one generation.
///
/// Everything the compositor reads is captured here when the generation starts, so later changes
/// to UI state cannot leak into a draw already in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Device silhouette.
    pub device: DeviceProfile,
    /// Overlay toggles.
    pub toggles: OverlayToggles,
    /// Wall-clock time shown by the clock overlay.
    pub time: NaiveTime,
    /// Icon grid in draw order.
    pub icons: Vec<IconDescriptor>,
}

impl GenerationRequest {
    /// Snapshot for `device` with default toggles, the built-in icon grid and the current local
    /// time.
    pub fn new(device: DeviceProfile) -> Self {
        Self {
            device,
            toggles: OverlayToggles::default(),
            time: chrono::Local::now().time(),
            icons: default_icons(),
        }
    }

    /// Replace the toggles.
    pub fn with_toggles(mut self, toggles: OverlayToggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// Freeze the clock at `time`.
    pub fn at_time(mut self, time: NaiveTime) -> Self {
        self.time = time;
        self
    }

    /// Replace the icon grid.
    pub fn with_icons(mut self, icons: Vec<IconDescriptor>) -> Self {
        self.icons = icons;
        self
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new(DeviceProfile::default())
    }
}
