use crate::assets::loader::AssetRef;
use crate::foundation::core::PixelRect;

/// Edge length of every icon sprite on the surface.
pub const ICON_SIZE: u32 = 60;

const DEFAULT_GRID: [(&str, u32, u32); 4] = [
    ("app1", 30, 100),
    ("app2", 110, 100),
    ("app3", 190, 100),
    ("app4", 30, 180),
];

/// One app icon in the overlay grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconDescriptor {
    /// Stable identifier, reported back when the icon fails to load.
    pub id: String,
    /// Sprite art.
    pub sprite: AssetRef,
    /// Top-left placement on the surface.
    pub x: u32,
    /// Top-left placement on the surface.
    pub y: u32,
}

impl IconDescriptor {
    /// Icon at `(x, y)` using the static sprite `icons/<id>.svg`.
    pub fn new(id: impl Into<String>, x: u32, y: u32) -> Self {
        let id = id.into();
        let sprite = AssetRef::Static(format!("icons/{id}.svg"));
        Self { id, sprite, x, y }
    }

    /// Destination rectangle (always `ICON_SIZE` square).
    pub fn placement(&self) -> PixelRect {
        PixelRect {
            x: self.x,
            y: self.y,
            width: ICON_SIZE,
            height: ICON_SIZE,
        }
    }
}

/// The built-in icon grid in draw order.
pub fn default_icons() -> Vec<IconDescriptor> {
    DEFAULT_GRID
        .iter()
        .map(|&(id, x, y)| IconDescriptor::new(id, x, y))
        .collect()
}
