//! Wallpaper mockup compositor.
//!
//! Composes a user photo onto a phone silhouette, optionally with an app icon grid and a clock,
//! and exports the result as a PNG preview:
//!
//! - Accept an upload with [`MockupSession::select_file`]
//! - Compose it with [`MockupSession::generate`] from a [`GenerationRequest`] snapshot
//! - Download the result with [`MockupSession::export`] once [`MockupSession::can_export`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod encode;
mod foundation;
mod geometry;
mod render;
mod scene;
mod session;

pub use crate::assets::Bitmap;
pub use crate::assets::loader::{AssetLoader, AssetRef, StaticAssetLoader};
pub use crate::config::{ClockStyle, MockupConfig};
pub use crate::encode::png::{PNG_MIME, encode_png, export_file_name};
pub use crate::foundation::core::{Affine, Canvas, PixelRect, Rect, Rgba8Premul};
pub use crate::foundation::error::{MockupError, MockupResult};
pub use crate::geometry::crop::{CropWindow, resolve_crop};
pub use crate::render::clock::{ClockRenderer, format_clock};
pub use crate::render::compositor::{CompositeReport, IconFailure, LayerCompositor};
pub use crate::render::surface::Surface;
pub use crate::scene::device::DeviceProfile;
pub use crate::scene::icons::{ICON_SIZE, IconDescriptor, default_icons};
pub use crate::scene::request::{GenerationRequest, OverlayToggles};
pub use crate::session::state::{GenerationPhase, GenerationToken};
pub use crate::session::upload::{SelectedFile, SourceImage};
pub use crate::session::{ExportedMockup, GenerationOutcome, MockupSession};
