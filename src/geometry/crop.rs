use crate::foundation::core::Rect;
use crate::foundation::error::{MockupError, MockupResult};

/// Source-space crop window selected to cover a target box without letterboxing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropWindow {
    /// Left edge in source pixels.
    pub sx: f64,
    /// Top edge in source pixels.
    pub sy: f64,
    /// Width in source pixels.
    pub sw: f64,
    /// Height in source pixels.
    pub sh: f64,
}

impl CropWindow {
    /// The window as a geometry rectangle in source space.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.sx, self.sy, self.sx + self.sw, self.sy + self.sh)
    }

    /// Return `true` when the window selects the whole `img_w` x `img_h` image.
    pub fn is_full(self, img_w: f64, img_h: f64) -> bool {
        self.sx == 0.0 && self.sy == 0.0 && self.sw == img_w && self.sh == img_h
    }
}

/// Compute the maximal centered crop of an `img_w` x `img_h` image whose aspect ratio matches
/// `box_w` x `box_h`.
///
/// A relatively wider image keeps its full height and is trimmed equally left and right; any
/// other image keeps its full width and is trimmed equally top and bottom. Equal ratios select
/// the whole image. The window never leaves the source bounds.
pub fn resolve_crop(img_w: f64, img_h: f64, box_w: f64, box_h: f64) -> MockupResult<CropWindow> {
    for (name, v) in [
        ("image width", img_w),
        ("image height", img_h),
        ("box width", box_w),
        ("box height", box_h),
    ] {
        if !v.is_finite() || v <= 0.0 {
            return Err(MockupError::validation(format!(
                "{name} must be finite and > 0 (got {v})"
            )));
        }
    }

    let img_ratio = img_w / img_h;
    let box_ratio = box_w / box_h;

    if img_ratio == box_ratio {
        return Ok(CropWindow {
            sx: 0.0,
            sy: 0.0,
            sw: img_w,
            sh: img_h,
        });
    }

    if img_ratio > box_ratio {
        let sw = (img_h * box_ratio).min(img_w);
        Ok(CropWindow {
            sx: ((img_w - sw) / 2.0).max(0.0),
            sy: 0.0,
            sw,
            sh: img_h,
        })
    } else {
        let sh = (img_w / box_ratio).min(img_h);
        Ok(CropWindow {
            sx: 0.0,
            sy: ((img_h - sh) / 2.0).max(0.0),
            sw: img_w,
            sh,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/crop.rs"]
mod tests;
