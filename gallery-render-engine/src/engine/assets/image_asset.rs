use super::gallery_manifest::ImageEntry;
use crate::engine::layout::planner::DisplaySize;
use crate::interaction::panel_registry::PanelLabel;
use bevy::prelude::*;

/// A loaded picture ready to hang: texture, pixel size and wall footprint.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub source: String,
    pub pixel_size: UVec2,
    pub display: DisplaySize,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub texture: Handle<Image>,
}

impl ImageAsset {
    /// Build from a finished load. `None` for images with no pixels.
    pub fn resolve(
        entry: &ImageEntry,
        source: String,
        pixel_size: UVec2,
        fixed_long_side: f32,
        texture: Handle<Image>,
    ) -> Option<Self> {
        let display = display_size(pixel_size, fixed_long_side)?;
        Some(Self {
            source,
            pixel_size,
            display,
            title: entry.title().map(str::to_owned),
            caption: entry.caption().map(str::to_owned),
            texture,
        })
    }

    pub fn label(&self) -> PanelLabel {
        PanelLabel {
            title: self.title.clone(),
            caption: self.caption.clone(),
        }
    }
}

/// Scale so the longer side is `fixed_long_side`, keeping the aspect ratio.
pub fn display_size(pixel_size: UVec2, fixed_long_side: f32) -> Option<DisplaySize> {
    if pixel_size.x == 0 || pixel_size.y == 0 {
        return None;
    }

    let (w, h) = (pixel_size.x as f32, pixel_size.y as f32);
    Some(if w >= h {
        DisplaySize::new(fixed_long_side, fixed_long_side * h / w)
    } else {
        DisplaySize::new(fixed_long_side * w / h, fixed_long_side)
    })
}
