use crate::engine::layout::planner::LayoutParams;
use bevy::prelude::*;
use constants::gallery::{
    DEFAULT_FIXED_LONG_SIDE, DEFAULT_WALL_HEIGHT, DEFAULT_WALL_WIDTH, MIN_MARGIN, MIN_SPACING,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One picture in the manifest: a bare path or a path with display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageEntry {
    Path(String),
    Detailed {
        file: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
}

impl ImageEntry {
    pub fn file(&self) -> &str {
        match self {
            Self::Path(file) | Self::Detailed { file, .. } => file,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Path(_) => None,
            Self::Detailed { title, .. } => title.as_deref(),
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Path(_) => None,
            Self::Detailed { caption, .. } => caption.as_deref(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("wall height must be positive, got {0}")]
    NonPositiveWallHeight(f32),
    #[error("fixed long side must be positive, got {0}")]
    NonPositiveLongSide(f32),
    #[error("margin must not be negative, got {0}")]
    NegativeMargin(f32),
    #[error("spacing must not be negative, got {0}")]
    NegativeSpacing(f32),
    #[error("image {index} has an empty file path")]
    BlankImagePath { index: usize },
}

/// Gallery manifest as a Bevy asset. Mirrors the JSON file; every size has a default.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GalleryManifest {
    #[serde(default = "default_wall_width")]
    pub wall_width: f32,
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
    #[serde(default = "default_fixed_long_side")]
    pub fixed_long_side: f32,
    #[serde(default = "default_margin")]
    pub margin: f32,
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Prefix joined onto every image path, relative to the asset root.
    #[serde(default)]
    pub image_base_path: String,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

fn default_wall_width() -> f32 {
    DEFAULT_WALL_WIDTH
}

fn default_wall_height() -> f32 {
    DEFAULT_WALL_HEIGHT
}

fn default_fixed_long_side() -> f32 {
    DEFAULT_FIXED_LONG_SIDE
}

fn default_margin() -> f32 {
    MIN_MARGIN
}

fn default_spacing() -> f32 {
    MIN_SPACING
}

impl GalleryManifest {
    /// Reject settings no gallery can be built from.
    ///
    /// A wall too narrow for its margins is accepted; it simply yields an
    /// empty gallery.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let numbers = [
            ("wall_width", self.wall_width),
            ("wall_height", self.wall_height),
            ("fixed_long_side", self.fixed_long_side),
            ("margin", self.margin),
            ("spacing", self.spacing),
        ];
        if let Some(&(field, _)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ManifestError::NonFinite { field });
        }

        if self.wall_height <= 0.0 {
            return Err(ManifestError::NonPositiveWallHeight(self.wall_height));
        }
        if self.fixed_long_side <= 0.0 {
            return Err(ManifestError::NonPositiveLongSide(self.fixed_long_side));
        }
        if self.margin < 0.0 {
            return Err(ManifestError::NegativeMargin(self.margin));
        }
        if self.spacing < 0.0 {
            return Err(ManifestError::NegativeSpacing(self.spacing));
        }

        if let Some(index) = self
            .images
            .iter()
            .position(|entry| entry.file().trim().is_empty())
        {
            return Err(ManifestError::BlankImagePath { index });
        }

        Ok(())
    }

    /// Picture centres hang at half the wall height.
    pub fn gallery_height(&self) -> f32 {
        self.wall_height * 0.5
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.wall_width, self.margin, self.spacing)
            .with_gallery_height(self.gallery_height())
    }

    /// Asset path of `entry`, relative to the asset root.
    pub fn image_path(&self, entry: &ImageEntry) -> String {
        let base = self.image_base_path.trim_end_matches('/');
        if base.is_empty() {
            entry.file().to_string()
        } else {
            format!("{}/{}", base, entry.file())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GalleryManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let manifest = parse(r#"{ "images": ["a.jpg"] }"#);

        assert_eq!(manifest.wall_width, DEFAULT_WALL_WIDTH);
        assert_eq!(manifest.wall_height, DEFAULT_WALL_HEIGHT);
        assert_eq!(manifest.fixed_long_side, DEFAULT_FIXED_LONG_SIDE);
        assert_eq!(manifest.margin, MIN_MARGIN);
        assert_eq!(manifest.spacing, MIN_SPACING);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn entries_may_be_paths_or_objects() {
        let manifest = parse(
            r#"{
                "images": [
                    "plain.jpg",
                    { "file": "titled.jpg", "title": "Harbour" },
                    { "file": "full.jpg", "title": "Pier", "caption": "Low tide" }
                ]
            }"#,
        );

        assert_eq!(manifest.images[0], ImageEntry::Path("plain.jpg".into()));
        assert_eq!(manifest.images[1].file(), "titled.jpg");
        assert_eq!(manifest.images[1].title(), Some("Harbour"));
        assert_eq!(manifest.images[1].caption(), None);
        assert_eq!(manifest.images[2].caption(), Some("Low tide"));
    }

    #[test]
    fn image_paths_join_the_base() {
        let mut manifest = parse(r#"{ "image_base_path": "gallery/images/", "images": ["a.jpg"] }"#);
        assert_eq!(manifest.image_path(&manifest.images[0]), "gallery/images/a.jpg");

        manifest.image_base_path.clear();
        assert_eq!(manifest.image_path(&manifest.images[0]), "a.jpg");
    }

    #[test]
    fn layout_params_follow_the_manifest() {
        let manifest = parse(r#"{ "wall_width": 12, "wall_height": 5, "margin": 1.5, "spacing": 0.25 }"#);
        let params = manifest.layout_params();

        assert_eq!(params.wall_width, 12.0);
        assert_eq!(params.margin, 1.5);
        assert_eq!(params.spacing, 0.25);
        assert_eq!(params.gallery_height, 2.5);
    }

    #[test]
    fn narrow_walls_and_empty_lists_are_valid() {
        assert!(parse(r#"{ "wall_width": 2, "margin": 1 }"#).validate().is_ok());
        assert!(parse(r#"{ "images": [] }"#).validate().is_ok());
    }

    #[test]
    fn invalid_settings_are_reported() {
        let cases = [
            (r#"{ "wall_height": 0 }"#, ManifestError::NonPositiveWallHeight(0.0)),
            (r#"{ "fixed_long_side": -1 }"#, ManifestError::NonPositiveLongSide(-1.0)),
            (r#"{ "margin": -0.5 }"#, ManifestError::NegativeMargin(-0.5)),
            (r#"{ "spacing": -2 }"#, ManifestError::NegativeSpacing(-2.0)),
            (
                r#"{ "images": ["a.jpg", { "file": "  " }] }"#,
                ManifestError::BlankImagePath { index: 1 },
            ),
        ];

        for (json, expected) in cases {
            assert_eq!(parse(json).validate(), Err(expected));
        }
    }

    #[test]
    fn non_finite_sizes_are_rejected() {
        let mut manifest = parse("{}");
        manifest.spacing = f32::NAN;
        assert_eq!(
            manifest.validate(),
            Err(ManifestError::NonFinite { field: "spacing" })
        );
    }
}
