use super::gallery_manifest::GalleryManifest;
use bevy::prelude::*;

/// Handles requested by the loader. `images` follows manifest order.
#[derive(Resource, Default)]
pub struct GalleryAssets {
    pub manifest: Option<Handle<GalleryManifest>>,
    pub images: Vec<Handle<Image>>,
}

impl GalleryAssets {
    /// Request every manifest image, in manifest order.
    pub fn request_images(&mut self, manifest: &GalleryManifest, asset_server: &AssetServer) {
        self.images = manifest
            .images
            .iter()
            .map(|entry| asset_server.load(manifest.image_path(entry)))
            .collect();
    }
}
