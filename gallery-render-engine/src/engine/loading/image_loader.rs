use super::image_resolution::ImageResolution;
use super::progress::LoadingProgress;
use crate::engine::assets::gallery_assets::GalleryAssets;
use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::assets::image_asset::ImageAsset;
use bevy::asset::LoadState;
use bevy::prelude::*;

/// Settle each image slot as its load finishes. Failed or empty images are skipped.
pub fn check_image_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    mut resolution: ResMut<ImageResolution>,
    gallery_assets: Res<GalleryAssets>,
    manifest: Option<Res<GalleryManifest>>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
) {
    if loading_progress.images_resolved || !loading_progress.manifest_loaded {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    for (index, (handle, entry)) in gallery_assets
        .images
        .iter()
        .zip(&manifest.images)
        .enumerate()
    {
        if !resolution.is_pending(index) {
            continue;
        }

        let path = manifest.image_path(entry);
        match asset_server.get_load_state(handle) {
            Some(LoadState::Loaded) => {
                let Some(image) = images.get(handle) else {
                    continue;
                };
                match ImageAsset::resolve(
                    entry,
                    path.clone(),
                    image.size(),
                    manifest.fixed_long_side,
                    handle.clone(),
                ) {
                    Some(asset) => resolution.resolve(index, asset),
                    None => {
                        warn!("Skipping {}: image has no pixels", path);
                        resolution.fail(index);
                    }
                }
            }
            Some(LoadState::Failed(err)) => {
                warn!("Skipping {}: {}", path, err);
                resolution.fail(index);
            }
            _ => {}
        }
    }

    loading_progress.image_loading_states = manifest
        .images
        .iter()
        .zip(resolution.slots())
        .map(|(entry, slot)| (entry.file().to_string(), slot.state_code()))
        .collect();

    if resolution.is_complete() {
        info!(
            "✓ Images resolved: {} loaded, {} skipped",
            resolution.len() - resolution.failed_count(),
            resolution.failed_count()
        );
        loading_progress.images_resolved = true;
    }
}
