use super::image_resolution::ImageResolution;
use super::progress::LoadingProgress;
use crate::engine::assets::gallery_assets::GalleryAssets;
use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::camera::gallery_camera::GalleryCamera;
use crate::interaction::router::ClickRouter;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::{MANIFEST_FILE_NAME, RELATIVE_MANIFEST_PATH};

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<GalleryManifest>>,
}

pub fn manifest_path() -> String {
    format!("{}/{}", RELATIVE_MANIFEST_PATH, MANIFEST_FILE_NAME)
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    let path = manifest_path();
    info!("Loading gallery manifest from {}", path);
    manifest_loader.handle = Some(asset_server.load(path));
}

/// Validate the manifest once it arrives, then request every image in manifest order.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut gallery_assets: ResMut<GalleryAssets>,
    mut resolution: ResMut<ImageResolution>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<GalleryManifest>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loading_progress.manifest_loaded || loading_progress.manifest_failed {
        return;
    }
    let Some(handle) = manifest_loader.handle.as_ref() else {
        return;
    };

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        report_failure(&mut loading_progress, &mut rpc_interface, err.to_string());
        return;
    }

    let Some(manifest) = manifests.get(handle) else {
        return;
    };

    if let Err(err) = manifest.validate() {
        report_failure(&mut loading_progress, &mut rpc_interface, err.to_string());
        return;
    }

    info!(
        "✓ Gallery manifest loaded: {} images, walls {:.1} x {:.1}",
        manifest.images.len(),
        manifest.wall_width,
        manifest.wall_height
    );

    gallery_assets.manifest = Some(handle.clone());
    gallery_assets.request_images(manifest, &asset_server);
    *resolution = ImageResolution::new(manifest.images.len());

    commands.insert_resource(ClickRouter::new(manifest.wall_width));
    commands.insert_resource(GalleryCamera::for_room(manifest.wall_width));
    commands.insert_resource(manifest.clone());
    loading_progress.manifest_loaded = true;
}

fn report_failure(
    loading_progress: &mut LoadingProgress,
    rpc_interface: &mut WebRpcInterface,
    reason: String,
) {
    error!("Gallery manifest rejected: {}", reason);
    loading_progress.manifest_failed = true;
    rpc_interface.send_notification(
        "loading_failed",
        serde_json::json!({
            "stage": "manifest",
            "reason": reason,
        }),
    );
}
