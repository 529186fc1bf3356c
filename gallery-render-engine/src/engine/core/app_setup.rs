use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{AMBIENT_BRIGHTNESS, CLEAR_COLOUR};
// Crate engine modules
use crate::engine::assets::gallery_assets::GalleryAssets;
use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::camera::gallery_camera::{
    GalleryCamera, camera_navigation_system, orbit_drag_system, sync_camera_transform,
};
use crate::engine::core::app_state::{AppState, transition_to_running, update_loading_frontend};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::gallery_creator::create_gallery_when_ready;
use crate::engine::loading::image_loader::check_image_loading;
use crate::engine::loading::image_resolution::ImageResolution;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
// Crate interaction modules
use crate::interaction::click::ClickDetector;
use crate::interaction::panel_registry::PanelRegistry;
use crate::interaction::router::ClickRouter;
use crate::interaction::systems::{
    PanelFocusRequest, panel_focus_request_system, pointer_click_system,
};
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::interaction::caption::{spawn_caption_overlay, update_caption_overlay};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers GalleryManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GalleryManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(CLEAR_COLOUR))
        .insert_resource(AmbientLight {
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        });

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<GalleryAssets>()
        .init_resource::<ImageResolution>()
        .init_resource::<PanelRegistry>()
        .init_resource::<ClickRouter>()
        .init_resource::<ClickDetector>()
        .init_resource::<GalleryCamera>()
        .add_event::<PanelFocusRequest>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                load_manifest_system,
                check_image_loading,
                create_gallery_when_ready,
                transition_to_running,
                update_loading_frontend,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Clicks are routed before the flight advances, so a new request takes effect this frame.
    app.add_systems(
        Update,
        (
            pointer_click_system,
            panel_focus_request_system,
            orbit_drag_system,
            camera_navigation_system,
            sync_camera_transform,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            update_caption_overlay.run_if(in_state(AppState::Running)),
        );
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, gallery_camera: Res<GalleryCamera>) {
    commands.spawn((Camera3d::default(), gallery_camera.rig.transform()));

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_caption_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: "wgpu=error,naga=warn".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
