use crate::engine::loading::progress::{IMAGE_PENDING, LoadingProgress};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.gallery_created {
        info!("→ Gallery hung, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// Snapshot of the loading stages, compared frame to frame.
type LoadingStage = (bool, usize, bool, bool);

fn loading_stage(progress: &LoadingProgress) -> LoadingStage {
    let settled = progress
        .image_loading_states
        .iter()
        .filter(|(_, state)| *state != IMAGE_PENDING)
        .count();
    (
        progress.manifest_loaded,
        settled,
        progress.images_resolved,
        progress.gallery_created,
    )
}

/// Tell the host page how loading is going, once per change.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_stage: Local<Option<LoadingStage>>,
) {
    let stage = loading_stage(&loading_progress);
    if *last_stage == Some(stage) {
        return;
    }
    *last_stage = Some(stage);

    let images: Vec<serde_json::Value> = loading_progress
        .image_loading_states
        .iter()
        .map(|(file, state)| serde_json::json!({ "file": file, "state": state }))
        .collect();

    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "manifest_loaded": loading_progress.manifest_loaded,
            "images": images,
            "fraction": loading_progress.image_fraction(),
            "gallery_created": loading_progress.gallery_created,
        }),
    );
}
