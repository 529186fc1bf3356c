use super::click::ClickDetector;
use super::panel_registry::{PanelId, PanelRegistry};
use super::picking::{ClickTarget, GalleryHitTest, pick_target};
use super::router::{ClickRouter, RouteOutcome};
use crate::engine::camera::gallery_camera::GalleryCamera;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Focus a panel exactly as if it had been clicked. Sent by the web host.
#[derive(Event, Debug, Clone, Copy)]
pub struct PanelFocusRequest {
    pub panel: PanelId,
}

/// Turn quick left clicks into picks and route them to the camera.
pub fn pointer_click_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    registry: Res<PanelRegistry>,
    mut detector: ResMut<ClickDetector>,
    mut router: ResMut<ClickRouter>,
    mut gallery_camera: ResMut<GalleryCamera>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let now = time.elapsed_secs_f64();

    if mouse_button.just_pressed(MouseButton::Left) {
        detector.press(now);
    }
    if cursor_moved.read().count() > 0 {
        detector.pointer_moved(now);
    }
    if !mouse_button.just_released(MouseButton::Left) || !detector.release(now) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let target = pick_target(&GalleryHitTest::new(&registry), ray);
    let outcome = route_click(target, &registry, &mut router, &mut gallery_camera, now);
    notify_outcome(&mut rpc_interface, &registry, outcome);
}

pub fn panel_focus_request_system(
    mut requests: EventReader<PanelFocusRequest>,
    time: Res<Time>,
    registry: Res<PanelRegistry>,
    mut router: ResMut<ClickRouter>,
    mut gallery_camera: ResMut<GalleryCamera>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let now = time.elapsed_secs_f64();
    for request in requests.read() {
        let target = ClickTarget::Panel(request.panel);
        let outcome = route_click(target, &registry, &mut router, &mut gallery_camera, now);
        notify_outcome(&mut rpc_interface, &registry, outcome);
    }
}

fn route_click(
    target: ClickTarget,
    registry: &PanelRegistry,
    router: &mut ClickRouter,
    gallery_camera: &mut GalleryCamera,
    now: f64,
) -> RouteOutcome {
    let (rig, navigation) = gallery_camera.split_mut();
    router.route(target, registry, rig, navigation, now)
}

fn notify_outcome(
    rpc_interface: &mut WebRpcInterface,
    registry: &PanelRegistry,
    outcome: RouteOutcome,
) {
    match outcome {
        RouteOutcome::Focused { panel, .. } => {
            let (title, caption) = registry
                .get(panel)
                .and_then(|p| p.label.caption_pair())
                .unzip();
            info!("Focusing panel {}", panel.0);
            rpc_interface.send_notification(
                "panel_focused",
                serde_json::json!({
                    "index": panel.0,
                    "title": title,
                    "caption": caption,
                }),
            );
        }
        RouteOutcome::Released { panel, .. }
        | RouteOutcome::Walked {
            released: Some(panel),
            ..
        } => {
            info!("Released panel {}", panel.0);
            rpc_interface.send_notification("panel_released", serde_json::json!({ "index": panel.0 }));
        }
        RouteOutcome::Walked { released: None, .. }
        | RouteOutcome::OutOfBounds(_)
        | RouteOutcome::Missed => {}
    }
}
