use crate::engine::camera::gallery_camera::GalleryCamera;
use crate::engine::loading::progress::LoadingProgress;
use crate::interaction::panel_registry::{PanelId, PanelRegistry};
use crate::interaction::router::ClickRouter;
use crate::interaction::systems::PanelFocusRequest;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage bridge for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC bridge disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership passes to JS so the listener outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only view of the gallery the RPC handlers answer from.
pub struct GalleryView<'a> {
    pub registry: &'a PanelRegistry,
    pub router: &'a ClickRouter,
    pub camera: &'a GalleryCamera,
    pub progress: &'a LoadingProgress,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut focus_events: EventWriter<PanelFocusRequest>,
    registry: Res<PanelRegistry>,
    router: Res<ClickRouter>,
    camera: Res<GalleryCamera>,
    progress: Res<LoadingProgress>,
) {
    let view = GalleryView {
        registry: &registry,
        router: &router,
        camera: &camera,
        progress: &progress,
    };

    for event in events.read() {
        debug!("Received RPC: {}", event.content);

        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let mut focus_requests = Vec::new();
                let response = handle_rpc_request(&request, &view, &mut focus_requests);
                focus_events.write_batch(focus_requests);
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Run one request. Returns a response only for requests carrying an ID.
fn handle_rpc_request(
    request: &RpcRequest,
    view: &GalleryView,
    focus_requests: &mut Vec<PanelFocusRequest>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "focus_panel" => handle_focus_panel(&request.params, view, focus_requests),
        "get_gallery_state" => Ok(gallery_state(view)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({"method": request.method})),
            })
        }
    };

    // Notifications have no ID and get no reply.
    let id = request.id.clone()?;

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Focus a panel by manifest index, as if it had been clicked.
fn handle_focus_panel(
    params: &serde_json::Value,
    view: &GalleryView,
    focus_requests: &mut Vec<PanelFocusRequest>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct FocusPanelParams {
        index: usize,
    }

    let parsed = serde_json::from_value::<FocusPanelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'index' parameter"))?;

    let panel = PanelId(parsed.index);
    if view.registry.get(panel).is_none() {
        return Err(RpcError::invalid_params(&format!(
            "No panel hangs for image {}",
            parsed.index
        )));
    }

    focus_requests.push(PanelFocusRequest { panel });
    info!("Focus request dispatched for panel {}", parsed.index);

    Ok(serde_json::json!({
        "success": true,
        "index": parsed.index
    }))
}

fn gallery_state(view: &GalleryView) -> serde_json::Value {
    let panels: Vec<serde_json::Value> = view
        .registry
        .iter()
        .map(|panel| {
            serde_json::json!({
                "index": panel.id.0,
                "wall": panel.wall,
                "center": panel.center.to_array(),
                "width": panel.width,
                "height": panel.height,
                "title": panel.label.title,
                "caption": panel.label.caption,
            })
        })
        .collect();
    let rig = &view.camera.rig;

    serde_json::json!({
        "ready": view.progress.gallery_created,
        "panels": panels,
        "focused": view.router.focus().map(|focus| focus.panel.0),
        "camera": {
            "position": rig.position.to_array(),
            "orbit_target": rig.orbit_target.to_array(),
            "moving": !view.camera.navigation.is_idle(),
        },
    })
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications go first; responses follow in request order.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No host page on native builds.
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
