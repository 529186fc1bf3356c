//! JSON-RPC 2.0 bridge to the host page.
//!
//! When the gallery runs in an iframe, it talks to the embedding page over
//! `postMessage`. On native builds the bridge is inert: notifications are
//! queued and dropped, and no requests arrive.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Gallery (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Requests
//!
//! - `focus_panel { index }`: focus the panel for manifest image `index`,
//!   exactly as a click on it would. Focusing the focused panel flies back.
//! - `get_gallery_state`: panels, current focus and camera pose.
//!
//! ## Notifications
//!
//! - `loading_progress`: per-image load states while loading.
//! - `loading_failed`: manifest could not be loaded or was invalid.
//! - `gallery_ready`: walls planned and pictures hung.
//! - `panel_focused`: index plus title and caption when both are present.
//! - `panel_released`: focus left a panel.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Message queue, request dispatch and notification sending.
pub mod web_rpc;
