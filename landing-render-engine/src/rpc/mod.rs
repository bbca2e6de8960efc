//! JSON-RPC 2.0 bridge to the page embedding the canvas.
//!
//! Messages travel over `postMessage` between the engine (inside an iframe)
//! and its parent window. Requests carry an `id` and get exactly one
//! response; notifications flow one way in either direction.
//!
//! ```text
//! Host (parent window)   <──postMessage──>   Engine (iframe)
//!        ├─ request {id} ─────────────────────> │
//!        │ <──────────────────── response {id} ─┤
//!        │ <────────────────── notification ────┤
//! ```
//!
//! ## Methods
//!
//! - `get_fps`: smoothed frame rate
//! - `get_scroll_progress`: page offset, scroll range and hero progress
//! - `scroll_to {offset}`: move the page, clamped to the content height
//! - `get_reveal_states`: phase, trigger, delay and group index of every
//!   revealed element
//! - `set_landing_config {config}`: validate a config and rebuild the page
//!
//! ## Notifications
//!
//! `fps_update`, `reveal_fired`, `scene_mounted`, `scene_unmounted`,
//! `cta_clicked` and `debug_message`.
//!
//! ## Errors
//!
//! - `-32600`: not a JSON-RPC 2.0 request
//! - `-32601`: unknown method
//! - `-32602`: missing or invalid params, including configs that fail validation
//! - `-32603`: internal error
//!
//! New methods get a `handle_*` function returning `Result<Value, RpcError>`
//! and an arm in `handle_rpc_request`.

/// Message transport, request dispatch and engine notifications.
pub mod web_rpc;
