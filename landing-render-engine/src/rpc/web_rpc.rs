use bevy::diagnostic::DiagnosticsStore;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::reveal::group::RevealGroupMember;
use crate::engine::reveal::state::RevealEntry;
use crate::engine::reveal::systems::RevealFired;
use crate::engine::scene::composer::{SceneMounted, SceneUnmounted};
use crate::engine::scroll::ScrollPipeline;
use crate::engine::scroll::page_scroll::{PageScroll, PageScrolled};
use crate::engine::scroll::progress::ScrollProgress;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::sections::CtaClicked;
use crate::sections::challenges::ChallengeCard;
use crate::sections::config::{LandingConfig, LandingConfigChanged};
use crate::sections::hero::HeroSection;

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
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page
/// and the engine. Handles both request-response patterns and notification
/// broadcasting.
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

    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the WebRPC communication layer for iframe deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .before(ScrollPipeline),
            )
            .add_systems(
                PostUpdate,
                (forward_engine_notifications, send_outgoing_messages).chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
            return;
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource, Default, Clone)]
pub struct MessageQueue(pub std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
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

/// Engine state the RPC methods read and drive.
#[derive(SystemParam)]
pub struct RpcContext<'w, 's> {
    diagnostics: Option<Res<'w, DiagnosticsStore>>,
    page_scroll: ResMut<'w, PageScroll>,
    hero_progress: Query<'w, 's, &'static ScrollProgress, With<HeroSection>>,
    reveals: Query<
        'w,
        's,
        (
            Entity,
            &'static RevealEntry,
            Option<&'static ChallengeCard>,
            Option<&'static RevealGroupMember>,
        ),
    >,
    scrolled: EventWriter<'w, PageScrolled>,
    config_changes: EventWriter<'w, LandingConfigChanged>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut context: RpcContext,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Processing method: {}", request.method)
                    }),
                );

                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparsable RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    if request.jsonrpc != "2.0" {
        return Some(create_error_response(
            id,
            -32600,
            "Invalid request",
            Some(serde_json::json!({"jsonrpc": request.jsonrpc})),
        ));
    }

    let result = match request.method.as_str() {
        "get_fps" => handle_get_fps(context),
        "get_scroll_progress" => handle_get_scroll_progress(context),
        "scroll_to" => handle_scroll_to(&request.params, context),
        "get_reveal_states" => handle_get_reveal_states(context),
        "set_landing_config" => handle_set_landing_config(&request.params, context),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

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

fn handle_get_fps(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let fps = context
        .diagnostics
        .as_deref()
        .and_then(smoothed_fps)
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Page offset and the hero's progress. Progress is `null` while the hero is
/// not laid out.
fn handle_get_scroll_progress(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let hero = context
        .hero_progress
        .iter()
        .next()
        .and_then(|progress| progress.current)
        .map(|progress| progress.value());

    Ok(serde_json::json!({
        "offset": context.page_scroll.offset(),
        "max_offset": context.page_scroll.max_offset(),
        "hero": hero,
    }))
}

fn handle_scroll_to(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ScrollToParams {
        offset: f32,
    }

    let parsed = serde_json::from_value::<ScrollToParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric 'offset' parameter"))?;
    if !parsed.offset.is_finite() {
        return Err(RpcError::invalid_params("'offset' must be finite"));
    }

    let before = context.page_scroll.offset();
    context.page_scroll.scroll_to(parsed.offset);
    let offset = context.page_scroll.offset();
    if offset != before {
        context.scrolled.write(PageScrolled { offset });
    }

    Ok(serde_json::json!({
        "success": true,
        "offset": offset
    }))
}

fn handle_get_reveal_states(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let mut states = Vec::new();
    for (entity, entry, card, member) in &context.reveals {
        let trigger = serde_json::to_value(entry.trigger)
            .map_err(|error| RpcError::internal_error(&error.to_string()))?;
        states.push(serde_json::json!({
            "entity": entity.to_string(),
            "card": card.map(|card| card.id.as_str()),
            "group_index": member.map(|member| member.index),
            "trigger": trigger,
            "phase": entry.phase().name(),
            "delay_ms": entry.delay.as_millis() as u64,
        }));
    }

    Ok(serde_json::json!({ "reveals": states }))
}

fn handle_set_landing_config(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let raw = params
        .get("config")
        .cloned()
        .ok_or_else(|| RpcError::invalid_params("Expected 'config' parameter"))?;

    let config = LandingConfig::from_json(raw)
        .map_err(|error| RpcError::invalid_params(&error.to_string()))?;
    config
        .validate()
        .map_err(|error| RpcError::invalid_params(&error.to_string()))?;

    info!("Landing config replaced over RPC");
    context.config_changes.write(LandingConfigChanged(config));

    Ok(serde_json::json!({
        "success": true
    }))
}

/// Push engine events to the host page as notifications.
fn forward_engine_notifications(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut reveals: EventReader<RevealFired>,
    mut mounted: EventReader<SceneMounted>,
    mut unmounted: EventReader<SceneUnmounted>,
    mut clicks: EventReader<CtaClicked>,
) {
    for fired in reveals.read() {
        rpc_interface.send_notification(
            "reveal_fired",
            serde_json::json!({
                "entity": fired.entity.to_string(),
                "delay_ms": fired.delay.as_millis() as u64,
            }),
        );
    }
    for event in mounted.read() {
        rpc_interface.send_notification(
            "scene_mounted",
            serde_json::json!({ "surface": event.kind.name() }),
        );
    }
    for event in unmounted.read() {
        rpc_interface.send_notification(
            "scene_unmounted",
            serde_json::json!({ "surface": event.kind.name() }),
        );
    }
    for click in clicks.read() {
        rpc_interface.send_notification(
            "cta_clicked",
            serde_json::json!({ "source": click.source }),
        );
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
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
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scroll::page_scroll::PageScrolled;

    fn rpc_app() -> App {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<PageScroll>()
            .init_resource::<MessageQueue>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<PageScrolled>()
            .add_event::<LandingConfigChanged>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages).chain(),
            );
        app
    }

    fn call(app: &mut App, message: serde_json::Value) -> RpcResponse {
        let queue = app.world().resource::<MessageQueue>().clone();
        queue.0.lock().unwrap().push(message.to_string());
        app.update();
        app.world_mut()
            .resource_mut::<WebRpcInterface>()
            .outgoing_responses
            .pop()
            .unwrap()
    }

    #[test]
    fn unknown_method_is_reported() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            serde_json::json!({"jsonrpc": "2.0", "method": "nope", "id": 1}),
        );
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn scroll_to_clamps_and_reports_the_offset() {
        let mut app = rpc_app();
        app.world_mut()
            .resource_mut::<PageScroll>()
            .set_extent(800.0, 2000.0);
        let response = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0", "method": "scroll_to", "params": {"offset": 5000.0}, "id": 2
            }),
        );
        assert_eq!(response.result.unwrap()["offset"], 1200.0);
        assert_eq!(app.world().resource::<PageScroll>().offset(), 1200.0);
    }

    #[test]
    fn invalid_config_is_rejected_without_rebuilding() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "set_landing_config",
                "params": {"config": {"hero": {"motion": {
                    "speed": -1.0, "rotation_intensity": 1.0, "float_intensity": 1.0
                }}}},
                "id": 3
            }),
        );
        assert_eq!(response.error.unwrap().code, -32602);
        let changes = app.world().resource::<Events<LandingConfigChanged>>();
        assert!(changes.is_empty());
    }

    #[test]
    fn valid_config_requests_a_rebuild() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "set_landing_config",
                "params": {"config": {"challenges": {"items": []}}},
                "id": 4
            }),
        );
        assert_eq!(response.result.unwrap()["success"], true);
        let changes = app.world().resource::<Events<LandingConfigChanged>>();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn partial_motion_config_is_accepted() {
        let mut app = rpc_app();
        let response = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "set_landing_config",
                "params": {"config": {"hero": {"motion": {"speed": 2}}}},
                "id": 6
            }),
        );
        assert_eq!(response.result.unwrap()["success"], true);
        let changes = app.world().resource::<Events<LandingConfigChanged>>();
        let mut reader = changes.get_cursor();
        let LandingConfigChanged(config) = reader.read(changes).next().unwrap();
        assert_eq!(config.hero.motion.speed, 2.0);
        assert_eq!(
            config.hero.title,
            crate::sections::config::HeroConfig::default().title
        );
    }

    #[test]
    fn reveal_states_report_each_entry() {
        let mut app = rpc_app();
        let grid = app.world_mut().spawn_empty().id();
        app.world_mut().spawn((
            RevealEntry::on_viewport(),
            ChallengeCard { id: "a".into() },
            RevealGroupMember {
                group: grid,
                index: 2,
            },
        ));
        app.world_mut().spawn(RevealEntry::on_mount());
        let response = call(
            &mut app,
            serde_json::json!({"jsonrpc": "2.0", "method": "get_reveal_states", "id": 5}),
        );
        let result = response.result.unwrap();
        let states = result["reveals"].as_array().unwrap();
        assert_eq!(states.len(), 2);
        let card = states.iter().find(|state| state["card"] == "a").unwrap();
        assert_eq!(card["trigger"], "on_viewport");
        assert_eq!(card["phase"], "unrevealed");
        assert_eq!(card["group_index"], 2);
        let other = states.iter().find(|state| state["card"].is_null()).unwrap();
        assert_eq!(other["trigger"], "on_mount");
        assert!(other["group_index"].is_null());
    }

    #[test]
    fn requests_without_id_get_no_response() {
        let mut app = rpc_app();
        let queue = app.world().resource::<MessageQueue>().clone();
        queue
            .0
            .lock()
            .unwrap()
            .push(r#"{"jsonrpc":"2.0","method":"get_fps"}"#.to_string());
        app.update();
        assert!(app.world().resource::<WebRpcInterface>().pending_responses().is_empty());
    }
}
