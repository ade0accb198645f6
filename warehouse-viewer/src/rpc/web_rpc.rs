use crate::engine::core::app_state::SessionState;
use crate::tools::commands::{CommandSource, WarehouseCommand, WarehouseCommandEvent};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use warehouse_layout::{PrimitiveKind, SuggestionError};
use warehouse_layout::suggestion::{
    CannedSuggestionService, default_suggestion_kind, request_suggestion,
};

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

/// JSON-RPC 2.0 notification, one-way.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

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

/// Outgoing queues, flushed to the parent window once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

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
    use std::sync::{Arc, Mutex};

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(err) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", err);
            }
        }
        None => error!("Window object not available"),
    }

    // JS owns the closure from here on.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

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

    let messages = match queue_res.0.lock() {
        Ok(mut queue) => std::mem::take(&mut *queue),
        Err(_) => Vec::new(),
    };

    for content in messages {
        message_events.write(IncomingRpcMessage { content });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    session: Option<Res<SessionState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut command_events: EventWriter<WarehouseCommandEvent>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("RPC method: {}", request.method);

        let result = match parse_command(&request.method, &request.params) {
            Ok(Some(command)) => {
                // Commands need a session to act on; before it exists they are refused.
                if session.is_none() {
                    Err(RpcError::internal_error("Warehouse is still loading"))
                } else {
                    let name = command.name();
                    command_events.write(WarehouseCommandEvent::new(command, CommandSource::Rpc));
                    Ok(serde_json::json!({ "accepted": true, "command": name }))
                }
            }
            Ok(None) => match request.method.as_str() {
                "get_status" => handle_get_status(session.as_deref()),
                "get_fps" => Ok(handle_get_fps(&diagnostics)),
                "suggest" => handle_suggest(&request.params),
                _ => Err(RpcError::method_not_found(&request.method)),
            },
            Err(error) => Err(error),
        };

        // Requests without an id are notifications and get no reply.
        let Some(id) = request.id else {
            if let Err(error) = result {
                warn!("RPC notification {} failed: {}", request.method, error.message);
            }
            continue;
        };

        let (result, error) = match result {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        rpc_interface.queue_response(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result,
            error,
            id: Some(id),
        });
    }
}

/// Maps command-style methods to [`WarehouseCommand`]s. `Ok(None)` means the method is not
/// a command (it may still be a query handled elsewhere).
pub fn parse_command(
    method: &str,
    params: &serde_json::Value,
) -> Result<Option<WarehouseCommand>, RpcError> {
    #[derive(Deserialize)]
    struct SearchParams {
        query: String,
    }

    #[derive(Deserialize)]
    struct SelectParams {
        id: Option<String>,
    }

    #[derive(Deserialize)]
    struct SuggestedObjectParams {
        label: String,
        kind: Option<String>,
    }

    let command = match method {
        "regenerate" => WarehouseCommand::Regenerate,
        "animate_pallet" => WarehouseCommand::AnimatePallet,
        "clear_scene" => WarehouseCommand::ClearScene,
        "search" => {
            let parsed = serde_json::from_value::<SearchParams>(params.clone())
                .map_err(|_| RpcError::invalid_params("Expected 'query' parameter"))?;
            WarehouseCommand::Search(parsed.query)
        }
        "select_pallet" => {
            let parsed = serde_json::from_value::<SelectParams>(params.clone())
                .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;
            WarehouseCommand::SelectPallet(parsed.id)
        }
        "add_suggested_object" => {
            let parsed = serde_json::from_value::<SuggestedObjectParams>(params.clone())
                .map_err(|_| RpcError::invalid_params("Expected 'label' parameter"))?;
            let kind = match parsed.kind.as_deref() {
                Some(name) => PrimitiveKind::from_name(name).ok_or_else(|| {
                    RpcError::invalid_params(&format!("Unknown primitive kind: {name}"))
                })?,
                None => default_suggestion_kind(),
            };
            WarehouseCommand::AddSuggestedObject {
                label: parsed.label,
                kind,
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(command))
}

fn handle_get_status(session: Option<&SessionState>) -> Result<serde_json::Value, RpcError> {
    let session = session.ok_or_else(|| RpcError::internal_error("Warehouse is still loading"))?;
    Ok(serde_json::json!({
        "dimensions": session.dimensions(),
        "objects": session.objects().len(),
        "activeAnimations": session.animations().len(),
        "selection": session.selected_details(),
        "searchTerm": session.search_term(),
        "suggestions": session.suggestions(),
    }))
}

fn handle_get_fps(diagnostics: &DiagnosticsStore) -> serde_json::Value {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    serde_json::json!({ "fps": fps })
}

fn handle_suggest(params: &serde_json::Value) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SuggestParams {
        prompt: String,
    }

    let parsed = serde_json::from_value::<SuggestParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'prompt' parameter"))?;

    let suggestion =
        request_suggestion(&CannedSuggestionService, &parsed.prompt).map_err(|err| match err {
            SuggestionError::PromptTooShort { .. } => RpcError::invalid_params(&err.to_string()),
            SuggestionError::Service(_) => RpcError::internal_error(&err.to_string()),
        })?;
    serde_json::to_value(suggestion).map_err(|err| RpcError::internal_error(&err.to_string()))
}

/// Notifications go out before responses.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

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
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_commands() {
        assert_eq!(
            parse_command("regenerate", &serde_json::Value::Null),
            Ok(Some(WarehouseCommand::Regenerate))
        );
        assert_eq!(
            parse_command("animate_pallet", &json!({})),
            Ok(Some(WarehouseCommand::AnimatePallet))
        );
        assert_eq!(
            parse_command("clear_scene", &json!({})),
            Ok(Some(WarehouseCommand::ClearScene))
        );
    }

    #[test]
    fn test_search_requires_query() {
        assert_eq!(
            parse_command("search", &json!({ "query": "widget" })),
            Ok(Some(WarehouseCommand::Search("widget".to_string())))
        );
        let err = parse_command("search", &json!({})).unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_select_accepts_null() {
        assert_eq!(
            parse_command("select_pallet", &json!({ "id": null })),
            Ok(Some(WarehouseCommand::SelectPallet(None)))
        );
        assert_eq!(
            parse_command("select_pallet", &json!({ "id": "abc" })),
            Ok(Some(WarehouseCommand::SelectPallet(Some("abc".to_string()))))
        );
    }

    #[test]
    fn test_suggested_object_kind() {
        assert_eq!(
            parse_command("add_suggested_object", &json!({ "label": "crate" })),
            Ok(Some(WarehouseCommand::AddSuggestedObject {
                label: "crate".to_string(),
                kind: PrimitiveKind::Box,
            }))
        );
        assert_eq!(
            parse_command(
                "add_suggested_object",
                &json!({ "label": "orb", "kind": "sphere" })
            ),
            Ok(Some(WarehouseCommand::AddSuggestedObject {
                label: "orb".to_string(),
                kind: PrimitiveKind::Sphere,
            }))
        );
        let err = parse_command(
            "add_suggested_object",
            &json!({ "label": "x", "kind": "dodecahedron" }),
        )
        .unwrap_err();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_queries_are_not_commands() {
        assert_eq!(parse_command("get_status", &json!({})), Ok(None));
        assert_eq!(parse_command("nope", &json!({})), Ok(None));
    }

    #[test]
    fn test_suggest_handler() {
        let value = handle_suggest(&json!({ "prompt": "a busy loading dock" })).unwrap();
        assert_eq!(value["suggestedObjects"].as_array().map(Vec::len), Some(4));

        let err = handle_suggest(&json!({ "prompt": "short" })).unwrap_err();
        assert_eq!(err.code, -32602);

        let err = handle_suggest(&json!({ "prompt": "an error-prone warehouse" })).unwrap_err();
        assert_eq!(err.code, -32603);
    }
}
