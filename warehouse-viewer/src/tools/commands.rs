use crate::engine::camera::viewport_camera::ViewportCamera;
use crate::engine::core::app_state::SessionState;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use warehouse_layout::PrimitiveKind;

/// Every way the outside world can change the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum WarehouseCommand {
    Regenerate,
    AnimatePallet,
    ClearScene,
    Search(String),
    /// `None` clears the selection.
    SelectPallet(Option<String>),
    AddSuggestedObject { label: String, kind: PrimitiveKind },
}

impl WarehouseCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Regenerate => "regenerate",
            Self::AnimatePallet => "animate_pallet",
            Self::ClearScene => "clear_scene",
            Self::Search(_) => "search",
            Self::SelectPallet(_) => "select_pallet",
            Self::AddSuggestedObject { .. } => "add_suggested_object",
        }
    }
}

/// Origin of a command, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Keyboard,
    Pointer,
    Rpc,
}

#[derive(Event, Debug, Clone)]
pub struct WarehouseCommandEvent {
    pub command: WarehouseCommand,
    pub source: CommandSource,
}

impl WarehouseCommandEvent {
    pub fn new(command: WarehouseCommand, source: CommandSource) -> Self {
        Self { command, source }
    }
}

/// The only system that mutates the session. Commands apply in arrival order, each one
/// completely before the next.
pub fn apply_warehouse_commands(
    mut events: EventReader<WarehouseCommandEvent>,
    mut session: ResMut<SessionState>,
    mut viewport: ResMut<ViewportCamera>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    time: Res<Time>,
) {
    for event in events.read() {
        info!("Applying {} from {:?}", event.command.name(), event.source);
        let previous_selection = session.selected_pallet().map(str::to_string);

        match &event.command {
            WarehouseCommand::Regenerate => session.regenerate(),
            WarehouseCommand::ClearScene => session.clear_scene(),
            WarehouseCommand::AnimatePallet => match session.start_animation(time.elapsed()) {
                Some(state) => rpc_interface.send_notification(
                    "animation_started",
                    serde_json::json!({
                        "animationId": state.id,
                        "palletId": state.pallet_id,
                        "totalDurationMs": state.total_duration_ms,
                    }),
                ),
                None => warn!("No pallet available to animate"),
            },
            WarehouseCommand::Search(query) => {
                session.set_search(query);
            }
            WarehouseCommand::SelectPallet(id) => {
                session.select(id.as_deref());
            }
            WarehouseCommand::AddSuggestedObject { label, kind } => {
                let id = session.accept_suggestion(label, *kind);
                rpc_interface.send_notification(
                    "suggested_object_added",
                    serde_json::json!({ "id": id, "label": label, "kind": kind.name() }),
                );
            }
        }

        if session.selected_pallet() != previous_selection.as_deref() {
            let details = session.selected_details();
            if let Some(details) = &details {
                viewport.focus_on(Vec3::from_array(details.position));
            }
            rpc_interface.send_notification(
                "selection_changed",
                serde_json::json!({ "selection": details }),
            );
        }
    }
}

/// Native keyboard shortcuts.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut command_events: EventWriter<WarehouseCommandEvent>,
) {
    let bindings = [
        (KeyCode::KeyR, WarehouseCommand::Regenerate),
        (KeyCode::Space, WarehouseCommand::AnimatePallet),
        (KeyCode::Delete, WarehouseCommand::ClearScene),
        (KeyCode::Escape, WarehouseCommand::SelectPallet(None)),
    ];
    for (key, command) in bindings {
        if keyboard.just_pressed(key) {
            command_events.write(WarehouseCommandEvent::new(command, CommandSource::Keyboard));
        }
    }
}

/// Placeholder system for WASM builds where the host page drives commands over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_keyboard_shortcuts() {}
