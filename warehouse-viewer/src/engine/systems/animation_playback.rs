use crate::engine::core::app_state::SessionState;
use crate::engine::scene::primitives::parse_hex_color;
use crate::engine::scene::scene_sync::{SceneIndex, SceneObjectTag};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use constants::palette;
use warehouse_layout::trace_path;

/// Moves animating pallets, retires expired animations and returns their pallets home.
pub fn advance_animations(
    time: Res<Time>,
    mut session: ResMut<SessionState>,
    index: Res<SceneIndex>,
    mut transforms: Query<&mut Transform, With<SceneObjectTag>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let now = time.elapsed();

    for (pallet_id, position) in session.animations().positions(now) {
        let Some(entity) = index.entity(&pallet_id) else {
            continue;
        };
        if let Ok(mut transform) = transforms.get_mut(entity) {
            transform.translation = Vec3::from_array(position);
        }
    }

    // Expiry is bookkeeping only; it must not trigger a scene resync.
    let retired = session.bypass_change_detection().tick(now);
    for state in retired {
        if let (Some(entity), Some(home)) = (
            index.entity(&state.pallet_id),
            index.home_position(&state.pallet_id),
        ) {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                transform.translation = home;
            }
        }

        info!("Animation {} finished for pallet {}", state.id, state.pallet_id);
        rpc_interface.send_notification(
            "animation_finished",
            serde_json::json!({
                "animationId": state.id,
                "palletId": state.pallet_id,
            }),
        );
    }
}

/// Trace line along every active path.
pub fn draw_animation_traces(mut gizmos: Gizmos, session: Res<SessionState>) {
    let color = parse_hex_color(palette::ANIMATION_HIGHLIGHT);
    for entry in session.animations().iter() {
        gizmos.linestrip(
            trace_path(&entry.state).into_iter().map(Vec3::from_array),
            color,
        );
    }
}
