use crate::engine::core::app_state::{FpsText, SessionState, StatusText};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

/// Selection, search and animation summary in the top-left corner.
pub fn status_text_update_system(
    session: Res<SessionState>,
    time: Res<Time>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let selected = match session.selected_details() {
        Some(details) => format!(
            "Selected: {} ({}) at [{:.1}, {:.1}, {:.1}]",
            details.id.chars().take(8).collect::<String>(),
            details.item.as_deref().unwrap_or("unlabelled"),
            details.position[0],
            details.position[1],
            details.position[2],
        ),
        None => "Selected: none".to_string(),
    };
    let animating = session.animations().len();
    let finished = session
        .animations()
        .iter()
        .filter(|entry| entry.is_finished(time.elapsed()))
        .count();

    let status = format!(
        "Racks: {}  Objects: {}\nAnimating: {} ({} arrived)\nSearch: \"{}\"\n{}\n\n\
         [R] regenerate  [Space] animate  [Del] clear  [Esc] deselect",
        session.warehouse().racks.len(),
        session.objects().len(),
        animating,
        finished,
        session.search_term(),
        selected,
    );

    for mut text in &mut query {
        if text.0 != status {
            text.0 = status.clone();
        }
    }
}
