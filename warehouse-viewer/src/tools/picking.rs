use crate::engine::scene::scene_sync::{SceneIndex, SceneObjectTag};
use crate::tools::commands::{CommandSource, WarehouseCommand, WarehouseCommandEvent};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::CLICK_TOLERANCE_NDC;
use warehouse_layout::PrimitiveKind;

/// Cursor position in normalised device coordinates, y up.
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        -(cursor.y / window_size.y * 2.0 - 1.0),
    )
}

/// A press and release close enough together to be a click rather than a drag.
pub fn is_click(press: Vec2, release: Vec2) -> bool {
    (press.x - release.x).abs() < CLICK_TOLERANCE_NDC
        && (press.y - release.y).abs() < CLICK_TOLERANCE_NDC
}

// Slab method. Returns the entry distance, or the exit distance when starting inside.
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let direction = ray_direction[axis];
        if direction == 0.0 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / direction;
        let (mut t0, mut t1) = ((min[axis] - origin) * inv, (max[axis] - origin) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Turns clicks into selection commands: a pallet selects itself, anything else
/// (including empty space) clears the selection.
pub fn pick_on_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    objects: Query<(Entity, &GlobalTransform, &SceneObjectTag)>,
    index: Res<SceneIndex>,
    mut press: Local<Option<Vec2>>,
    mut command_events: EventWriter<WarehouseCommandEvent>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let ndc = cursor_to_ndc(cursor, Vec2::new(window.width(), window.height()));

    if mouse_button.just_pressed(MouseButton::Left) {
        *press = Some(ndc);
        return;
    }
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }
    let Some(pressed_at) = press.take() else {
        return;
    };
    if !is_click(pressed_at, ndc) {
        return;
    }

    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    let direction = ray.direction.as_vec3();

    let closest = objects
        .iter()
        .filter_map(|(entity, transform, tag)| {
            let centre = transform.translation();
            ray_aabb_hit_t(
                ray.origin,
                direction,
                centre - tag.half_extents,
                centre + tag.half_extents,
            )
            .map(|t| (t, entity, tag.kind))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let selection = closest.and_then(|(_, entity, kind)| {
        (kind == PrimitiveKind::Pallet)
            .then(|| index.id_of(entity).map(str::to_string))
            .flatten()
    });
    command_events.write(WarehouseCommandEvent::new(
        WarehouseCommand::SelectPallet(selection),
        CommandSource::Pointer,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_box_in_front() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn test_ray_misses_and_behind() {
        assert_eq!(
            ray_aabb_hit_t(Vec3::new(5.0, 0.0, -10.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0)),
            None
        );
        assert_eq!(
            ray_aabb_hit_t(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0)),
            None
        );
    }

    #[test]
    fn test_ray_from_inside_uses_exit() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(2.0));
        assert_eq!(t, Some(2.0));
    }

    #[test]
    fn test_click_tolerance() {
        let window = Vec2::new(800.0, 600.0);
        let press = cursor_to_ndc(Vec2::new(400.0, 300.0), window);
        assert_eq!(press, Vec2::ZERO);

        assert!(is_click(press, cursor_to_ndc(Vec2::new(401.0, 301.0), window)));
        assert!(!is_click(press, cursor_to_ndc(Vec2::new(420.0, 300.0), window)));
    }
}
