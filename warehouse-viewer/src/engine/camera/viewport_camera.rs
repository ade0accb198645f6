use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;
use constants::render_settings::{
    CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_START, FOCUS_LERP, FOCUS_OFFSET,
};
use warehouse_layout::SceneBounds;

#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Where the focus point is gliding to, if anywhere.
    pub focus_target: Option<Vec3>,
    pub distance_target: Option<f32>,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::from_array(CAMERA_START), Vec3::ZERO)
    }
}

impl ViewportCamera {
    /// Orbit parameters for an eye at `eye` looking at `focus`.
    pub fn looking_from(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let distance = offset.length().max(CAMERA_MIN_DISTANCE);
        Self {
            focus_point: focus,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: -(offset.y / distance).clamp(-1.0, 1.0).asin(),
            focus_target: None,
            distance_target: None,
        }
    }

    /// Frames the whole scene from the start direction.
    pub fn with_bounds(bounds: &SceneBounds) -> Self {
        if bounds.is_empty() {
            return Self::default();
        }
        let center = Vec3::from_array(bounds.center());
        let direction = Vec3::from_array(CAMERA_START).normalize_or_zero();
        let distance = (bounds.diagonal() * 0.6).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        Self::looking_from(center + direction * distance, center)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn eye(&self) -> Vec3 {
        self.focus_point + self.rotation() * Vec3::Z * self.distance
    }

    /// Starts gliding towards `target`, ending at the standard pallet close-up distance.
    pub fn focus_on(&mut self, target: Vec3) {
        self.focus_target = Some(target);
        self.distance_target = Some(Vec3::from_array(FOCUS_OFFSET).length());
    }

    fn cancel_focus(&mut self) {
        self.focus_target = None;
        self.distance_target = None;
    }

    /// One frame of the focus glide.
    pub fn step_focus(&mut self) {
        if let Some(target) = self.focus_target {
            self.focus_point = self.focus_point.lerp(target, FOCUS_LERP);
            if self.focus_point.distance(target) < 0.01 {
                self.focus_point = target;
                self.focus_target = None;
            }
        }
        if let Some(distance) = self.distance_target {
            self.distance += (distance - self.distance) * FOCUS_LERP;
            if (self.distance - distance).abs() < 0.01 {
                self.distance = distance;
                self.distance_target = None;
            }
        }
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    viewport: Option<ResMut<ViewportCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let Some(mut viewport) = viewport else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        viewport.yaw -= mouse_delta.x * yaw_sens;
        viewport.pitch = (viewport.pitch - mouse_delta.y * pitch_sens).clamp(-1.55, 1.55);
    }

    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let rotation = viewport.rotation();
        let pan_speed = viewport.distance * 0.002;
        let delta = (rotation * Vec3::X * -mouse_delta.x + rotation * Vec3::Y * mouse_delta.y)
            * pan_speed;
        viewport.cancel_focus();
        viewport.focus_point += delta;
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        viewport.distance_target = None;
        viewport.distance = (viewport.distance * (1.0 - scroll_accum * 0.1))
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    viewport.step_focus();

    camera_transform.translation = viewport.eye();
    camera_transform.look_at(viewport.focus_point, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye_matches_start_position() {
        let camera = ViewportCamera::default();
        assert!(camera.eye().distance(Vec3::from_array(CAMERA_START)) < 1e-3);
    }

    #[test]
    fn test_focus_glide_converges() {
        let mut camera = ViewportCamera::default();
        let target = Vec3::new(10.0, 0.4, 2.0);
        camera.focus_on(target);

        for _ in 0..500 {
            camera.step_focus();
        }
        assert_eq!(camera.focus_point, target);
        assert!(camera.focus_target.is_none());
        assert!((camera.distance - Vec3::from_array(FOCUS_OFFSET).length()).abs() < 1e-3);
    }

    #[test]
    fn test_empty_bounds_use_default_view() {
        let camera = ViewportCamera::with_bounds(&SceneBounds::new());
        assert_eq!(camera.focus_point, Vec3::ZERO);
    }
}
