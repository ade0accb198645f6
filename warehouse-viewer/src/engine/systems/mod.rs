/// Per-frame pallet motion, expiry and trace lines.
pub mod animation_playback;

/// FPS and status overlays.
pub mod fps_tracking;
