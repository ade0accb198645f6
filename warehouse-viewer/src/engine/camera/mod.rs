//! Orbit camera for warehouse navigation.
//!
//! Left drag orbits, right drag pans, the wheel zooms. Selecting a pallet glides the
//! focus point towards it.

/// Viewport camera resource and controller system.
pub mod viewport_camera;
