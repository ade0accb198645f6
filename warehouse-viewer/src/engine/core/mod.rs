//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration and the loading to running
//! transition for both native and WASM targets.

/// Plugin registration and system scheduling.
pub mod app_setup;

/// Application states and the session resource.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
