/// Warehouse commands and the single system that applies them to the session.
pub mod commands;

/// Pointer picking of scene primitives.
pub mod picking;
