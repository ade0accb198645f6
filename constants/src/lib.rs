//! Constants shared between the layout library and the warehouse viewer.

/// Rack, bin and conveyor dimensions used by the layout compiler.
pub mod layout;

/// Motion planner timings.
pub mod motion;

/// Hex colours for every primitive the compiler emits.
pub mod palette;

/// Camera, lighting and highlight settings for the viewer.
pub mod render_settings;
