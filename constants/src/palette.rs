pub const BELT: &str = "#333333";
pub const CONVEYOR_LEG: &str = "#666666";
pub const RACK_STRUCTURE: &str = "#a0a0a0";
pub const SHELF: &str = "#c0c0c0";
pub const PALLET: &str = "#d2b48c";

/// Default colour for primitives added from suggestions.
pub const SUGGESTED_OBJECT: &str = "#4f46e5";

/// Selected pallet.
pub const SELECTION_HIGHLIGHT: &str = "#ff0000";

/// Pallet in flight, and its trace line. Wins over the selection highlight.
pub const ANIMATION_HIGHLIGHT: &str = "#ffff00";

pub const FLOOR: &str = "#cccccc";
