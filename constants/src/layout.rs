/// Warehouse layout constants, all in world units.

/// Footprint of a single bin (x = along the rack, y = up, z = depth).
pub const BIN_SIZE: [f32; 3] = [1.2, 0.8, 1.0];

/// Vertical gap between two layers of a column.
pub const LAYER_GAP: f32 = 0.2;

/// Horizontal gap between two columns of a rack.
pub const COLUMN_GAP: f32 = 0.3;

/// Gap between neighbouring racks in the same row.
pub const RACK_GAP: f32 = 2.0;

/// Gap between rows of racks. Every aisle houses one longitudinal conveyor.
pub const AISLE_GAP: f32 = 4.0;

/// Number of racks placed on a row before wrapping.
pub const RACKS_PER_ROW: usize = 4;

/// Thickness of posts, beams and shelves.
pub const RACK_STRUCTURE_WIDTH: f32 = 0.1;

pub const FLOOR_OFFSET: f32 = 0.0;

/// Pallets are inset from their bin on x and z.
pub const PALLET_INSET: f32 = 0.1;

// Conveyor geometry
pub const CONVEYOR_HEIGHT: f32 = 1.0;
pub const BELT_WIDTH: f32 = 1.0;
pub const BELT_THICKNESS: f32 = 0.2;
pub const LEG_SIZE: f32 = 0.15;

/// Leg pairs under every longitudinal conveyor.
pub const LONGITUDINAL_LEG_COUNT: usize = 10;

/// The perpendicular conveyor gets one extra leg pair per this many units of length.
pub const PERPENDICULAR_LEG_SPACING: f32 = 5.0;

/// Default warehouse dimensions: racks, columns per rack, layers per column, bins per layer.
pub const DEFAULT_RACKS: usize = 24;
pub const DEFAULT_COLUMNS: usize = 5;
pub const DEFAULT_LAYERS: usize = 4;
pub const DEFAULT_BINS: usize = 2;

/// Probability that a generated bin holds a pallet.
pub const FILL_PROBABILITY: f64 = 0.5;

/// Labels handed out to full bins at generation time.
pub const ITEM_CATALOGUE: &[&str] = &[
    "Cardboard Boxes",
    "Bottled Water",
    "Canned Tomatoes",
    "Paper Towels",
    "Motor Oil",
    "Dog Food",
    "Garden Soil",
    "Roof Shingles",
    "Ceramic Tiles",
    "Office Chairs",
    "LED Bulbs",
    "Copper Wire",
];

/// Where primitives added from accepted suggestions appear.
pub const SUGGESTION_SPAWN: [f32; 3] = [0.0, 3.0, -8.0];

/// X spacing between consecutive suggested primitives.
pub const SUGGESTION_SPACING: f32 = 1.5;
