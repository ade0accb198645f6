// Leg durations of the pallet path, in milliseconds.

/// Lift onto the nearest aisle conveyor.
pub const LIFT_TO_CONVEYOR_MS: u64 = 4000;
/// Ride the aisle conveyor to the perpendicular conveyor.
pub const ALONG_CONVEYOR_MS: u64 = 5000;
/// Drop onto the perpendicular conveyor.
pub const TRANSFER_MS: u64 = 2000;
/// Ride the perpendicular conveyor to the drop-off point.
pub const TO_DROP_OFF_MS: u64 = 7000;

/// Time an animation stays in the active set after its last segment ends.
pub const EXPIRY_GRACE_MS: u64 = 500;

/// Drop-off sits this fraction of the perpendicular belt's length past its centre.
pub const DROP_OFF_FRACTION: f32 = 0.25;
