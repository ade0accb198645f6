/// Runtime configuration for warehouse generation and layout.
///
/// Every field falls back to the shared defaults in [`constants::layout`], so a config file
/// only needs to name what it overrides.
use crate::error::LayoutError;
use constants::layout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Size of the warehouse hierarchy at each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseDimensions {
    pub racks: usize,
    pub columns: usize,
    pub layers: usize,
    pub bins: usize,
}

impl WarehouseDimensions {
    pub fn new(racks: usize, columns: usize, layers: usize, bins: usize) -> Self {
        Self {
            racks,
            columns,
            layers,
            bins,
        }
    }

    /// Total number of bins in a warehouse of this shape.
    pub fn bin_count(&self) -> usize {
        self.racks * self.columns * self.layers * self.bins
    }

    /// Rejects any zero dimension.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.racks == 0 || self.columns == 0 || self.layers == 0 || self.bins == 0 {
            return Err(LayoutError::InvalidDimensions {
                racks: self.racks,
                columns: self.columns,
                layers: self.layers,
                bins: self.bins,
            });
        }
        Ok(())
    }
}

impl Default for WarehouseDimensions {
    fn default() -> Self {
        Self {
            racks: layout::DEFAULT_RACKS,
            columns: layout::DEFAULT_COLUMNS,
            layers: layout::DEFAULT_LAYERS,
            bins: layout::DEFAULT_BINS,
        }
    }
}

/// Geometry constants consumed by the layout compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub bin_size: [f32; 3],
    pub layer_gap: f32,
    pub column_gap: f32,
    pub rack_gap: f32,
    pub aisle_gap: f32,
    pub racks_per_row: usize,
    pub structure_width: f32,
    pub floor_offset: f32,
    pub pallet_inset: f32,
    pub conveyor_height: f32,
    pub belt_width: f32,
    pub belt_thickness: f32,
    pub leg_size: f32,
    pub longitudinal_leg_count: usize,
    pub perpendicular_leg_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bin_size: layout::BIN_SIZE,
            layer_gap: layout::LAYER_GAP,
            column_gap: layout::COLUMN_GAP,
            rack_gap: layout::RACK_GAP,
            aisle_gap: layout::AISLE_GAP,
            racks_per_row: layout::RACKS_PER_ROW,
            structure_width: layout::RACK_STRUCTURE_WIDTH,
            floor_offset: layout::FLOOR_OFFSET,
            pallet_inset: layout::PALLET_INSET,
            conveyor_height: layout::CONVEYOR_HEIGHT,
            belt_width: layout::BELT_WIDTH,
            belt_thickness: layout::BELT_THICKNESS,
            leg_size: layout::LEG_SIZE,
            longitudinal_leg_count: layout::LONGITUDINAL_LEG_COUNT,
            perpendicular_leg_spacing: layout::PERPENDICULAR_LEG_SPACING,
        }
    }
}

impl LayoutConfig {
    /// Racks per row, never zero.
    pub fn row_length(&self) -> usize {
        self.racks_per_row.max(1)
    }

    /// Number of longitudinal conveyors a warehouse with `racks` racks compiles to.
    pub fn longitudinal_conveyor_count(&self, racks: usize) -> usize {
        racks.div_ceil(self.row_length()) + 1
    }
}

/// Top-level configuration file: what to generate and how to lay it out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    pub dimensions: WarehouseDimensions,
    pub layout: LayoutConfig,
}

impl WarehouseConfig {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(json)?;
        config.dimensions.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, LayoutError> {
        let json = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config =
            WarehouseConfig::from_json_str(r#"{ "dimensions": { "racks": 6 }, "layout": { "aisle_gap": 6.0 } }"#)
                .unwrap();

        assert_eq!(config.dimensions.racks, 6);
        assert_eq!(config.dimensions.columns, layout::DEFAULT_COLUMNS);
        assert_eq!(config.layout.aisle_gap, 6.0);
        assert_eq!(config.layout.bin_size, layout::BIN_SIZE);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = WarehouseConfig::from_json_str(r#"{ "dimensions": { "bins": 0 } }"#).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidDimensions { bins: 0, .. }));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = WarehouseConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }

    #[test]
    fn test_longitudinal_conveyor_count() {
        let config = LayoutConfig::default();
        assert_eq!(config.longitudinal_conveyor_count(24), 7);
        assert_eq!(config.longitudinal_conveyor_count(5), 3);
        assert_eq!(config.longitudinal_conveyor_count(1), 2);
    }

    #[test]
    fn test_default_dimensions_bin_count() {
        assert_eq!(WarehouseDimensions::default().bin_count(), 960);
    }
}
