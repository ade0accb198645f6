/// Warehouse hierarchy and its random generator.
use crate::config::WarehouseDimensions;
use constants::layout::{FILL_PROBABILITY, ITEM_CATALOGUE};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest storage unit. Holds zero or one pallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    pub id: String,
    pub name: String,
    pub is_full: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// Bins of one shelf level; the index is the slot along the depth axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub bins: Vec<Bin>,
}

/// Layers stacked bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    pub layers: Vec<Layer>,
}

/// Columns left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
}

impl Rack {
    /// Layers of the first column, standing in for every column.
    pub fn layer_count(&self) -> usize {
        self.columns.first().map_or(0, |column| column.layers.len())
    }

    /// Bins of the first layer of the first column, standing in for every layer.
    pub fn bins_per_layer(&self) -> usize {
        self.columns
            .first()
            .and_then(|column| column.layers.first())
            .map_or(0, |layer| layer.bins.len())
    }
}

/// Root aggregate. Replaced wholesale on regeneration, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub racks: Vec<Rack>,
}

impl Warehouse {
    /// Every bin in rack, column, layer, slot order.
    pub fn bins(&self) -> impl Iterator<Item = &Bin> {
        self.racks
            .iter()
            .flat_map(|rack| &rack.columns)
            .flat_map(|column| &column.layers)
            .flat_map(|layer| &layer.bins)
    }

    pub fn full_bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins().filter(|bin| bin.is_full)
    }

    pub fn bin_count(&self) -> usize {
        self.bins().count()
    }

    pub fn full_bin_count(&self) -> usize {
        self.full_bins().count()
    }

    pub fn find_bin(&self, id: &str) -> Option<&Bin> {
        self.bins().find(|bin| bin.id == id)
    }
}

/// Generates a warehouse with the thread-local RNG.
pub fn generate(
    num_racks: usize,
    num_columns_per_rack: usize,
    num_layers_per_column: usize,
    num_bins_per_layer: usize,
) -> Warehouse {
    let dimensions = WarehouseDimensions::new(
        num_racks,
        num_columns_per_rack,
        num_layers_per_column,
        num_bins_per_layer,
    );
    generate_with_rng(&dimensions, &mut rand::thread_rng())
}

/// Generates a fully rectangular warehouse. Fullness is an independent coin flip per bin,
/// and ids come from `rng` too, so a seeded RNG reproduces the warehouse exactly.
pub fn generate_with_rng<R: Rng + ?Sized>(dimensions: &WarehouseDimensions, rng: &mut R) -> Warehouse {
    let racks = (0..dimensions.racks)
        .map(|i| {
            let id = random_id(rng);
            let columns = (0..dimensions.columns)
                .map(|j| generate_column(j, dimensions, rng))
                .collect();
            Rack {
                id,
                name: format!("Rack {}", i + 1),
                columns,
            }
        })
        .collect::<Vec<_>>();

    let warehouse = Warehouse { racks };
    tracing::info!(
        racks = dimensions.racks,
        bins = warehouse.bin_count(),
        full = warehouse.full_bin_count(),
        "generated warehouse"
    );
    warehouse
}

fn generate_column<R: Rng + ?Sized>(index: usize, dimensions: &WarehouseDimensions, rng: &mut R) -> Column {
    let id = random_id(rng);
    let layers = (0..dimensions.layers)
        .map(|k| {
            let id = random_id(rng);
            let bins = (0..dimensions.bins)
                .map(|l| generate_bin(l, rng))
                .collect();
            Layer {
                id,
                name: format!("Layer {}", k + 1),
                bins,
            }
        })
        .collect();

    Column {
        id,
        name: format!("Column {}", index + 1),
        layers,
    }
}

fn generate_bin<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Bin {
    let id = random_id(rng);
    let is_full = rng.gen_bool(FILL_PROBABILITY);
    let item = if is_full {
        ITEM_CATALOGUE.choose(rng).map(|item| item.to_string())
    } else {
        None
    };

    Bin {
        id,
        name: format!("Bin {}", index + 1),
        is_full,
        item,
    }
}

/// Version 4 UUID built from the caller's RNG.
pub(crate) fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.r#gen();
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

/// Fresh id for objects created outside generation.
pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn seeded(dimensions: WarehouseDimensions, seed: u64) -> Warehouse {
        generate_with_rng(&dimensions, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_generate_is_rectangular() {
        let warehouse = generate(3, 2, 4, 5);

        assert_eq!(warehouse.racks.len(), 3);
        for rack in &warehouse.racks {
            assert_eq!(rack.columns.len(), 2);
            for column in &rack.columns {
                assert_eq!(column.layers.len(), 4);
                for layer in &column.layers {
                    assert_eq!(layer.bins.len(), 5);
                }
            }
        }
        assert_eq!(warehouse.bin_count(), 120);
    }

    #[test]
    fn test_names_follow_position() {
        let warehouse = seeded(WarehouseDimensions::new(2, 2, 2, 2), 1);

        assert_eq!(warehouse.racks[1].name, "Rack 2");
        assert_eq!(warehouse.racks[0].columns[1].name, "Column 2");
        assert_eq!(warehouse.racks[0].columns[0].layers[1].name, "Layer 2");
        assert_eq!(warehouse.racks[0].columns[0].layers[0].bins[1].name, "Bin 2");
        // Names repeat across racks; only ids are unique.
        assert_eq!(
            warehouse.racks[0].columns[0].name,
            warehouse.racks[1].columns[0].name
        );
    }

    #[test]
    fn test_ids_are_unique_across_levels() {
        let warehouse = seeded(WarehouseDimensions::new(4, 3, 2, 2), 7);

        let mut ids = HashSet::new();
        for rack in &warehouse.racks {
            assert!(ids.insert(rack.id.clone()));
            for column in &rack.columns {
                assert!(ids.insert(column.id.clone()));
                for layer in &column.layers {
                    assert!(ids.insert(layer.id.clone()));
                    for bin in &layer.bins {
                        assert!(ids.insert(bin.id.clone()));
                    }
                }
            }
        }
        assert_eq!(ids.len(), 4 + 12 + 24 + 48);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let dimensions = WarehouseDimensions::new(5, 2, 3, 2);
        assert_eq!(seeded(dimensions, 42), seeded(dimensions, 42));
        assert_ne!(seeded(dimensions, 42), seeded(dimensions, 43));
    }

    #[test]
    fn test_fill_rate_is_roughly_half() {
        let warehouse = seeded(WarehouseDimensions::default(), 2024);
        let full = warehouse.full_bin_count();

        assert_eq!(warehouse.bin_count(), 960);
        assert!((380..=580).contains(&full), "full bins: {full}");
    }

    #[test]
    fn test_only_full_bins_carry_items() {
        let warehouse = seeded(WarehouseDimensions::new(4, 3, 3, 2), 9);

        for bin in warehouse.bins() {
            assert_eq!(bin.is_full, bin.item.is_some(), "bin {}", bin.id);
        }
    }

    #[test]
    fn test_zero_racks_is_empty() {
        let warehouse = generate(0, 5, 4, 2);
        assert!(warehouse.racks.is_empty());
        assert_eq!(warehouse.full_bin_count(), 0);
    }

    #[test]
    fn test_find_bin_by_id() {
        let warehouse = seeded(WarehouseDimensions::new(2, 2, 2, 2), 3);
        let target = warehouse.racks[1].columns[0].layers[1].bins[0].clone();

        assert_eq!(warehouse.find_bin(&target.id), Some(&target));
        assert_eq!(warehouse.find_bin("missing"), None);
    }
}
