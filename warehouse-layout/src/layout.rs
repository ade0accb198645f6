/// Layout compiler: warehouse hierarchy to flat scene primitives.
///
/// Racks are laid out left to right and wrap to a new row every `racks_per_row` racks.
/// Every aisle (before the first row, between rows, after the last row) gets a longitudinal
/// conveyor sized to the widest row, and a single perpendicular conveyor crosses all of
/// them at a fixed X offset. Placement is a cheap sequential pass; the per-rack geometry is
/// then emitted in parallel and stitched back together in walk order, so the output is
/// identical to a purely sequential walk.
use crate::config::LayoutConfig;
use crate::scene_object::{
    CONVEYOR_BELT_PREFIX, CONVEYOR_LEG_PREFIX, PERPENDICULAR_BELT_PREFIX, PrimitiveKind,
    SceneObject,
};
use crate::warehouse::{Rack, Warehouse};
use constants::palette;
use rayon::prelude::*;

/// Outer dimensions of a rack, taken from its first column and layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackFootprint {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

/// Where a rack lands: its cursor position and footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackPlacement {
    pub rack_index: usize,
    pub x: f32,
    pub z: f32,
    pub footprint: RackFootprint,
}

/// One step of the layout walk, in emission order.
#[derive(Debug, Clone, PartialEq)]
enum LayoutStep {
    Conveyor { suffix: String, z: f32 },
    Rack(RackPlacement),
}

/// Sequential placement result.
#[derive(Debug, Clone)]
struct LayoutPlan {
    steps: Vec<LayoutStep>,
    placements: Vec<RackPlacement>,
    max_row_width: f32,
    last_conveyor_z: f32,
}

/// Compiles warehouses with a fixed set of layout constants.
#[derive(Debug, Clone, Default)]
pub struct LayoutCompiler {
    config: LayoutConfig,
}

/// Compiles with the default layout constants.
pub fn compile(warehouse: &Warehouse) -> Vec<SceneObject> {
    LayoutCompiler::default().compile(warehouse)
}

impl LayoutCompiler {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Emits every primitive of the warehouse. Pure: the same warehouse always compiles to
    /// the same objects in the same order.
    pub fn compile(&self, warehouse: &Warehouse) -> Vec<SceneObject> {
        let plan = self.plan(warehouse);

        let mut rack_objects: Vec<Vec<SceneObject>> = plan
            .placements
            .par_iter()
            .map(|placement| self.rack_objects(&warehouse.racks[placement.rack_index], placement))
            .collect();

        let mut objects = Vec::new();
        let mut racks_emitted = 0;
        for step in &plan.steps {
            match step {
                LayoutStep::Conveyor { suffix, z } => {
                    self.push_longitudinal_conveyor(&mut objects, suffix, *z, plan.max_row_width)
                }
                LayoutStep::Rack(_) => {
                    objects.append(&mut rack_objects[racks_emitted]);
                    racks_emitted += 1;
                }
            }
        }

        let perpendicular_x = -self.config.rack_gap;
        let start_z = -self.config.aisle_gap;
        let end_z = plan.last_conveyor_z + self.config.aisle_gap;
        self.push_perpendicular_conveyor(&mut objects, perpendicular_x, start_z, end_z);

        tracing::debug!(
            racks = warehouse.racks.len(),
            objects = objects.len(),
            max_row_width = plan.max_row_width,
            "compiled warehouse layout"
        );
        objects
    }

    /// Rack dimensions from the first column and layer. Racks without columns or layers
    /// measure zero along the missing axes.
    pub fn footprint(&self, rack: &Rack) -> RackFootprint {
        let [bin_x, bin_y, bin_z] = self.config.bin_size;
        let columns = rack.columns.len();
        let layers = rack.layer_count();

        let width = if columns == 0 {
            0.0
        } else {
            columns as f32 * (bin_x + self.config.column_gap) - self.config.column_gap
        };
        let height = if layers == 0 {
            0.0
        } else {
            (layers - 1) as f32 * (bin_y + self.config.layer_gap) + bin_y
        };

        RackFootprint {
            width,
            depth: rack.bins_per_layer() as f32 * bin_z,
            height,
        }
    }

    /// Widest row of racks including the trailing rack gaps. Partial rows count too.
    pub fn max_row_width(&self, warehouse: &Warehouse) -> f32 {
        warehouse
            .racks
            .chunks(self.config.row_length())
            .map(|row| {
                row.iter()
                    .map(|rack| self.footprint(rack).width + self.config.rack_gap)
                    .sum::<f32>()
            })
            .fold(0.0, f32::max)
    }

    fn plan(&self, warehouse: &Warehouse) -> LayoutPlan {
        let racks_per_row = self.config.row_length();
        let aisle_gap = self.config.aisle_gap;

        let mut steps = vec![LayoutStep::Conveyor {
            suffix: "original".to_string(),
            z: -aisle_gap / 2.0,
        }];
        let mut placements = Vec::with_capacity(warehouse.racks.len());

        let mut current_x = 0.0;
        let mut current_z = aisle_gap / 2.0;
        let mut max_depth_in_row: f32 = 0.0;

        for (rack_index, rack) in warehouse.racks.iter().enumerate() {
            let footprint = self.footprint(rack);

            if rack_index > 0 && rack_index % racks_per_row == 0 {
                current_x = 0.0;
                current_z += max_depth_in_row + aisle_gap;
                max_depth_in_row = 0.0;
                steps.push(LayoutStep::Conveyor {
                    suffix: (rack_index / racks_per_row).to_string(),
                    z: current_z - aisle_gap / 2.0,
                });
            }

            max_depth_in_row = max_depth_in_row.max(footprint.depth);

            let placement = RackPlacement {
                rack_index,
                x: current_x,
                z: current_z,
                footprint,
            };
            steps.push(LayoutStep::Rack(placement));
            placements.push(placement);

            current_x += footprint.width + self.config.rack_gap;
        }

        let last_conveyor_z = current_z + max_depth_in_row + aisle_gap / 2.0;
        steps.push(LayoutStep::Conveyor {
            suffix: "last".to_string(),
            z: last_conveyor_z,
        });

        LayoutPlan {
            steps,
            placements,
            max_row_width: self.max_row_width(warehouse),
            last_conveyor_z,
        }
    }

    /// Posts, beams, shelves and pallets of one rack.
    fn rack_objects(&self, rack: &Rack, placement: &RackPlacement) -> Vec<SceneObject> {
        let mut objects = Vec::new();
        if rack.columns.is_empty() {
            return objects;
        }

        let [bin_x, bin_y, bin_z] = self.config.bin_size;
        let column_gap = self.config.column_gap;
        let layer_gap = self.config.layer_gap;
        let structure = self.config.structure_width;
        let RackFootprint {
            width,
            depth,
            height,
        } = placement.footprint;
        let (x, z) = (placement.x, placement.z);

        // Front (j = 0) and back (j = 1) faces of the rack.
        let face_z = |j: usize| z + j as f32 * (depth - structure) - depth / 2.0 + structure / 2.0;
        let beam_x = x + width / 2.0 - bin_x / 2.0;

        for i in 0..=rack.columns.len() {
            for j in 0..2 {
                objects.push(
                    SceneObject::new(
                        format!("{}-vpost-{}-{}", rack.id, i, j),
                        PrimitiveKind::Box,
                        [
                            x + i as f32 * (bin_x + column_gap) - column_gap / 2.0 - bin_x / 2.0,
                            height / 2.0,
                            face_z(j),
                        ],
                        palette::RACK_STRUCTURE,
                    )
                    .with_size([structure, height, structure]),
                );
            }
        }

        for i in 0..rack.layer_count() {
            let layer_y = i as f32 * (bin_y + layer_gap);
            for j in 0..2 {
                objects.push(
                    SceneObject::new(
                        format!("{}-hbeam-front-back-{}-{}", rack.id, i, j),
                        PrimitiveKind::Box,
                        [beam_x, layer_y + bin_y / 2.0 - structure / 2.0, face_z(j)],
                        palette::RACK_STRUCTURE,
                    )
                    .with_size([width, structure, structure]),
                );
            }
        }

        for j in 0..2 {
            objects.push(
                SceneObject::new(
                    format!("{}-hbeam-bottom-{}", rack.id, j),
                    PrimitiveKind::Box,
                    [beam_x, structure / 2.0, face_z(j)],
                    palette::RACK_STRUCTURE,
                )
                .with_size([width, structure, structure]),
            );
        }

        for (column_index, column) in rack.columns.iter().enumerate() {
            let column_x = x + column_index as f32 * (bin_x + column_gap);

            for (layer_index, layer) in column.layers.iter().enumerate() {
                let layer_y =
                    self.config.floor_offset + bin_y / 2.0 + layer_index as f32 * (bin_y + layer_gap);

                objects.push(
                    SceneObject::new(
                        format!("{}-shelf", layer.id),
                        PrimitiveKind::Box,
                        [column_x, layer_y - bin_y / 2.0 - structure / 2.0, z],
                        palette::SHELF,
                    )
                    .with_size([bin_x, structure, depth]),
                );

                for (bin_index, bin) in layer.bins.iter().enumerate() {
                    if !bin.is_full {
                        continue;
                    }
                    let offset_z = bin_index as f32 * bin_z - depth / 2.0 + bin_z / 2.0;
                    objects.push(
                        SceneObject::new(
                            bin.id.clone(),
                            PrimitiveKind::Pallet,
                            [column_x, layer_y, z + offset_z],
                            palette::PALLET,
                        )
                        .with_size([
                            bin_x - self.config.pallet_inset,
                            bin_y,
                            bin_z - self.config.pallet_inset,
                        ]),
                    );
                }
            }
        }

        objects
    }

    fn leg_height(&self) -> f32 {
        self.config.conveyor_height - self.config.belt_thickness / 2.0
    }

    /// Belt along the X axis at `z`, plus its evenly spaced leg pairs.
    fn push_longitudinal_conveyor(
        &self,
        objects: &mut Vec<SceneObject>,
        suffix: &str,
        z: f32,
        belt_length: f32,
    ) {
        let rack_gap = self.config.rack_gap;
        let belt_width = self.config.belt_width;
        let leg = self.config.leg_size;
        let leg_height = self.leg_height();

        objects.push(
            SceneObject::new(
                format!("{CONVEYOR_BELT_PREFIX}{suffix}"),
                PrimitiveKind::Box,
                [belt_length / 2.0 - rack_gap / 2.0, self.config.conveyor_height, z],
                palette::BELT,
            )
            .with_size([belt_length, self.config.belt_thickness, belt_width]),
        );

        let leg_count = self.config.longitudinal_leg_count.max(2);
        for i in 0..leg_count {
            let leg_x = i as f32 / (leg_count - 1) as f32 * (belt_length - leg) + leg / 2.0;
            for (side, leg_z) in [
                (1, z - belt_width / 2.0 - leg / 2.0),
                (2, z + belt_width / 2.0 + leg / 2.0),
            ] {
                objects.push(
                    SceneObject::new(
                        format!("{CONVEYOR_LEG_PREFIX}{suffix}-{i}-{side}"),
                        PrimitiveKind::Box,
                        [leg_x - rack_gap / 2.0, leg_height / 2.0, leg_z],
                        palette::CONVEYOR_LEG,
                    )
                    .with_size([leg, leg_height, leg]),
                );
            }
        }
    }

    /// Belt along the Z axis crossing every aisle. Leg pairs scale with its length.
    fn push_perpendicular_conveyor(
        &self,
        objects: &mut Vec<SceneObject>,
        x: f32,
        start_z: f32,
        end_z: f32,
    ) {
        let belt_length = (end_z - start_z).abs();
        let belt_width = self.config.belt_width;
        let leg = self.config.leg_size;
        let leg_height = self.leg_height();

        objects.push(
            SceneObject::new(
                format!("{PERPENDICULAR_BELT_PREFIX}-{x}"),
                PrimitiveKind::Box,
                [x, self.config.conveyor_height, start_z + belt_length / 2.0],
                palette::BELT,
            )
            .with_size([belt_width, self.config.belt_thickness, belt_length]),
        );

        let leg_count = perpendicular_leg_count(belt_length, self.config.perpendicular_leg_spacing);
        for i in 0..leg_count {
            let leg_z = start_z + i as f32 / (leg_count - 1) as f32 * (belt_length - leg) + leg / 2.0;
            for (side, leg_x) in [
                (1, x - belt_width / 2.0 + leg / 2.0),
                (2, x + belt_width / 2.0 - leg / 2.0),
            ] {
                objects.push(
                    SceneObject::new(
                        format!("{CONVEYOR_LEG_PREFIX}perp-{x}-{i}-{side}"),
                        PrimitiveKind::Box,
                        [leg_x, leg_height / 2.0, leg_z],
                        palette::CONVEYOR_LEG,
                    )
                    .with_size([leg, leg_height, leg]),
                );
            }
        }
    }
}

/// `floor(length / spacing) + 2`, never fewer than two.
pub fn perpendicular_leg_count(belt_length: f32, spacing: f32) -> usize {
    if spacing <= 0.0 || !belt_length.is_finite() {
        return 2;
    }
    (belt_length / spacing).floor() as usize + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WarehouseDimensions;
    use crate::warehouse::{Bin, Column, Layer, generate_with_rng};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn seeded(racks: usize, columns: usize, layers: usize, bins: usize, seed: u64) -> Warehouse {
        generate_with_rng(
            &WarehouseDimensions::new(racks, columns, layers, bins),
            &mut StdRng::seed_from_u64(seed),
        )
    }

    fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
        for axis in 0..3 {
            assert!(
                (actual[axis] - expected[axis]).abs() < 1e-4,
                "axis {axis}: {actual:?} != {expected:?}"
            );
        }
    }

    fn single_full_bin_warehouse() -> Warehouse {
        Warehouse {
            racks: vec![Rack {
                id: "rack".into(),
                name: "Rack 1".into(),
                columns: vec![Column {
                    id: "column".into(),
                    name: "Column 1".into(),
                    layers: vec![Layer {
                        id: "layer".into(),
                        name: "Layer 1".into(),
                        bins: vec![Bin {
                            id: "bin".into(),
                            name: "Bin 1".into(),
                            is_full: true,
                            item: None,
                        }],
                    }],
                }],
            }],
        }
    }

    #[test]
    fn test_one_pallet_per_full_bin() {
        for (dims, seed) in [((1, 1, 1, 1), 1), ((3, 2, 4, 2), 2), ((9, 5, 4, 3), 3)] {
            let (r, c, l, b) = dims;
            let warehouse = seeded(r, c, l, b, seed);
            let objects = compile(&warehouse);

            let pallets: Vec<&SceneObject> = objects.iter().filter(|o| o.is_pallet()).collect();
            assert_eq!(pallets.len(), warehouse.full_bin_count());
            for pallet in pallets {
                let bin = warehouse.find_bin(&pallet.id).expect("pallet without bin");
                assert!(bin.is_full);
            }
            for bin in warehouse.bins().filter(|b| !b.is_full) {
                assert!(objects.iter().all(|o| o.id != bin.id));
            }
        }
    }

    #[test]
    fn test_conveyor_counts() {
        for racks in [1, 3, 4, 5, 8, 24] {
            let warehouse = seeded(racks, 2, 2, 2, racks as u64);
            let objects = compile(&warehouse);

            let longitudinal = objects.iter().filter(|o| o.is_longitudinal_belt()).count();
            let perpendicular = objects.iter().filter(|o| o.is_perpendicular_belt()).count();
            assert_eq!(longitudinal, racks.div_ceil(4) + 1, "racks: {racks}");
            assert_eq!(perpendicular, 1);
        }
    }

    #[test]
    fn test_compile_is_idempotent() {
        let warehouse = seeded(7, 3, 3, 2, 11);
        assert_eq!(compile(&warehouse), compile(&warehouse));
    }

    #[test]
    fn test_ids_are_unique() {
        let warehouse = seeded(10, 3, 2, 2, 5);
        let objects = compile(&warehouse);

        let mut seen = HashMap::new();
        for object in &objects {
            assert!(seen.insert(object.id.as_str(), ()).is_none(), "duplicate id {}", object.id);
        }
    }

    #[test]
    fn test_structure_counts_per_rack() {
        let warehouse = seeded(1, 5, 4, 2, 8);
        let rack_id = warehouse.racks[0].id.clone();
        let objects = compile(&warehouse);

        let count = |needle: &str| {
            objects
                .iter()
                .filter(|o| o.id.starts_with(&rack_id) && o.id.contains(needle))
                .count()
        };
        assert_eq!(count("-vpost-"), 2 * (5 + 1));
        assert_eq!(count("-hbeam-front-back-"), 2 * 4);
        assert_eq!(count("-hbeam-bottom-"), 2);
        assert_eq!(objects.iter().filter(|o| o.id.ends_with("-shelf")).count(), 5 * 4);
    }

    #[test]
    fn test_single_rack_geometry() {
        let objects = compile(&single_full_bin_warehouse());
        let find = |id: &str| objects.iter().find(|o| o.id == id).unwrap();

        let pallet = find("bin");
        assert_eq!(pallet.kind, PrimitiveKind::Pallet);
        assert_close(pallet.position, [0.0, 0.4, 2.0]);
        assert_close(pallet.size.unwrap(), [1.1, 0.8, 0.9]);

        // Row width: one 1.2 wide column plus the 2.0 rack gap.
        let original = find("conveyor-belt-original");
        assert_close(original.position, [0.6, 1.0, -2.0]);
        assert_close(original.size.unwrap(), [3.2, 0.2, 1.0]);

        let last = find("conveyor-belt-last");
        assert_close(last.position, [0.6, 1.0, 5.0]);

        let perpendicular = find("conveyor-belt-perp--2");
        assert_close(perpendicular.position, [-2.0, 1.0, 2.5]);
        assert_close(perpendicular.size.unwrap(), [1.0, 0.2, 13.0]);

        let shelf = find("layer-shelf");
        assert_close(shelf.position, [0.0, -0.05, 2.0]);
    }

    #[test]
    fn test_leg_counts() {
        let objects = compile(&single_full_bin_warehouse());

        let original_legs = objects
            .iter()
            .filter(|o| o.id.starts_with("conveyor-leg-original-"))
            .count();
        assert_eq!(original_legs, 2 * 10);

        // 13 units long: floor(13 / 5) + 2 = 4 leg pairs.
        let perpendicular_legs = objects
            .iter()
            .filter(|o| o.id.starts_with("conveyor-leg-perp-"))
            .count();
        assert_eq!(perpendicular_legs, 2 * 4);
    }

    #[test]
    fn test_perpendicular_leg_count_minimum() {
        assert_eq!(perpendicular_leg_count(0.0, 5.0), 2);
        assert_eq!(perpendicular_leg_count(4.9, 5.0), 2);
        assert_eq!(perpendicular_leg_count(10.0, 5.0), 4);
        assert_eq!(perpendicular_leg_count(10.0, 0.0), 2);
    }

    #[test]
    fn test_partial_row_counts_towards_max_width() {
        let mut warehouse = seeded(5, 2, 2, 2, 4);
        // Widen the lone rack of the second row beyond the full first row.
        let template = warehouse.racks[4].columns[0].clone();
        warehouse.racks[4].columns = vec![template; 30];

        let compiler = LayoutCompiler::default();
        let wide = compiler.footprint(&warehouse.racks[4]).width + 2.0;
        assert!((compiler.max_row_width(&warehouse) - wide).abs() < 1e-4);

        let belt = compiler
            .compile(&warehouse)
            .into_iter()
            .find(|o| o.id == "conveyor-belt-1")
            .unwrap();
        assert!((belt.size.unwrap()[0] - wide).abs() < 1e-4);
    }

    #[test]
    fn test_rows_wrap_and_advance_depth() {
        let warehouse = seeded(5, 1, 1, 2, 6);
        let objects = compile(&warehouse);
        let belt_z = |id: &str| objects.iter().find(|o| o.id == id).unwrap().position[2];

        // Depth 2.0 per rack: row one at z = 2, row two at 2 + 2 + 4 = 8.
        assert!((belt_z("conveyor-belt-original") + 2.0).abs() < 1e-4);
        assert!((belt_z("conveyor-belt-1") - 6.0).abs() < 1e-4);
        assert!((belt_z("conveyor-belt-last") - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_emission_order_matches_walk() {
        let warehouse = seeded(5, 1, 1, 1, 12);
        let objects = compile(&warehouse);

        assert_eq!(objects[0].id, "conveyor-belt-original");
        let second_row_belt = objects.iter().position(|o| o.id == "conveyor-belt-1").unwrap();
        let fifth_rack_post = objects
            .iter()
            .position(|o| o.id == format!("{}-vpost-0-0", warehouse.racks[4].id))
            .unwrap();
        let fourth_rack_post = objects
            .iter()
            .position(|o| o.id == format!("{}-vpost-0-0", warehouse.racks[3].id))
            .unwrap();
        assert!(fourth_rack_post < second_row_belt && second_row_belt < fifth_rack_post);
        assert!(objects.last().unwrap().id.starts_with("conveyor-leg-perp-"));
    }

    #[test]
    fn test_ragged_rack_does_not_panic() {
        let mut warehouse = seeded(3, 2, 2, 2, 13);
        warehouse.racks[1].columns.clear();
        warehouse.racks[2].columns[0].layers.clear();

        let objects = compile(&warehouse);
        assert!(objects.iter().all(|o| !o.id.starts_with(&warehouse.racks[1].id)));
        assert_eq!(objects.iter().filter(|o| o.is_perpendicular_belt()).count(), 1);
    }
}
