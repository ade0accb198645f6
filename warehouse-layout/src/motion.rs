/// Motion planner: picks a pallet and lays out its path through the conveyor network.
use crate::scene_object::{Position, SceneObject};
use crate::warehouse::{Bin, Warehouse, random_id};
use constants::motion::{
    ALONG_CONVEYOR_MS, DROP_OFF_FRACTION, LIFT_TO_CONVEYOR_MS, TO_DROP_OFF_MS, TRANSFER_MS,
};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Straight-line move between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSegment {
    pub duration_ms: u64,
    pub start_position: Position,
    pub end_position: Position,
}

impl AnimationSegment {
    pub fn new(duration_ms: u64, start_position: Position, end_position: Position) -> Self {
        Self {
            duration_ms,
            start_position,
            end_position,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// One pallet's planned trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationState {
    pub id: String,
    pub pallet_id: String,
    pub segments: Vec<AnimationSegment>,
    pub total_duration_ms: u64,
}

impl AnimationState {
    /// Builds a state with the total duration precomputed from `segments`.
    pub fn new(id: String, pallet_id: String, segments: Vec<AnimationSegment>) -> Self {
        let total_duration_ms = segments.iter().map(|s| s.duration_ms).sum();
        Self {
            id,
            pallet_id,
            segments,
            total_duration_ms,
        }
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.total_duration_ms)
    }

    pub fn start_position(&self) -> Option<Position> {
        self.segments.first().map(|s| s.start_position)
    }

    pub fn end_position(&self) -> Option<Position> {
        self.segments.last().map(|s| s.end_position)
    }
}

/// Scene objects a pallet path is anchored to.
#[derive(Debug, Clone, Copy)]
pub struct ConveyorAnchors<'a> {
    pub pallet: &'a SceneObject,
    /// Longitudinal belt closest to the pallet along Z.
    pub belt: &'a SceneObject,
    pub perpendicular: &'a SceneObject,
}

impl<'a> ConveyorAnchors<'a> {
    pub fn resolve(objects: &'a [SceneObject], pallet_id: &str) -> Option<Self> {
        let pallet = objects.iter().find(|o| o.id == pallet_id)?;
        let pallet_z = pallet.position[2];

        let belt = objects
            .iter()
            .filter(|o| o.is_longitudinal_belt())
            .min_by(|a, b| {
                let da = (a.position[2] - pallet_z).abs();
                let db = (b.position[2] - pallet_z).abs();
                da.total_cmp(&db)
            })?;
        let perpendicular = objects.iter().find(|o| o.is_perpendicular_belt())?;

        Some(Self {
            pallet,
            belt,
            perpendicular,
        })
    }

    /// Lift, ride, transfer, drop off.
    pub fn segments(&self) -> Vec<AnimationSegment> {
        let [pallet_x, pallet_y, pallet_z] = self.pallet.position;
        let [_, belt_y, belt_z] = self.belt.position;
        let [perp_x, perp_y, perp_z] = self.perpendicular.position;
        let perp_length = self.perpendicular.size_or_unit()[2];

        let on_belt = [pallet_x, belt_y, belt_z];
        let belt_end = [perp_x, belt_y, belt_z];
        let on_perpendicular = [perp_x, perp_y, belt_z];
        let drop_off = [perp_x, perp_y, perp_z + perp_length * DROP_OFF_FRACTION];

        vec![
            AnimationSegment::new(LIFT_TO_CONVEYOR_MS, [pallet_x, pallet_y, pallet_z], on_belt),
            AnimationSegment::new(ALONG_CONVEYOR_MS, on_belt, belt_end),
            AnimationSegment::new(TRANSFER_MS, belt_end, on_perpendicular),
            AnimationSegment::new(TO_DROP_OFF_MS, on_perpendicular, drop_off),
        ]
    }
}

/// Full bins that are not already moving, in warehouse order.
pub fn eligible_bins<'a>(warehouse: &'a Warehouse, animating: &HashSet<String>) -> Vec<&'a Bin> {
    warehouse
        .full_bins()
        .filter(|bin| !animating.contains(&bin.id))
        .collect()
}

/// Plans with the thread-local RNG.
pub fn plan_animation(
    warehouse: &Warehouse,
    objects: &[SceneObject],
    animating: &HashSet<String>,
) -> Option<AnimationState> {
    plan_animation_with_rng(warehouse, objects, animating, &mut rand::thread_rng())
}

/// Picks a uniformly random eligible pallet and plans its path. `None` when nothing can move.
pub fn plan_animation_with_rng<R: Rng + ?Sized>(
    warehouse: &Warehouse,
    objects: &[SceneObject],
    animating: &HashSet<String>,
    rng: &mut R,
) -> Option<AnimationState> {
    let eligible = eligible_bins(warehouse, animating);
    let Some(bin) = eligible.choose(rng) else {
        tracing::debug!(animating = animating.len(), "no eligible pallet to animate");
        return None;
    };

    let Some(anchors) = ConveyorAnchors::resolve(objects, &bin.id) else {
        tracing::warn!(pallet = %bin.id, "pallet or conveyor anchors missing from scene");
        return None;
    };

    tracing::debug!(
        pallet = %anchors.pallet.id,
        belt = %anchors.belt.id,
        perpendicular = %anchors.perpendicular.id,
        "planned pallet animation"
    );
    Some(AnimationState::new(
        random_id(rng),
        bin.id.clone(),
        anchors.segments(),
    ))
}

/// Owns the RNG used to choose pallets.
#[derive(Debug, Clone)]
pub struct MotionPlanner<R = ThreadRng> {
    rng: R,
}

impl Default for MotionPlanner<ThreadRng> {
    fn default() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl<R: Rng> MotionPlanner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn plan(
        &mut self,
        warehouse: &Warehouse,
        objects: &[SceneObject],
        animating: &HashSet<String>,
    ) -> Option<AnimationState> {
        plan_animation_with_rng(warehouse, objects, animating, &mut self.rng)
    }

    /// True when at least one pallet is eligible and the conveyor network is present.
    pub fn can_plan(
        warehouse: &Warehouse,
        objects: &[SceneObject],
        animating: &HashSet<String>,
    ) -> bool {
        eligible_bins(warehouse, animating)
            .first()
            .is_some_and(|bin| ConveyorAnchors::resolve(objects, &bin.id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WarehouseDimensions;
    use crate::layout::compile;
    use crate::warehouse::generate_with_rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn one_full_bin() -> Warehouse {
        let mut warehouse = generate_with_rng(
            &WarehouseDimensions::new(1, 1, 1, 1),
            &mut StdRng::seed_from_u64(1),
        );
        let bin = &mut warehouse.racks[0].columns[0].layers[0].bins[0];
        bin.is_full = true;
        bin.item = Some("Motor Oil".into());
        warehouse
    }

    #[test]
    fn test_single_full_bin_plan() {
        let warehouse = one_full_bin();
        let objects = compile(&warehouse);
        let mut rng = StdRng::seed_from_u64(3);

        let state = plan_animation_with_rng(&warehouse, &objects, &HashSet::new(), &mut rng)
            .expect("plan");

        assert_eq!(state.pallet_id, warehouse.racks[0].columns[0].layers[0].bins[0].id);
        assert_eq!(state.segments.len(), 4);
        assert_eq!(state.total_duration_ms, 18_000);
        assert_eq!(
            state.segments.iter().map(|s| s.duration_ms).sum::<u64>(),
            state.total_duration_ms
        );
        for pair in state.segments.windows(2) {
            assert_eq!(pair[0].end_position, pair[1].start_position);
        }

        let pallet = objects.iter().find(|o| o.id == state.pallet_id).unwrap();
        assert_eq!(state.start_position(), Some(pallet.position));
    }

    #[test]
    fn test_path_follows_nearest_belt_then_perpendicular() {
        let warehouse = one_full_bin();
        let objects = compile(&warehouse);
        let state = plan_animation(&warehouse, &objects, &HashSet::new()).unwrap();

        // Pallet at z = 2 sits closer to the original belt (z = -2) than the last (z = 5).
        let lift = &state.segments[0];
        assert_eq!(lift.end_position, [0.0, 1.0, -2.0]);
        assert_eq!(state.segments[1].end_position, [-2.0, 1.0, -2.0]);
        assert_eq!(state.segments[2].end_position, [-2.0, 1.0, -2.0]);
        // Perpendicular belt centred at z = 2.5, 13 long.
        assert_eq!(state.end_position(), Some([-2.0, 1.0, 2.5 + 13.0 / 4.0]));
    }

    #[test]
    fn test_animating_pallets_are_skipped() {
        let warehouse = generate_with_rng(
            &WarehouseDimensions::new(2, 2, 2, 2),
            &mut StdRng::seed_from_u64(21),
        );
        let objects = compile(&warehouse);
        let full: Vec<String> = warehouse.full_bins().map(|b| b.id.clone()).collect();
        assert!(full.len() >= 2);

        let animating: HashSet<String> = full[1..].iter().cloned().collect();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let state = plan_animation_with_rng(&warehouse, &objects, &animating, &mut rng).unwrap();
            assert_eq!(state.pallet_id, full[0]);
        }

        let everything: HashSet<String> = full.into_iter().collect();
        assert!(plan_animation(&warehouse, &objects, &everything).is_none());
    }

    #[test]
    fn test_no_full_bins_plans_nothing() {
        let mut warehouse = one_full_bin();
        warehouse.racks[0].columns[0].layers[0].bins[0].is_full = false;
        let objects = compile(&warehouse);

        assert!(eligible_bins(&warehouse, &HashSet::new()).is_empty());
        assert!(plan_animation(&warehouse, &objects, &HashSet::new()).is_none());
        assert!(!MotionPlanner::<StdRng>::can_plan(&warehouse, &objects, &HashSet::new()));
    }

    #[test]
    fn test_missing_conveyors_plans_nothing() {
        let warehouse = one_full_bin();
        let objects: Vec<SceneObject> = compile(&warehouse)
            .into_iter()
            .filter(|o| !o.is_perpendicular_belt())
            .collect();

        assert!(ConveyorAnchors::resolve(&objects, &warehouse.racks[0].columns[0].layers[0].bins[0].id).is_none());
        assert!(plan_animation(&warehouse, &objects, &HashSet::new()).is_none());
        assert!(!MotionPlanner::<StdRng>::can_plan(&warehouse, &objects, &HashSet::new()));
    }

    #[test]
    fn test_seeded_planner_is_reproducible() {
        let warehouse = generate_with_rng(
            &WarehouseDimensions::new(4, 3, 3, 2),
            &mut StdRng::seed_from_u64(77),
        );
        let objects = compile(&warehouse);

        let mut first = MotionPlanner::new(StdRng::seed_from_u64(9));
        let mut second = MotionPlanner::new(StdRng::seed_from_u64(9));
        assert_eq!(
            first.plan(&warehouse, &objects, &HashSet::new()),
            second.plan(&warehouse, &objects, &HashSet::new())
        );
    }
}
