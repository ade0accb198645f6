/// Interactive warehouse session: the single owner of the scene and everything derived
/// from it. Every operation runs to completion before the next, so regeneration, clearing
/// and planning never observe each other half done.
use crate::animation::ActiveAnimations;
use crate::config::{WarehouseConfig, WarehouseDimensions};
use crate::layout::LayoutCompiler;
use crate::motion::{AnimationState, MotionPlanner};
use crate::scene_object::{Position, PrimitiveKind, SceneObject};
use crate::search::find_pallet;
use crate::warehouse::{Warehouse, fresh_id, generate_with_rng};
use constants::layout::{SUGGESTION_SPACING, SUGGESTION_SPAWN};
use constants::palette;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Read model of the selected pallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalletDetails {
    pub id: String,
    pub item: Option<String>,
    pub position: Position,
}

/// A primitive added from an accepted suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedSuggestion {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct WarehouseSession {
    dimensions: WarehouseDimensions,
    compiler: LayoutCompiler,
    rng: StdRng,
    planner: MotionPlanner<StdRng>,
    warehouse: Warehouse,
    objects: Vec<SceneObject>,
    animations: ActiveAnimations,
    selected_pallet: Option<String>,
    search_term: String,
    suggestions: Vec<AcceptedSuggestion>,
}

impl Default for WarehouseSession {
    fn default() -> Self {
        Self::new(WarehouseConfig::default())
    }
}

impl WarehouseSession {
    /// Session seeded from OS entropy, with a freshly generated warehouse.
    pub fn new(config: WarehouseConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible session: generation and planning both derive from `seed`.
    pub fn with_seed(config: WarehouseConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: WarehouseConfig, mut rng: StdRng) -> Self {
        let planner = MotionPlanner::new(StdRng::seed_from_u64(rng.r#gen()));
        let mut session = Self {
            dimensions: config.dimensions,
            compiler: LayoutCompiler::new(config.layout),
            rng,
            planner,
            warehouse: Warehouse::default(),
            objects: Vec::new(),
            animations: ActiveAnimations::new(),
            selected_pallet: None,
            search_term: String::new(),
            suggestions: Vec::new(),
        };
        session.regenerate();
        session
    }

    /// Replaces the warehouse and recompiles it. Drops animations, selection, search and
    /// any suggested primitives.
    pub fn regenerate(&mut self) {
        self.reset_derived_state();
        self.warehouse = generate_with_rng(&self.dimensions, &mut self.rng);
        self.objects = self.compiler.compile(&self.warehouse);
        tracing::info!(objects = self.objects.len(), "warehouse regenerated");
    }

    /// Changes the dimensions used by the next [`regenerate`](Self::regenerate).
    pub fn set_dimensions(&mut self, dimensions: WarehouseDimensions) {
        self.dimensions = dimensions;
    }

    /// Empties the scene. The warehouse hierarchy is kept but nothing is rendered, so no
    /// pallet can be animated until the next regeneration.
    pub fn clear_scene(&mut self) {
        self.reset_derived_state();
        self.objects.clear();
        tracing::info!("scene cleared");
    }

    fn reset_derived_state(&mut self) {
        self.animations.clear();
        self.selected_pallet = None;
        self.search_term.clear();
        self.suggestions.clear();
    }

    pub fn can_animate(&self) -> bool {
        MotionPlanner::<StdRng>::can_plan(
            &self.warehouse,
            &self.objects,
            &self.animations.animating_pallet_ids(),
        )
    }

    /// Plans and starts one pallet animation at `now`. `None` when nothing can move.
    pub fn start_animation(&mut self, now: Duration) -> Option<AnimationState> {
        let animating = self.animations.animating_pallet_ids();
        let state = self.planner.plan(&self.warehouse, &self.objects, &animating)?;
        self.animations.start(state.clone(), now);
        Some(state)
    }

    /// Retires expired animations and returns them.
    pub fn tick(&mut self, now: Duration) -> Vec<AnimationState> {
        self.animations.tick(now)
    }

    /// Stores the query and selects the first matching rendered pallet, or nothing.
    pub fn set_search(&mut self, query: &str) -> Option<&str> {
        self.search_term = query.to_string();
        self.selected_pallet = find_pallet(&self.warehouse, query)
            .map(|bin| bin.id.as_str())
            .filter(|id| self.is_rendered_pallet(id))
            .map(str::to_string);
        self.selected_pallet.as_deref()
    }

    /// Selects a pallet by id. Anything that is not a rendered pallet clears the selection.
    pub fn select(&mut self, id: Option<&str>) -> Option<&str> {
        self.selected_pallet = id
            .filter(|id| self.is_rendered_pallet(id))
            .map(str::to_string);
        self.selected_pallet.as_deref()
    }

    fn is_rendered_pallet(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.is_pallet() && o.id == id)
    }

    pub fn selected_details(&self) -> Option<PalletDetails> {
        let id = self.selected_pallet.as_deref()?;
        let bin = self.warehouse.find_bin(id)?;
        let object = self.objects.iter().find(|o| o.id == id)?;
        Some(PalletDetails {
            id: bin.id.clone(),
            item: bin.item.clone(),
            position: object.position,
        })
    }

    /// Adds one primitive for an accepted suggestion and returns its id. Successive
    /// suggestions line up along X from the spawn point.
    pub fn accept_suggestion(&mut self, text: &str, kind: PrimitiveKind) -> String {
        let id = format!("suggested-{}", fresh_id());
        let offset = self.suggestions.len() as f32 * SUGGESTION_SPACING;
        let [x, y, z] = SUGGESTION_SPAWN;

        self.objects.push(
            SceneObject::new(
                id.clone(),
                kind,
                [x + offset, y, z],
                palette::SUGGESTED_OBJECT,
            )
            .with_size([1.0, 1.0, 1.0]),
        );
        self.suggestions.push(AcceptedSuggestion {
            id: id.clone(),
            label: text.to_string(),
        });
        tracing::info!(id = %id, label = text, kind = kind.name(), "suggested object added");
        id
    }

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn animations(&self) -> &ActiveAnimations {
        &self.animations
    }

    pub fn dimensions(&self) -> WarehouseDimensions {
        self.dimensions
    }

    pub fn selected_pallet(&self) -> Option<&str> {
        self.selected_pallet.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn suggestions(&self) -> &[AcceptedSuggestion] {
        &self.suggestions
    }
}
