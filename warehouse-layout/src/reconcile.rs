/// Set reconciliation between what a renderer has spawned and the current scene.
use crate::scene_object::SceneObject;
use std::collections::{HashMap, HashSet};

/// Ids to spawn, despawn and respawn to bring a renderer up to date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDiff {
    /// In scene order.
    pub added: Vec<String>,
    /// Sorted.
    pub removed: Vec<String>,
    /// Same id with a different kind, position, size or colour. In scene order.
    pub changed: Vec<String>,
}

impl SceneDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compares `known` (id to last rendered object) against `current`.
pub fn reconcile(known: &HashMap<String, SceneObject>, current: &[SceneObject]) -> SceneDiff {
    let mut diff = SceneDiff::default();
    let mut present = HashSet::with_capacity(current.len());

    for object in current {
        present.insert(object.id.as_str());
        match known.get(&object.id) {
            None => diff.added.push(object.id.clone()),
            Some(previous) if previous != object => diff.changed.push(object.id.clone()),
            Some(_) => {}
        }
    }

    diff.removed = known
        .keys()
        .filter(|id| !present.contains(id.as_str()))
        .cloned()
        .collect();
    diff.removed.sort();

    if !diff.is_empty() {
        tracing::debug!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            changed = diff.changed.len(),
            "scene reconciled"
        );
    }
    diff
}
