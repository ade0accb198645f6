/// Scene manifest export: a generated warehouse plus its compiled layout, as JSON.
use crate::bounds::SceneBounds;
use crate::config::{LayoutConfig, WarehouseDimensions};
use crate::error::LayoutError;
use crate::scene_object::SceneObject;
use crate::warehouse::Warehouse;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Headline counts for a compiled scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSummary {
    pub racks: usize,
    pub bins: usize,
    pub full_bins: usize,
    pub objects: usize,
    pub pallets: usize,
    pub conveyor_belts: usize,
}

impl ManifestSummary {
    pub fn new(warehouse: &Warehouse, objects: &[SceneObject]) -> Self {
        Self {
            racks: warehouse.racks.len(),
            bins: warehouse.bin_count(),
            full_bins: warehouse.full_bin_count(),
            objects: objects.len(),
            pallets: objects.iter().filter(|o| o.is_pallet()).count(),
            conveyor_belts: objects
                .iter()
                .filter(|o| o.is_longitudinal_belt() || o.is_perpendicular_belt())
                .count(),
        }
    }
}

/// Everything needed to rebuild or inspect a scene offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneManifest {
    pub dimensions: WarehouseDimensions,
    pub layout: LayoutConfig,
    pub warehouse: Warehouse,
    pub objects: Vec<SceneObject>,
    /// `None` for a scene with no objects.
    pub bounds: Option<SceneBounds>,
    pub summary: ManifestSummary,
}

impl SceneManifest {
    pub fn new(
        dimensions: WarehouseDimensions,
        layout: LayoutConfig,
        warehouse: Warehouse,
        objects: Vec<SceneObject>,
    ) -> Self {
        let bounds = Some(SceneBounds::from_objects(&objects)).filter(|b| !b.is_empty());
        let summary = ManifestSummary::new(&warehouse, &objects);
        Self {
            dimensions,
            layout,
            warehouse,
            objects,
            bounds,
            summary,
        }
    }
}

/// Writes manifests to a fixed path.
pub struct ManifestGenerator {
    output_path: PathBuf,
}

impl ManifestGenerator {
    pub fn new(output_path: &Path) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
        }
    }

    /// Serializes `manifest` as pretty JSON and logs a short summary.
    pub fn write(&self, manifest: &SceneManifest) -> Result<(), LayoutError> {
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&self.output_path, json).map_err(|source| LayoutError::Io {
            path: self.output_path.clone(),
            source,
        })?;

        tracing::info!(path = %self.output_path.display(), "wrote scene manifest");
        self.log_summary(manifest);
        Ok(())
    }

    fn log_summary(&self, manifest: &SceneManifest) {
        let summary = &manifest.summary;
        tracing::info!(
            racks = summary.racks,
            bins = summary.bins,
            full_bins = summary.full_bins,
            objects = summary.objects,
            belts = summary.conveyor_belts,
            "manifest summary"
        );
        match &manifest.bounds {
            Some(bounds) => {
                let [min_x, _, min_z] = bounds.min;
                let [max_x, _, max_z] = bounds.max;
                tracing::info!(
                    "scene bounds: ({min_x:.2}, {min_z:.2}) to ({max_x:.2}, {max_z:.2})"
                );
            }
            None => tracing::warn!("scene is empty, no bounds"),
        }
    }
}
