/// Axis-aligned extent of a compiled layout.
use crate::scene_object::{Position, SceneObject};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBounds {
    pub min: Position,
    pub max: Position,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBounds {
    /// Empty bounds; the first update snaps them to that point.
    pub fn new() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }

    /// Bounds of every object's box, using the unit cube for unsized objects.
    pub fn from_objects(objects: &[SceneObject]) -> Self {
        let mut bounds = Self::new();
        for object in objects {
            bounds.include_object(object);
        }
        bounds
    }

    pub fn update(&mut self, point: Position) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }

    pub fn include_object(&mut self, object: &SceneObject) {
        let size = object.size_or_unit();
        let half = size.map(|s| s / 2.0);
        let p = object.position;
        self.update([p[0] - half[0], p[1] - half[1], p[2] - half[2]]);
        self.update([p[0] + half[0], p[1] + half[1], p[2] + half[2]]);
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Extent along each axis, zero when empty.
    pub fn dimensions(&self) -> [f32; 3] {
        if self.is_empty() {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> Position {
        if self.is_empty() {
            return [0.0; 3];
        }
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Length of the box diagonal, handy for camera framing.
    pub fn diagonal(&self) -> f32 {
        let [x, y, z] = self.dimensions();
        (x * x + y * y + z * z).sqrt()
    }
}
