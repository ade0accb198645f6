/// Flat scene primitives emitted by the layout compiler.
use serde::{Deserialize, Serialize};

/// World-space coordinate `[x, y, z]`.
pub type Position = [f32; 3];

/// Id prefix shared by every conveyor belt.
pub const CONVEYOR_BELT_PREFIX: &str = "conveyor-belt-";

/// Id prefix of the single perpendicular belt.
pub const PERPENDICULAR_BELT_PREFIX: &str = "conveyor-belt-perp";

/// Id prefix shared by every conveyor leg.
pub const CONVEYOR_LEG_PREFIX: &str = "conveyor-leg-";

/// Shape of a scene primitive. The renderer matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Box,
    Sphere,
    Torus,
    Pallet,
}

impl PrimitiveKind {
    /// Parses the lowercase name used on the wire.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "box" => Some(Self::Box),
            "sphere" => Some(Self::Sphere),
            "torus" => Some(Self::Torus),
            "pallet" => Some(Self::Pallet),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Torus => "torus",
            Self::Pallet => "pallet",
        }
    }
}

/// One positioned, sized and coloured primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
    pub position: Position,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 3]>,
}

impl SceneObject {
    pub fn new(id: impl Into<String>, kind: PrimitiveKind, position: Position, color: &str) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            color: color.to_string(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: [f32; 3]) -> Self {
        self.size = Some(size);
        self
    }

    /// Size, or a unit cube when none was given.
    pub fn size_or_unit(&self) -> [f32; 3] {
        self.size.unwrap_or([1.0, 1.0, 1.0])
    }

    pub fn is_pallet(&self) -> bool {
        self.kind == PrimitiveKind::Pallet
    }

    /// Belt running along a rack row.
    pub fn is_longitudinal_belt(&self) -> bool {
        self.id.starts_with(CONVEYOR_BELT_PREFIX) && !self.id.contains("perp")
    }

    /// The belt crossing every aisle.
    pub fn is_perpendicular_belt(&self) -> bool {
        self.id.starts_with(PERPENDICULAR_BELT_PREFIX)
    }

    pub fn is_conveyor_leg(&self) -> bool {
        self.id.starts_with(CONVEYOR_LEG_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belt_classification() {
        let aisle = SceneObject::new("conveyor-belt-original", PrimitiveKind::Box, [0.0; 3], "#333333");
        let perp = SceneObject::new("conveyor-belt-perp--2", PrimitiveKind::Box, [0.0; 3], "#333333");
        let leg = SceneObject::new("conveyor-leg-perp--2-0-1", PrimitiveKind::Box, [0.0; 3], "#666666");

        assert!(aisle.is_longitudinal_belt());
        assert!(!aisle.is_perpendicular_belt());
        assert!(perp.is_perpendicular_belt());
        assert!(!perp.is_longitudinal_belt());
        assert!(!leg.is_longitudinal_belt());
        assert!(leg.is_conveyor_leg());
    }

    #[test]
    fn test_kind_wire_names() {
        let object = SceneObject::new("p", PrimitiveKind::Pallet, [1.0, 2.0, 3.0], "#d2b48c")
            .with_size([1.1, 0.8, 0.9]);
        let json = serde_json::to_value(&object).unwrap();

        assert_eq!(json["type"], "pallet");
        assert_eq!(PrimitiveKind::from_name("Torus"), Some(PrimitiveKind::Torus));
        assert_eq!(PrimitiveKind::from_name("cone"), None);
    }
}
