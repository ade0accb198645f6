use bevy::prelude::*;
use constants::render_settings::{
    PALLET_PLANK_GAP, PALLET_PLANK_HEIGHT, PALLET_SUPPORT_DEPTH, PALLET_TOP_PLANKS,
    TORUS_TUBE_RADIUS,
};
use warehouse_layout::PrimitiveKind;

/// One mesh of a primitive, offset from the primitive's origin.
pub struct PrimitivePart {
    pub mesh: Mesh,
    pub offset: Vec3,
}

impl PrimitivePart {
    fn centred(mesh: impl Into<Mesh>) -> Self {
        Self {
            mesh: mesh.into(),
            offset: Vec3::ZERO,
        }
    }
}

/// Meshes for a primitive of `kind` and `size`.
pub fn build_primitive(kind: PrimitiveKind, size: [f32; 3]) -> Vec<PrimitivePart> {
    let [x, y, z] = size;
    match kind {
        PrimitiveKind::Box => vec![PrimitivePart::centred(Cuboid::new(x, y, z))],
        PrimitiveKind::Sphere => vec![PrimitivePart::centred(Sphere::new(x / 2.0))],
        PrimitiveKind::Torus => vec![PrimitivePart::centred(Torus {
            minor_radius: TORUS_TUBE_RADIUS,
            major_radius: x / 2.0,
        })],
        PrimitiveKind::Pallet => build_pallet(size),
    }
}

/// Top planks across the width plus three support beams front, middle and back.
fn build_pallet([width, height, depth]: [f32; 3]) -> Vec<PrimitivePart> {
    let plank_width = width / PALLET_TOP_PLANKS as f32;
    let mut parts: Vec<PrimitivePart> = (0..PALLET_TOP_PLANKS)
        .map(|i| PrimitivePart {
            mesh: Cuboid::new(plank_width - PALLET_PLANK_GAP, PALLET_PLANK_HEIGHT, depth).into(),
            offset: Vec3::new(
                i as f32 * plank_width - width / 2.0 + plank_width / 2.0,
                height / 2.0 - PALLET_PLANK_HEIGHT / 2.0,
                0.0,
            ),
        })
        .collect();

    let support_height = (height - PALLET_PLANK_HEIGHT).max(0.0);
    for z in [
        -depth / 2.0 + PALLET_SUPPORT_DEPTH / 2.0,
        0.0,
        depth / 2.0 - PALLET_SUPPORT_DEPTH / 2.0,
    ] {
        parts.push(PrimitivePart {
            mesh: Cuboid::new(width, support_height, PALLET_SUPPORT_DEPTH).into(),
            offset: Vec3::new(0.0, 0.0, z),
        });
    }
    parts
}

/// Half extents of the box used for picking.
pub fn pick_half_extents(kind: PrimitiveKind, size: [f32; 3]) -> Vec3 {
    let [x, y, z] = size;
    match kind {
        PrimitiveKind::Box | PrimitiveKind::Pallet => Vec3::new(x, y, z) / 2.0,
        PrimitiveKind::Sphere => Vec3::splat(x / 2.0),
        PrimitiveKind::Torus => {
            let outer = x / 2.0 + TORUS_TUBE_RADIUS;
            Vec3::new(outer, TORUS_TUBE_RADIUS, outer)
        }
    }
}

/// `#rrggbb` to a colour, white when malformed.
pub fn parse_hex_color(hex: &str) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or(Color::WHITE)
}

/// Roughness and metalness: wood for pallets, painted steel for the rest.
pub fn surface_for(kind: PrimitiveKind) -> (f32, f32) {
    match kind {
        PrimitiveKind::Pallet => (0.8, 0.2),
        PrimitiveKind::Box | PrimitiveKind::Sphere | PrimitiveKind::Torus => (0.5, 0.5),
    }
}
