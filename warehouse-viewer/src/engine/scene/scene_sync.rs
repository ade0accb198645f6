use crate::engine::core::app_state::SessionState;
use crate::engine::scene::primitives::{
    build_primitive, parse_hex_color, pick_half_extents, surface_for,
};
use bevy::prelude::*;
use constants::palette;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use warehouse_layout::{PrimitiveKind, SceneObject, reconcile};

/// Logical identity of a spawned primitive.
#[derive(Component, Debug, Clone)]
pub struct SceneObjectTag {
    pub kind: PrimitiveKind,
    pub base_color: Color,
    pub half_extents: Vec3,
}

/// Material shared by every mesh of one primitive, so recolouring touches one asset.
#[derive(Component)]
pub struct ObjectMaterial(pub Handle<StandardMaterial>);

/// Id to entity and entity to id, plus the object each entity was spawned from.
#[derive(Resource, Default)]
pub struct SceneIndex {
    entities: HashMap<String, Entity>,
    ids: HashMap<Entity, String>,
    known: HashMap<String, SceneObject>,
}

impl SceneIndex {
    pub fn insert(&mut self, object: SceneObject, entity: Entity) {
        self.entities.insert(object.id.clone(), entity);
        self.ids.insert(entity, object.id.clone());
        self.known.insert(object.id.clone(), object);
    }

    pub fn remove(&mut self, id: &str) -> Option<Entity> {
        let entity = self.entities.remove(id)?;
        self.ids.remove(&entity);
        self.known.remove(id);
        Some(entity)
    }

    pub fn entity(&self, id: &str) -> Option<Entity> {
        self.entities.get(id).copied()
    }

    pub fn id_of(&self, entity: Entity) -> Option<&str> {
        self.ids.get(&entity).map(String::as_str)
    }

    /// Position the primitive was spawned at.
    pub fn home_position(&self, id: &str) -> Option<Vec3> {
        self.known.get(id).map(|o| Vec3::from_array(o.position))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}

/// Brings spawned entities in line with the session's object list.
pub fn sync_scene_objects(
    mut commands: Commands,
    session: Res<SessionState>,
    mut index: ResMut<SceneIndex>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !session.is_changed() {
        return;
    }

    let diff = reconcile(&index.known, session.objects());
    if diff.is_empty() {
        return;
    }

    for id in diff.removed.iter().chain(&diff.changed) {
        if let Some(entity) = index.remove(id) {
            commands.entity(entity).despawn();
        }
    }

    let pending: HashSet<&str> = diff
        .added
        .iter()
        .chain(&diff.changed)
        .map(String::as_str)
        .collect();
    for object in session.objects().iter().filter(|o| pending.contains(o.id.as_str())) {
        let entity = spawn_scene_object(&mut commands, &mut meshes, &mut materials, object);
        index.insert(object.clone(), entity);
    }

    info!(
        "Scene synced: +{} -{} ~{} ({} live)",
        diff.added.len(),
        diff.removed.len(),
        diff.changed.len(),
        index.len()
    );
}

fn spawn_scene_object(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    object: &SceneObject,
) -> Entity {
    let size = object.size_or_unit();
    let base_color = parse_hex_color(&object.color);
    let (perceptual_roughness, metallic) = surface_for(object.kind);
    let material = materials.add(StandardMaterial {
        base_color,
        perceptual_roughness,
        metallic,
        ..default()
    });

    let parts = build_primitive(object.kind, size);
    commands
        .spawn((
            Transform::from_translation(Vec3::from_array(object.position)),
            Visibility::default(),
            SceneObjectTag {
                kind: object.kind,
                base_color,
                half_extents: pick_half_extents(object.kind, size),
            },
            ObjectMaterial(material.clone()),
        ))
        .with_children(|parent| {
            for part in parts {
                parent.spawn((
                    Mesh3d(meshes.add(part.mesh)),
                    MeshMaterial3d(material.clone()),
                    Transform::from_translation(part.offset),
                ));
            }
        })
        .id()
}

/// Colour a pallet should show: in-flight beats selected beats its own colour.
pub fn pallet_color(base: Color, selected: bool, in_flight: bool) -> Color {
    if in_flight {
        parse_hex_color(palette::ANIMATION_HIGHLIGHT)
    } else if selected {
        parse_hex_color(palette::SELECTION_HIGHLIGHT)
    } else {
        base
    }
}

/// Recolours pallets for selection and animation.
pub fn update_highlights(
    time: Res<Time>,
    session: Res<SessionState>,
    index: Res<SceneIndex>,
    objects: Query<(Entity, &SceneObjectTag, &ObjectMaterial)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let now: Duration = time.elapsed();
    let in_flight: HashSet<&str> = session
        .animations()
        .iter()
        .filter(|entry| !entry.is_finished(now))
        .map(|entry| entry.state.pallet_id.as_str())
        .collect();
    let selected = session.selected_pallet();

    for (entity, tag, material) in &objects {
        if tag.kind != PrimitiveKind::Pallet {
            continue;
        }
        let Some(id) = index.id_of(entity) else {
            continue;
        };
        let color = pallet_color(tag.base_color, selected == Some(id), in_flight.contains(id));

        let needs_update = materials
            .get(&material.0)
            .is_some_and(|current| current.base_color != color);
        if needs_update {
            if let Some(current) = materials.get_mut(&material.0) {
                current.base_color = color;
            }
        }
    }
}
