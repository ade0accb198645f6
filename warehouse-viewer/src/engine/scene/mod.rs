//! Scene content: static environment, primitive meshes and the id-keyed sync with the
//! session's object list.

/// Lights and floor.
pub mod environment;

/// Mesh builders for every primitive kind.
pub mod primitives;

/// Spawns, despawns and highlights primitives by logical id.
pub mod scene_sync;
