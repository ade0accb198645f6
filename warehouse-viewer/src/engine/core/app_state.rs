use bevy::prelude::*;
use warehouse_layout::WarehouseSession;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the warehouse config asset (or its failure).
    #[default]
    Loading,
    Running,
}

/// The one warehouse session. Only `apply_warehouse_commands` mutates it in ways that
/// trigger change detection.
#[derive(Resource, Deref, DerefMut)]
pub struct SessionState(pub WarehouseSession);

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct StatusText;
