use crate::engine::camera::viewport_camera::ViewportCamera;
use crate::engine::core::app_state::{AppState, SessionState};
use bevy::asset::LoadState;
use bevy::prelude::*;
use serde::Deserialize;
use warehouse_layout::{SceneBounds, WarehouseConfig, WarehouseSession};

pub const CONFIG_PATH: &str = "warehouse.config.json";

/// JSON asset wrapper around the layout library's config.
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct WarehouseConfigAsset {
    #[serde(flatten)]
    pub config: WarehouseConfig,
}

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<WarehouseConfigAsset>>,
}

pub fn start_loading(mut config_loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading warehouse config from {}", CONFIG_PATH);
    config_loader.handle = Some(asset_server.load(CONFIG_PATH));
}

/// Builds the session once the config resolves. A missing or invalid config falls back
/// to the defaults rather than blocking start-up.
pub fn load_config_system(
    config_loader: Res<ConfigLoader>,
    configs: Res<Assets<WarehouseConfigAsset>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(ref handle) = config_loader.handle else {
        return;
    };

    let config = if let Some(asset) = configs.get(handle) {
        match asset.config.dimensions.validate() {
            Ok(()) => asset.config.clone(),
            Err(err) => {
                warn!("Ignoring warehouse config: {err}");
                WarehouseConfig::default()
            }
        }
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!("Warehouse config unavailable, using defaults: {err}");
        WarehouseConfig::default()
    } else {
        return;
    };

    let session = WarehouseSession::new(config);
    let bounds = SceneBounds::from_objects(session.objects());
    info!(
        "Warehouse ready: {} racks, {} objects",
        session.warehouse().racks.len(),
        session.objects().len()
    );

    commands.insert_resource(ViewportCamera::with_bounds(&bounds));
    commands.insert_resource(SessionState(session));
    next_state.set(AppState::Running);
}
