use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::CAMERA_START;

use crate::engine::camera::viewport_camera::{ViewportCamera, camera_controller};
use crate::engine::core::app_state::{AppState, FpsText, StatusText};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{
    ConfigLoader, WarehouseConfigAsset, load_config_system, start_loading,
};
use crate::engine::scene::environment::{spawn_floor, spawn_lighting};
use crate::engine::scene::scene_sync::{SceneIndex, sync_scene_objects, update_highlights};
use crate::engine::systems::animation_playback::{advance_animations, draw_animation_traces};
use crate::engine::systems::fps_tracking::status_text_update_system;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::commands::{
    WarehouseCommandEvent, apply_warehouse_commands, handle_keyboard_shortcuts,
};
use crate::tools::picking::pick_on_click;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(JsonAssetPlugin::<WarehouseConfigAsset>::new(&["config.json"]))
        .add_plugins(WebRpcPlugin);

    app.init_resource::<ConfigLoader>()
        .init_resource::<SceneIndex>()
        .init_resource::<ViewportCamera>()
        .add_event::<WarehouseCommandEvent>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            load_config_system.run_if(in_state(AppState::Loading)),
        );

    // Commands apply before the scene is synced, so a frame never renders stale objects.
    let runtime_systems = (
        handle_keyboard_shortcuts,
        pick_on_click,
        apply_warehouse_commands,
        sync_scene_objects,
        advance_animations,
        update_highlights,
        draw_animation_traces,
        camera_controller,
        status_text_update_system,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(Vec3::from_array(CAMERA_START)).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    spawn_lighting(&mut commands);
    spawn_floor(&mut commands, &mut meshes, &mut materials);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
