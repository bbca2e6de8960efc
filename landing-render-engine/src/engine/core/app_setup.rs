use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::layout::PAGE_BACKGROUND;
use constants::scene::{AMBIENT_BRIGHTNESS, PAGE_CLEAR_CAMERA_ORDER, UI_CAMERA_ORDER};

// Crate engine modules
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::frame::FramePlugin;
use crate::engine::loading::config_loader::{ConfigLoader, load_config_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::motion::MotionPlugin;
use crate::engine::reveal::RevealPlugin;
use crate::engine::scene::ScenePlugin;
use crate::engine::scroll::ScrollPlugin;
use crate::engine::systems::fps_tracking::fps_notification_system;
// Page sections
use crate::sections::SectionsPlugin;
use crate::sections::config::LandingConfig;
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers LandingConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<LandingConfig>::new(&["json"]))
        .add_plugins((
            FramePlugin,
            ScrollPlugin,
            MotionPlugin,
            RevealPlugin,
            ScenePlugin,
            SectionsPlugin,
        ))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(PAGE_BACKGROUND))
        .insert_resource(AmbientLight {
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        });

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_config_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            fps_notification_system.run_if(in_state(AppState::Running)),
        );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

/// The clear pass paints the page background, so the particle backdrop can
/// sit between it and the UI.
fn spawn_page_camera(commands: &mut Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: PAGE_CLEAR_CAMERA_ORDER,
            ..default()
        },
        RenderLayers::none(),
    ));
    commands.spawn((
        Camera2d,
        Camera {
            order: UI_CAMERA_ORDER,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_page_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
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
        GlobalZIndex(i32::MAX),
        FpsText,
    ));
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
