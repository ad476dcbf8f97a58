//! MpPong - two-player Pong with optional hand tracking, built with Bevy
//!
//! Main entry point: app setup, system registration and tracking thread lifetime.

use bevy::prelude::*;
use bevy::window::{ExitCondition, WindowResolution};
use crossbeam_channel::bounded;
use std::path::Path;

use mppong::audio::start_music;
use mppong::constants::*;
use mppong::events::log_match_events;
use mppong::tracking::{
    self, DebugFrames, TrackingHandle, TrackingLink, spawn_tracking, stop_tracking_on_exit,
};
use mppong::{
    EventBus, GameConfig, MatchRng, MatchState, PaddleInput, TRACKING_SETTINGS_FILE,
    TrackingSettings, game, input, ui, world,
};

fn main() {
    let config = GameConfig::default();

    // Load tracking settings (uses defaults if file doesn't exist)
    let settings = TrackingSettings::load();

    // Save settings on first run to ensure file exists
    if !Path::new(TRACKING_SETTINGS_FILE).exists() {
        if let Err(e) = settings.save() {
            warn!("Failed to save initial tracking settings: {}", e);
        }
    }

    let link = TrackingLink::new();
    let (debug_tx, debug_rx) = bounded(1);
    let tracking = start_tracking(&settings, &link, debug_tx);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            // Set scale_factor_override to 1.0 for consistent behavior on HiDPI displays
            resolution: WindowResolution::new(config.width as u32, config.height as u32)
                .with_scale_factor_override(1.0),
            title: WINDOW_TITLE.into(),
            resizable: false,
            ..default()
        }),
        // The debug view is a second window; closing the game window still quits
        exit_condition: ExitCondition::OnPrimaryClosed,
        ..default()
    }))
    .insert_resource(ClearColor(BACKGROUND_COLOR))
    .insert_resource(Time::<Fixed>::from_hz(config.fps))
    .insert_resource(config)
    .insert_resource(MatchState::new(config))
    .init_resource::<PaddleInput>()
    .init_resource::<MatchRng>()
    .insert_resource(EventBus::new())
    .insert_resource(link.paddle.clone())
    .insert_resource(link.clone());

    if tracking.is_some() && settings.show_debug_view {
        app.insert_resource(DebugFrames(debug_rx));
    }

    app.add_systems(Startup, (setup, start_music, tracking::spawn_debug_view))
        .add_systems(
            Update,
            (
                input::capture_input,
                world::sync_transforms,
                ui::update_score_text,
                ui::update_match_over_prompt,
                log_match_events,
            ),
        )
        .add_systems(
            Update,
            (
                tracking::upload_debug_frame,
                tracking::handle_debug_view_keys,
                tracking::close_debug_view_when_finished,
            )
                .chain(),
        )
        .add_systems(FixedUpdate, game::step_match)
        .add_systems(Last, stop_tracking_on_exit);

    app.run();

    // Release the camera before the process exits
    if let Some(handle) = tracking {
        if let Some(exit) = handle.shutdown() {
            info!("Tracking thread joined: {:?}", exit);
        }
    }
}

/// Start hand tracking if the settings allow it. Without it the game is
/// keyboard-only.
fn start_tracking(
    settings: &TrackingSettings,
    link: &TrackingLink,
    debug_tx: crossbeam_channel::Sender<image::RgbImage>,
) -> Option<TrackingHandle> {
    if !settings.enabled {
        info!("Hand tracking disabled in {}", TRACKING_SETTINGS_FILE);
        return None;
    }
    let debug_tx = settings.show_debug_view.then_some(debug_tx);
    match spawn_tracking(settings, link.clone(), debug_tx) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Hand tracking unavailable, keyboard only: {}", e);
            None
        }
    }
}

/// Setup the game world
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    state: Res<MatchState>,
) {
    world::spawn_camera(&mut commands);
    world::spawn_paddles(&mut commands, &state);
    world::spawn_ball(&mut commands, &mut meshes, &mut materials, &state);
    ui::spawn_hud(&mut commands, state.config());
}
