//! Secondary window showing the mirrored camera feed with hand landmarks

use bevy::asset::RenderAssetUsages;
use bevy::camera::RenderTarget;
use bevy::camera::visibility::RenderLayers;
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::{WindowRef, WindowResolution};
use crossbeam_channel::Receiver;
use image::{DynamicImage, RgbImage};

use super::shared::TrackingLink;

pub const DEBUG_WINDOW_TITLE: &str = "MediaPipe Hands";
const DEBUG_LAYER: usize = 1;
const DEBUG_WIDTH: u32 = 640;
const DEBUG_HEIGHT: u32 = 480;

/// Annotated frames coming from the tracking thread
#[derive(Resource)]
pub struct DebugFrames(pub Receiver<RgbImage>);

/// Entities and texture of the open debug view
#[derive(Resource, Debug, Clone)]
pub struct DebugView {
    pub window: Entity,
    pub image: Handle<Image>,
}

#[derive(Component)]
pub struct DebugViewWindow;

/// Camera and sprite drawing into the debug window
#[derive(Component)]
pub struct DebugViewSprite;

/// Turn an annotated RGB frame into a texture
pub fn frame_to_image(frame: RgbImage) -> Image {
    let (width, height) = frame.dimensions();
    let rgba = DynamicImage::ImageRgb8(frame).to_rgba8();
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Open the debug window if tracking is feeding it frames
pub fn spawn_debug_view(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    frames: Option<Res<DebugFrames>>,
) {
    if frames.is_none() {
        return;
    }

    let window = commands
        .spawn((
            Window {
                title: DEBUG_WINDOW_TITLE.to_string(),
                resolution: WindowResolution::new(DEBUG_WIDTH, DEBUG_HEIGHT),
                ..default()
            },
            DebugViewWindow,
        ))
        .id();

    let image = images.add(frame_to_image(RgbImage::new(DEBUG_WIDTH, DEBUG_HEIGHT)));

    commands.spawn((
        Camera2d,
        Camera {
            target: RenderTarget::Window(WindowRef::Entity(window)),
            ..default()
        },
        RenderLayers::layer(DEBUG_LAYER),
        DebugViewSprite,
    ));
    commands.spawn((
        Sprite::from_image(image.clone()),
        RenderLayers::layer(DEBUG_LAYER),
        DebugViewSprite,
    ));

    commands.insert_resource(DebugView { window, image });
    info!("Opened hand tracking debug view");
}

/// Show the newest frame, dropping any older ones still queued
pub fn upload_debug_frame(
    frames: Option<Res<DebugFrames>>,
    view: Option<Res<DebugView>>,
    mut images: ResMut<Assets<Image>>,
) {
    let (Some(frames), Some(view)) = (frames, view) else {
        return;
    };
    let Some(frame) = frames.0.try_iter().last() else {
        return;
    };
    if let Some(image) = images.get_mut(&view.image) {
        *image = frame_to_image(frame);
    }
}

/// Esc in the debug window, or closing it, stops hand tracking
pub fn handle_debug_view_keys(
    mut keys: MessageReader<KeyboardInput>,
    view: Option<Res<DebugView>>,
    link: Option<Res<TrackingLink>>,
    windows: Query<(), With<DebugViewWindow>>,
) {
    let (Some(view), Some(link)) = (view, link) else {
        keys.clear();
        return;
    };
    if link.stop_requested() {
        keys.clear();
        return;
    }

    let escape = keys.read().any(|key| {
        key.window == view.window
            && key.key_code == KeyCode::Escape
            && key.state == ButtonState::Pressed
    });
    if escape {
        info!("Esc pressed in debug view, stopping hand tracking");
        link.request_stop();
    } else if windows.get(view.window).is_err() {
        info!("Debug view closed, stopping hand tracking");
        link.request_stop();
    }
}

/// Tear the debug view down once the tracking thread has ended
pub fn close_debug_view_when_finished(
    mut commands: Commands,
    view: Option<Res<DebugView>>,
    link: Option<Res<TrackingLink>>,
    parts: Query<Entity, Or<(With<DebugViewWindow>, With<DebugViewSprite>)>>,
) {
    let (Some(_), Some(link)) = (view, link) else {
        return;
    };
    if !link.is_finished() {
        return;
    }

    for entity in &parts {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<DebugView>();
    commands.remove_resource::<DebugFrames>();
    info!("Closed hand tracking debug view");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::keyboard::Key;

    fn app_with_view() -> (App, TrackingLink, Entity) {
        let mut app = App::new();
        app.add_message::<KeyboardInput>();
        let link = TrackingLink::new();
        app.insert_resource(link.clone());
        let window = app.world_mut().spawn(DebugViewWindow).id();
        app.world_mut().spawn(DebugViewSprite);
        app.insert_resource(DebugView {
            window,
            image: Handle::default(),
        });
        (app, link, window)
    }

    fn escape(window: Entity) -> KeyboardInput {
        KeyboardInput {
            key_code: KeyCode::Escape,
            logical_key: Key::Escape,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window,
        }
    }

    #[test]
    fn test_frame_to_image_keeps_size_and_pixels() {
        let mut frame = RgbImage::new(4, 2);
        frame.put_pixel(1, 0, image::Rgb([255, 0, 0]));
        let image = frame_to_image(frame);
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 2);
        let data = image.data.as_ref().unwrap();
        assert_eq!(data.len(), 4 * 2 * 4);
        assert_eq!(&data[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_escape_in_debug_window_requests_stop() {
        let (mut app, link, window) = app_with_view();
        app.add_systems(Update, handle_debug_view_keys);

        app.update();
        assert!(!link.stop_requested());

        app.world_mut().write_message(escape(window));
        app.update();
        assert!(link.stop_requested());
    }

    #[test]
    fn test_escape_in_other_window_is_ignored() {
        let (mut app, link, _) = app_with_view();
        app.add_systems(Update, handle_debug_view_keys);
        let game_window = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(escape(game_window));
        app.update();
        assert!(!link.stop_requested());
    }

    #[test]
    fn test_closed_window_requests_stop() {
        let (mut app, link, window) = app_with_view();
        app.add_systems(Update, handle_debug_view_keys);

        app.world_mut().despawn(window);
        app.update();
        assert!(link.stop_requested());
    }

    #[test]
    fn test_finished_tracking_closes_view() {
        let (mut app, link, _) = app_with_view();
        app.add_systems(Update, close_debug_view_when_finished);

        app.update();
        assert!(app.world().get_resource::<DebugView>().is_some());

        link.mark_finished();
        app.update();
        assert!(app.world().get_resource::<DebugView>().is_none());
        let world = app.world_mut();
        let remaining = world
            .query_filtered::<Entity, Or<(With<DebugViewWindow>, With<DebugViewSprite>)>>()
            .iter(world)
            .count();
        assert_eq!(remaining, 0);
    }
}
