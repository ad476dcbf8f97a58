//! Background music

use bevy::prelude::*;

use crate::constants::MUSIC_TRACK;

/// Marker for the looping music entity
#[derive(Component)]
pub struct BackgroundMusic;

/// Start the background track on a loop. A missing file is reported by the
/// asset server and the game plays on silently.
pub fn start_music(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        AudioPlayer::new(asset_server.load(MUSIC_TRACK)),
        PlaybackSettings::LOOP,
        BackgroundMusic,
    ));
}
