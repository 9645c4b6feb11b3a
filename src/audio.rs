//! Music and sound switches, and the looping background track.

use crate::error::GameError;
use macroquad::audio::{
    load_sound, play_sound, set_sound_volume, stop_sound, PlaySoundParams, Sound,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Player-facing sound switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSettings {
    /// Background music audible.
    pub music_on: bool,
    /// Sound effects enabled.
    pub sound_on: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_on: false,
            sound_on: true,
        }
    }
}

impl AudioSettings {
    /// `M` key.
    pub fn toggle_music(&mut self) {
        self.music_on = !self.music_on;
        info!(music_on = self.music_on, "music toggled");
    }

    /// `N` key.
    pub fn toggle_sound(&mut self) {
        self.sound_on = !self.sound_on;
        info!(sound_on = self.sound_on, "sound toggled");
    }

    /// 1.0 when music is on, else muted.
    #[inline]
    pub fn music_volume(&self) -> f32 {
        if self.music_on {
            1.0
        } else {
            0.0
        }
    }
}

/// Whether Macroquad's audio backend decodes files with this extension.
pub fn is_supported_format(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ogg") || e.eq_ignore_ascii_case("wav"))
}

/// Looping background track, muted rather than stopped when switched off.
pub struct Music {
    sound: Sound,
    volume: f32,
}

impl Music {
    /// Load the track without starting it.
    pub async fn load(path: &Path) -> Result<Self, GameError> {
        if !is_supported_format(path) {
            warn!(path = %path.display(), "music is not WAV or OGG and may not play");
        }
        let sound = load_sound(&path.to_string_lossy())
            .await
            .map_err(|e| GameError::AssetLoad {
                path: path.to_path_buf(),
                reason: format!("{e:?}"),
            })?;
        debug!(path = %path.display(), "loaded music");
        Ok(Self { sound, volume: 0.0 })
    }

    /// Start looping, silent until [`Music::apply`] turns it up.
    pub fn start(&self) {
        play_sound(
            &self.sound,
            PlaySoundParams {
                looped: true,
                volume: self.volume,
            },
        );
    }

    /// Mute or unmute to follow `settings`.
    pub fn apply(&mut self, settings: &AudioSettings) {
        let volume = settings.music_volume();
        if volume != self.volume {
            set_sound_volume(&self.sound, volume);
            self.volume = volume;
        }
    }

    /// Stop playback and free the track.
    pub fn release(self) {
        stop_sound(&self.sound);
        debug!("music released");
    }
}
