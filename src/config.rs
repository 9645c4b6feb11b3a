//! JSON game configuration with built-in defaults.

use crate::error::GameError;
use crate::map::TileSampling;
use macroquad::prelude::{vec2, Color, Conf, Vec2};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Env var naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "LOST_JUNGLE_CONFIG";

/// Game settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window caption.
    pub window_title: String,
    /// Initial window width in pixels.
    pub window_width: i32,
    /// Initial window height in pixels.
    pub window_height: i32,
    /// Target ticks per second; the animation counter wraps at `2 * fps`.
    pub fps: u32,
    /// Camera zoom, screen pixels per world pixel.
    pub zoom: f32,
    /// Player sprite and movement.
    pub player: PlayerConfig,
    /// Chunked Tiled JSON map.
    pub map_path: PathBuf,
    /// Looping background track; `None` plays nothing.
    pub music_path: Option<PathBuf>,
    /// How tiles pick their texture region.
    pub tile_sampling: TileSampling,
    /// Draw the FPS readout.
    pub show_fps: bool,
    /// Outline every tile and the player.
    pub debug_outlines: bool,
    /// RGBA, 0-255.
    pub background: [u8; 4],
}

/// Player sprite and movement settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite sheet image.
    pub sprite_path: PathBuf,
    /// Grid rows, one per facing.
    pub rows: u32,
    /// Grid columns, one per walk frame.
    pub columns: u32,
    /// Pixels per tick on a straight line.
    pub base_speed: f32,
    /// Defaults to the window centre.
    pub start: Option<[f32; 2]>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprite_path: PathBuf::from("assets/Characters/player.png"),
            rows: 4,
            columns: 4,
            base_speed: 2.0,
            start: None,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Lost in the Jungle".to_owned(),
            window_width: 1500,
            window_height: 800,
            fps: 60,
            zoom: 3.0,
            player: PlayerConfig::default(),
            map_path: PathBuf::from("maps/tiles2.json"),
            music_path: Some(PathBuf::from("assets/audios/bg-music.ogg")),
            tile_sampling: TileSampling::WholeTexture,
            show_fps: true,
            debug_outlines: false,
            background: [175, 250, 202, 255],
        }
    }
}

impl GameConfig {
    /// Parse a config document; `path` is only used for error reporting.
    pub fn from_json_str(txt: &str, path: &Path) -> Result<Self, GameError> {
        serde_json::from_str(txt).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| GameError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&txt, p)
    }

    /// Config from the file named by [`CONFIG_ENV_VAR`], or defaults when unset.
    pub fn from_env() -> Result<Self, GameError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// Macroquad window settings.
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.window_title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
            ..Default::default()
        }
    }

    /// Configured window size.
    pub fn screen_size(&self) -> Vec2 {
        vec2(self.window_width as f32, self.window_height as f32)
    }

    /// Where the player spawns.
    pub fn player_start(&self) -> Vec2 {
        match self.player.start {
            Some([x, y]) => vec2(x, y),
            None => self.screen_size() / 2.0,
        }
    }

    /// Clear colour.
    pub fn background_color(&self) -> Color {
        let [r, g, b, a] = self.background;
        Color::from_rgba(r, g, b, a)
    }
}
