//! Per-tick update order and render list.

use crate::audio::AudioSettings;
use crate::camera::FollowCamera;
use crate::command::{DrawCommand, TextureRef, TileFlip};
use crate::config::GameConfig;
use crate::frame::GameFrame;
use crate::input::TickInput;
use crate::map::{TileMap, TileSampling};
use crate::player::Player;
use crate::sprite_sheet::SpriteSheet;

/// All mutable game state, owned by the loop driver.
pub struct GameState {
    /// Animation pacing counter.
    pub frame: GameFrame,
    /// The controllable entity.
    pub player: Player,
    /// Recomputed from the player every tick.
    pub camera: FollowCamera,
    /// Read-only after load.
    pub map: TileMap,
    /// Music and sound switches.
    pub audio: AudioSettings,
    sampling: TileSampling,
}

impl GameState {
    /// Initial state: player idle at the configured start, camera on it.
    pub fn new(config: &GameConfig, map: TileMap, sheet: SpriteSheet) -> Self {
        let player = Player::new(sheet, config.player_start(), config.player.base_speed);
        let camera = FollowCamera::new(player.center(), config.zoom, config.screen_size());
        Self {
            frame: GameFrame::new(config.fps),
            player,
            camera,
            map,
            audio: AudioSettings::default(),
            sampling: config.tile_sampling,
        }
    }

    /// Frame counter, settings toggles, player, then camera.
    pub fn tick(&mut self, input: TickInput) {
        self.frame.advance();

        if input.toggle_music {
            self.audio.toggle_music();
        }
        if input.toggle_sound {
            self.audio.toggle_sound();
        }

        self.player.update(input.intent, &self.frame);
        self.camera.follow(self.player.center());
    }

    /// Map layers back to front, then the player on top.
    pub fn emit_draws(&self, out: &mut Vec<DrawCommand>) {
        self.map.emit_draws(self.sampling, out);
        out.push(DrawCommand {
            texture: TextureRef::Player,
            layer_index: None,
            src: Some(self.player.source_rect()),
            dest: self.player.dest_rect(),
            flip: TileFlip::default(),
        });
    }
}
