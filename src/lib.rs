#![warn(missing_docs)]

//! Top-down jungle walker for Macroquad: an animated player over a chunked
//! Tiled JSON map, followed by a fixed-zoom camera.

pub mod audio;
pub mod camera;
pub mod command;
pub mod config;
mod error;
pub mod frame;
pub mod game;
pub mod hud;
pub mod input;
mod loader {
    pub mod json_loader;
}
#[allow(missing_docs)]
pub mod map;
pub mod player;
pub mod render;
pub mod sprite_sheet;

pub use camera::FollowCamera;
pub use command::{DrawCommand, TextureRef, TileFlip};
pub use config::GameConfig;
pub use error::GameError;
pub use frame::GameFrame;
pub use game::GameState;
pub use input::TickInput;
pub use loader::json_loader::{decode_map_file, decode_map_str, encode_map};
pub use map::{Chunk, TileLayer, TileMap, TileSampling, Tileset};
pub use player::{Direction, MoveIntent, Player};
pub use sprite_sheet::SpriteSheet;
