//! Texture loading and execution of draw commands.

use crate::command::{DrawCommand, TextureRef};
use crate::config::PlayerConfig;
use crate::error::GameError;
use crate::map::TileMap;
use crate::sprite_sheet::SpriteSheet;
use macroquad::prelude::*;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;
use tracing::{debug, warn};

async fn load_nearest(path: &Path) -> Result<Texture2D, GameError> {
    let tex = load_texture(&path.to_string_lossy())
        .await
        .map_err(|e| GameError::AssetLoad {
            path: path.to_path_buf(),
            reason: format!("{e:?}"),
        })?;
    tex.set_filter(FilterMode::Nearest);
    debug!(path = %path.display(), w = tex.width(), h = tex.height(), "loaded texture");
    Ok(tex)
}

/// GPU textures for one run: the player sheet plus one per tileset class.
pub struct Assets {
    player: Texture2D,
    classes: Vec<Texture2D>,
}

impl Assets {
    /// Load the player sheet and every class texture of `map`.
    /// Tileset images resolve against `map_dir`.
    pub async fn load(
        player: &PlayerConfig,
        map: &TileMap,
        map_dir: &Path,
    ) -> Result<(Self, SpriteSheet), GameError> {
        let player_tex = load_nearest(&player.sprite_path).await?;
        let sheet = SpriteSheet::new(
            player_tex.width() as u32,
            player_tex.height() as u32,
            player.rows,
            player.columns,
        )?;
        debug!(frame_w = sheet.frame_w, frame_h = sheet.frame_h, "player sprite sheet");

        let mut classes = Vec::with_capacity(map.texture_classes().len());
        for (_, class, ts) in map.texture_sources() {
            if ts.image.is_empty() {
                warn!(class, tileset = %ts.name, "tileset has no image");
            }
            classes.push(load_nearest(&map_dir.join(&ts.image)).await?);
        }

        Ok((
            Self {
                player: player_tex,
                classes,
            },
            sheet,
        ))
    }

    fn texture(&self, texture: TextureRef) -> Option<&Texture2D> {
        match texture {
            TextureRef::Player => Some(&self.player),
            TextureRef::Class(slot) => self.classes.get(slot),
        }
    }

    /// Issue the draw calls in order. Expects the world camera to be set.
    pub fn draw(&self, commands: &[DrawCommand], outlines: bool) {
        for cmd in commands {
            let Some(tex) = self.texture(cmd.texture) else {
                continue;
            };
            let d = cmd.dest;
            let (flip_x, flip_y, turn) = cmd.flip.mirror_and_turn();
            // a quarter turn about the centre swaps the quad's extents
            let (pos, size) = if turn {
                let c = d.center();
                (vec2(c.x - d.h / 2.0, c.y - d.w / 2.0), vec2(d.h, d.w))
            } else {
                (vec2(d.x, d.y), vec2(d.w, d.h))
            };
            draw_texture_ex(
                tex,
                pos.x,
                pos.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(size),
                    source: cmd.src,
                    rotation: if turn { FRAC_PI_2 } else { 0.0 },
                    flip_x,
                    flip_y,
                    ..Default::default()
                },
            );

            if outlines {
                match cmd.texture {
                    TextureRef::Class(_) => draw_rectangle_lines(d.x, d.y, d.w, d.h, 1.0, RED),
                    TextureRef::Player => {
                        let c = d.center();
                        draw_circle_lines(c.x, c.y, d.w / 3.0, 1.0, GREEN)
                    }
                }
            }
        }
    }

    /// Free every texture.
    pub fn release(self) {
        let count = self.classes.len() + 1;
        drop(self);
        debug!(count, "textures released");
    }
}
