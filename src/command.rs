//! Backend-neutral draw calls.

use macroquad::prelude::Rect;

/// Which loaded texture a draw samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureRef {
    /// Tileset class texture, by slot in [`TileMap::texture_classes`](crate::TileMap::texture_classes).
    Class(usize),
    /// The player's sprite sheet.
    Player,
}

/// Tiled flip flags of one tile, applied in the order diagonal, horizontal, vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileFlip {
    /// Mirror left to right.
    pub h: bool,
    /// Mirror top to bottom.
    pub v: bool,
    /// Main-diagonal flip: swaps x and y.
    pub d: bool,
}

impl TileFlip {
    /// `(flip_x, flip_y, quarter_turn)` for a backend that mirrors the
    /// source before rotating it clockwise.
    ///
    /// The diagonal flip is a transpose, i.e. a vertical mirror followed by a
    /// quarter turn. Mirrors applied after the turn swap axes when moved in
    /// front of it.
    pub fn mirror_and_turn(self) -> (bool, bool, bool) {
        if self.d {
            (self.v, !self.h, true)
        } else {
            (self.h, self.v, false)
        }
    }
}

/// One textured quad, in world coordinates. Executed in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Texture to sample.
    pub texture: TextureRef,
    /// Map layer this came from; `None` for the player.
    pub layer_index: Option<usize>,
    /// Texture region, `None` for the whole texture.
    pub src: Option<Rect>,
    /// Where the region lands.
    pub dest: Rect,
    /// Flips to apply to the region; tiles sampled from an atlas only.
    pub flip: TileFlip,
}
