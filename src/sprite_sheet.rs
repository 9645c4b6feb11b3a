//! Sprite sheet frame geometry.

use crate::error::GameError;
use macroquad::prelude::Rect;

/// Grid-of-frames layout of a sprite texture.
///
/// Only the geometry lives here; the texture itself belongs to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    /// Width of one frame in texels.
    pub frame_w: u32,
    /// Height of one frame in texels.
    pub frame_h: u32,
    /// Frames per row; also the length of a walk cycle.
    pub columns: u32,
    /// One row per facing direction.
    pub rows: u32,
}

impl SpriteSheet {
    /// Derive frame size from the texture size and grid counts.
    pub fn new(texture_w: u32, texture_h: u32, rows: u32, columns: u32) -> Result<Self, GameError> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidSpriteSheet(format!(
                "grid must have at least one row and column, got {rows}x{columns}"
            )));
        }
        if texture_w < columns || texture_h < rows {
            return Err(GameError::InvalidSpriteSheet(format!(
                "texture {texture_w}x{texture_h} is smaller than a {rows}x{columns} grid"
            )));
        }
        if texture_w % columns != 0 || texture_h % rows != 0 {
            return Err(GameError::InvalidSpriteSheet(format!(
                "texture {texture_w}x{texture_h} is not a whole {rows}x{columns} grid"
            )));
        }

        Ok(Self {
            frame_w: texture_w / columns,
            frame_h: texture_h / rows,
            columns,
            rows,
        })
    }

    /// Source rectangle of frame `(row, col)`. Indices past the grid are clamped.
    pub fn frame_rect(&self, row: u32, col: u32) -> Rect {
        let row = row.min(self.rows.saturating_sub(1));
        let col = col.min(self.columns.saturating_sub(1));
        Rect::new(
            (col * self.frame_w) as f32,
            (row * self.frame_h) as f32,
            self.frame_w as f32,
            self.frame_h as f32,
        )
    }

    /// `(frame_w, frame_h)` as floats, the size the sprite is drawn at.
    #[inline]
    pub fn frame_size(&self) -> (f32, f32) {
        (self.frame_w as f32, self.frame_h as f32)
    }
}
