//! Player movement and walk-cycle state machine.

use crate::frame::GameFrame;
use crate::sprite_sheet::SpriteSheet;
use macroquad::prelude::{vec2, Rect, Vec2};

/// Ticks between walk-cycle frames.
pub const WALK_FRAME_TICKS: u32 = 8;
/// Diagonal movement divides the base speed by this.
pub const DIAGONAL_DIVISOR: f32 = 1.5;

/// Facing direction; `Idle` means no movement this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Standing still.
    #[default]
    Idle,
    /// Walking towards negative y.
    Up,
    /// Walking towards positive y.
    Down,
    /// Walking towards negative x.
    Left,
    /// Walking towards positive x.
    Right,
}

impl Direction {
    /// Sprite sheet row for this facing. `Idle` has none and keeps the last row.
    pub fn sprite_row(self) -> Option<u32> {
        match self {
            Direction::Idle => None,
            Direction::Down => Some(0),
            Direction::Up => Some(1),
            Direction::Left => Some(2),
            Direction::Right => Some(3),
        }
    }
}

/// Directional input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveIntent {
    /// Move up.
    pub up: bool,
    /// Move down. Ignored when `up` is also set.
    pub down: bool,
    /// Move left.
    pub left: bool,
    /// Move right. Ignored when `left` is also set.
    pub right: bool,
}

impl MoveIntent {
    /// No keys held.
    pub const NONE: MoveIntent = MoveIntent {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    fn vertical(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }

    fn horizontal(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// The controllable entity: position plus the walk animation state machine.
///
/// `position` is the sprite's pivot. The sprite is drawn with its pivot at
/// its full frame size, so it covers `[position - size, position]`.
#[derive(Debug, Clone)]
pub struct Player {
    /// Pivot position in world pixels.
    pub position: Vec2,
    /// Speed in pixels per tick along one axis.
    pub base_speed: f32,
    /// Speed used for the last movement (reduced on diagonals).
    pub speed: f32,
    /// Facing, `Idle` when no key was held.
    pub direction: Direction,
    /// Current walk-cycle column, always `< sheet.columns`.
    pub frame: u32,
    /// Current sprite row; kept while idle.
    pub row: u32,
    /// Whether the player moved this tick.
    pub running: bool,
    sheet: SpriteSheet,
}

impl Player {
    /// Player standing still at `position`, facing down.
    pub fn new(sheet: SpriteSheet, position: Vec2, base_speed: f32) -> Self {
        Self {
            position,
            base_speed,
            speed: base_speed,
            direction: Direction::Idle,
            frame: 0,
            row: 0,
            running: false,
            sheet,
        }
    }

    /// Sprite geometry.
    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    /// Run one tick of the movement and animation state machine.
    pub fn update(&mut self, intent: MoveIntent, game_frame: &GameFrame) {
        self.running = false;

        let vertical = intent.vertical();
        let horizontal = intent.horizontal();

        self.speed = if vertical.is_some() && horizontal.is_some() {
            self.base_speed / DIAGONAL_DIVISOR
        } else {
            self.base_speed
        };

        if let Some(dir) = vertical {
            self.position.y += if dir == Direction::Up {
                -self.speed
            } else {
                self.speed
            };
            self.direction = dir;
            self.running = true;
        }
        // horizontal facing wins on diagonals
        if let Some(dir) = horizontal {
            self.position.x += if dir == Direction::Left {
                -self.speed
            } else {
                self.speed
            };
            self.direction = dir;
            self.running = true;
        }

        if !self.running {
            self.direction = Direction::Idle;
        }

        self.animate(game_frame);
    }

    fn animate(&mut self, game_frame: &GameFrame) {
        if !self.running {
            self.frame = 0;
            return;
        }

        if let Some(row) = self.direction.sprite_row() {
            self.row = row.min(self.sheet.rows.saturating_sub(1));
        }
        if game_frame.fires_every(WALK_FRAME_TICKS) {
            self.frame += 1;
        }
        if self.frame >= self.sheet.columns {
            self.frame = 0;
        }
    }

    /// Texture region of the current frame.
    pub fn source_rect(&self) -> Rect {
        self.sheet.frame_rect(self.row, self.frame)
    }

    /// World-space rectangle the sprite covers.
    pub fn dest_rect(&self) -> Rect {
        let (w, h) = self.sheet.frame_size();
        Rect::new(self.position.x - w, self.position.y - h, w, h)
    }

    /// Visual centre of the sprite; what the camera follows.
    pub fn center(&self) -> Vec2 {
        let (w, h) = self.sheet.frame_size();
        self.position - vec2(w / 2.0, h / 2.0)
    }
}
