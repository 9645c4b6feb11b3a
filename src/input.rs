//! Keyboard polling.

use crate::player::MoveIntent;
use macroquad::prelude::{is_key_down, is_key_pressed, KeyCode};

/// Everything the loop reads from the keyboard in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    /// Held movement keys.
    pub intent: MoveIntent,
    /// `M` pressed this tick.
    pub toggle_music: bool,
    /// `N` pressed this tick.
    pub toggle_sound: bool,
}

impl TickInput {
    /// Movement only.
    pub fn moving(intent: MoveIntent) -> Self {
        Self {
            intent,
            ..Default::default()
        }
    }
}

fn any_down(keys: &[KeyCode]) -> bool {
    keys.iter().any(|&k| is_key_down(k))
}

/// Poll arrow keys / WASD and the settings toggles.
pub fn poll() -> TickInput {
    TickInput {
        intent: MoveIntent {
            up: any_down(&[KeyCode::W, KeyCode::Up]),
            down: any_down(&[KeyCode::S, KeyCode::Down]),
            left: any_down(&[KeyCode::A, KeyCode::Left]),
            right: any_down(&[KeyCode::D, KeyCode::Right]),
        },
        toggle_music: is_key_pressed(KeyCode::M),
        toggle_sound: is_key_pressed(KeyCode::N),
    }
}
