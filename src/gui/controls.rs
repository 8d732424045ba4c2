//! Turns bevy input into the simulation's pointer and key state

use bevy::ecs::query::With;
use bevy::ecs::system::{Query, Res, ResMut, Resource};
use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::MouseButton;
use bevy::input::Input;
use bevy::window::{PrimaryWindow, Window};

use crate::physics::fallingsand::controls::{ControlKey, KeyState, PointerState};

/// Which keys trigger which controls
pub const KEY_BINDINGS: [(KeyCode, ControlKey); 9] = [
    (KeyCode::Space, ControlKey::Clear),
    (KeyCode::BracketLeft, ControlKey::BrushShrink),
    (KeyCode::Minus, ControlKey::BrushShrink),
    (KeyCode::BracketRight, ControlKey::BrushGrow),
    (KeyCode::Equals, ControlKey::BrushGrow),
    (KeyCode::Key1, ControlKey::PaintMode),
    (KeyCode::S, ControlKey::PaintMode),
    (KeyCode::Key4, ControlKey::EraseMode),
    (KeyCode::E, ControlKey::EraseMode),
];

/// Input gathered every frame, waiting for the next fixed tick
/// Key presses pile up until a tick takes them, so a frame without a tick loses nothing
#[derive(Resource, Default, Debug)]
pub struct PendingControls {
    pub pointer: PointerState,
    keys: KeyState,
}

impl PendingControls {
    /// Hands over the accumulated key presses and starts afresh
    pub fn take_keys(&mut self) -> KeyState {
        std::mem::take(&mut self.keys)
    }
    pub fn press(&mut self, key: ControlKey) {
        self.keys.press(key);
    }
}

pub fn collect_controls_system(
    mouse: Res<Input<MouseButton>>,
    keyboard: Res<Input<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pending: ResMut<PendingControls>,
) {
    pending.pointer = PointerState {
        position: windows
            .get_single()
            .ok()
            .and_then(|window| window.cursor_position()),
        primary_down: mouse.pressed(MouseButton::Left),
    };
    for (key_code, control) in KEY_BINDINGS {
        if keyboard.just_pressed(key_code) {
            pending.press(control);
        }
    }
}
