//! Controller state carried by a record.

pub const MAX_PLAYERS: usize = 4;
pub const BUTTON_COUNT: usize = 10;

/// Digital buttons in wire order. The Xbox guide button is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    LeftStickClick,
    RightStickClick,
}

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LeftBumper,
        Button::RightBumper,
        Button::Back,
        Button::Start,
        Button::LeftStickClick,
        Button::RightStickClick,
    ];

    /// Position of this button in [`ControllerState::buttons`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Analog stick position, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stick {
    pub x: f32,
    pub y: f32,
}

impl Stick {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One player's input for one tick, as reconstructed from a record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerState {
    pub player_index: u8,
    pub left_stick: Stick,
    pub right_stick: Stick,
    pub left_trigger_pressed: bool,
    pub right_trigger_pressed: bool,
    pub buttons: [bool; BUTTON_COUNT],
    pub dpad_up: bool,
}

impl ControllerState {
    pub fn new(player_index: u8) -> Self {
        Self {
            player_index,
            ..Self::default()
        }
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    pub fn set_pressed(&mut self, button: Button, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }

    /// Builder-style variant of [`set_pressed`](Self::set_pressed).
    pub fn with_button(mut self, button: Button) -> Self {
        self.set_pressed(button, true);
        self
    }
}
