//! Seam between the hardware polling layer and the encoder.

use crate::state::{Button, ControllerState, Stick};

/// A live view of a local controller, read once per tick by the encoder.
///
/// Implementations must not block; the encoder reads every accessor once.
pub trait ControllerSnapshot {
    fn left_stick(&self) -> Stick;
    fn right_stick(&self) -> Stick;
    fn left_trigger_pressed(&self) -> bool;
    fn right_trigger_pressed(&self) -> bool;
    fn button(&self, button: Button) -> bool;
    fn dpad_up(&self) -> bool;
}

// Lets a decoded state be re-encoded, which is how peers echo and tests round-trip.
impl ControllerSnapshot for ControllerState {
    fn left_stick(&self) -> Stick {
        self.left_stick
    }

    fn right_stick(&self) -> Stick {
        self.right_stick
    }

    fn left_trigger_pressed(&self) -> bool {
        self.left_trigger_pressed
    }

    fn right_trigger_pressed(&self) -> bool {
        self.right_trigger_pressed
    }

    fn button(&self, button: Button) -> bool {
        self.pressed(button)
    }

    fn dpad_up(&self) -> bool {
        self.dpad_up
    }
}
