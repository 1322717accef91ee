use crate::axis::format_axis;
use crate::layout::{DELIMITER, RECORD_LEN};
use crate::snapshot::ControllerSnapshot;
use crate::state::{Button, MAX_PLAYERS};

/// Encodes one controller snapshot into a record of exactly [`RECORD_LEN`]
/// bytes.
///
/// `local_player_index` must be below [`MAX_PLAYERS`]; anything larger is
/// written as `0`, which the decoder can't tell apart from a real player 0,
/// so callers should validate the slot they were assigned.
pub fn encode(local_player_index: u8, snapshot: &impl ControllerSnapshot) -> String {
    let mut record = Vec::with_capacity(RECORD_LEN);

    let index = if usize::from(local_player_index) < MAX_PLAYERS {
        local_player_index
    } else {
        tracing::warn!(local_player_index, "player index out of range, encoding as 0");
        0
    };
    record.push(b'0' + index);
    record.push(DELIMITER);

    let left = snapshot.left_stick();
    let right = snapshot.right_stick();
    for axis in [left.x, left.y, right.x, right.y] {
        record.extend_from_slice(&format_axis(axis));
    }

    record.push(flag(snapshot.left_trigger_pressed()));
    record.push(flag(snapshot.right_trigger_pressed()));
    for button in Button::ALL {
        record.push(flag(snapshot.button(button)));
    }
    record.push(flag(snapshot.dpad_up()));

    debug_assert_eq!(record.len(), RECORD_LEN);
    // Only ASCII digits, signs, dots and the delimiter are ever pushed.
    String::from_utf8(record).unwrap_or_default()
}

fn flag(pressed: bool) -> u8 {
    if pressed { b'1' } else { b'0' }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ControllerState, Stick};

    #[test]
    fn idle_controller() {
        let record = encode(0, &ControllerState::default());
        assert_eq!(record, concat!("0|", "+0.00+0.00+0.00+0.00", "00", "0000000000", "0"));
    }

    #[test]
    fn fields_land_in_wire_order() {
        let state = ControllerState {
            player_index: 3,
            left_stick: Stick::new(-1.0, 0.25),
            right_stick: Stick::new(0.5, -0.75),
            left_trigger_pressed: false,
            right_trigger_pressed: true,
            buttons: [true, false, false, true, false, false, false, false, false, true],
            dpad_up: true,
        };
        let record = encode(3, &state);
        assert_eq!(record, concat!("3|", "-1.00+0.25+0.50-0.75", "01", "1001000001", "1"));
        assert_eq!(record.len(), RECORD_LEN);
    }

    #[test]
    fn out_of_range_index_is_written_as_zero() {
        let record = encode(7, &ControllerState::default());
        assert!(record.starts_with("0|"));
    }
}
