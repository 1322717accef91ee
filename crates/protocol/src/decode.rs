//! Record decoding.
//!
//! Decoding walks the record left to right at the fixed offsets in
//! [`crate::layout`]. A field that fails to parse is replaced with its zero
//! value and noted in the [`DecodeReport`]; the offset still advances by the
//! field's width so later fields stay aligned. Only a record shorter than
//! [`RECORD_LEN`] is rejected outright.

use crate::axis::parse_axis;
use crate::layout::{DELIMITER, DELIMITER_WIDTH, Field, RECORD_LEN};
use crate::state::{BUTTON_COUNT, Button, ControllerState, MAX_PLAYERS, Stick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("record too short: {len} bytes, need {required}")]
    TooShort { len: usize, required: usize },
}

/// Outcome of parsing a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    Value(T),
    /// The field was malformed; the carried value is the substituted default.
    Fallback(T),
}

impl<T> Parsed<T> {
    fn from_option(value: Option<T>, default: T) -> Self {
        match value {
            Some(value) => Parsed::Value(value),
            None => Parsed::Fallback(default),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Parsed::Fallback(_))
    }

    pub fn into_value(self) -> T {
        match self {
            Parsed::Value(value) | Parsed::Fallback(value) => value,
        }
    }
}

/// Diagnostics collected while decoding one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    fallbacks: Vec<Field>,
    delimiter_mismatch: bool,
    trailing_bytes: usize,
}

impl DecodeReport {
    /// Fields that were replaced by their default, in wire order.
    pub fn fallbacks(&self) -> &[Field] {
        &self.fallbacks
    }

    pub fn fallback_count(&self) -> usize {
        self.fallbacks.len()
    }

    pub fn fell_back(&self, field: Field) -> bool {
        self.fallbacks.contains(&field)
    }

    /// The byte after the player index was not `|`. Decoding skips it anyway.
    pub fn delimiter_mismatch(&self) -> bool {
        self.delimiter_mismatch
    }

    /// Bytes past [`RECORD_LEN`] that were ignored.
    pub fn trailing_bytes(&self) -> usize {
        self.trailing_bytes
    }

    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty() && !self.delimiter_mismatch && self.trailing_bytes == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub state: ControllerState,
    pub report: DecodeReport,
}

/// Decodes a record, discarding diagnostics.
pub fn decode(record: &str) -> Result<ControllerState, DecodeError> {
    decode_with_report(record).map(|decoded| decoded.state)
}

pub fn decode_with_report(record: &str) -> Result<Decoded, DecodeError> {
    let bytes = record.as_bytes();
    if bytes.len() < RECORD_LEN {
        tracing::warn!(len = bytes.len(), required = RECORD_LEN, "dropping short record");
        return Err(DecodeError::TooShort {
            len: bytes.len(),
            required: RECORD_LEN,
        });
    }

    let mut reader = FieldReader::new(&bytes[..RECORD_LEN]);
    reader.report.trailing_bytes = bytes.len() - RECORD_LEN;
    if reader.report.trailing_bytes > 0 {
        tracing::debug!(
            trailing = reader.report.trailing_bytes,
            "ignoring bytes past record end"
        );
    }

    let player_index = reader.read(Field::PlayerIndex, 0, parse_player_index);
    reader.skip_delimiter();

    let left_stick = Stick::new(
        reader.read(Field::LeftStickX, 0.0, parse_axis),
        reader.read(Field::LeftStickY, 0.0, parse_axis),
    );
    let right_stick = Stick::new(
        reader.read(Field::RightStickX, 0.0, parse_axis),
        reader.read(Field::RightStickY, 0.0, parse_axis),
    );

    let left_trigger_pressed = reader.read(Field::LeftTrigger, false, parse_flag);
    let right_trigger_pressed = reader.read(Field::RightTrigger, false, parse_flag);

    let mut buttons = [false; BUTTON_COUNT];
    for button in Button::ALL {
        buttons[button.index()] = reader.read(Field::Button(button), false, parse_flag);
    }

    let dpad_up = reader.read(Field::DpadUp, false, parse_flag);

    // Built in one piece so a half-decoded state is never observable.
    let state = ControllerState {
        player_index,
        left_stick,
        right_stick,
        left_trigger_pressed,
        right_trigger_pressed,
        buttons,
        dpad_up,
    };

    Ok(Decoded {
        state,
        report: reader.report,
    })
}

struct FieldReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    report: DecodeReport,
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            report: DecodeReport::default(),
        }
    }

    fn take(&mut self, width: usize) -> &'a [u8] {
        let raw = &self.bytes[self.pos..self.pos + width];
        self.pos += width;
        raw
    }

    fn skip_delimiter(&mut self) {
        if self.take(DELIMITER_WIDTH) != [DELIMITER].as_slice() {
            tracing::debug!(pos = self.pos - DELIMITER_WIDTH, "unexpected delimiter byte");
            self.report.delimiter_mismatch = true;
        }
    }

    fn read<T>(
        &mut self,
        field: Field,
        default: T,
        parse: impl FnOnce(&[u8]) -> Option<T>,
    ) -> T {
        debug_assert_eq!(self.pos, field.offset());
        let raw = self.take(field.width());
        let parsed = Parsed::from_option(parse(raw), default);
        if parsed.is_fallback() {
            tracing::debug!(?field, raw = %raw.escape_ascii(), "field fell back to default");
            self.report.fallbacks.push(field);
        }
        parsed.into_value()
    }
}

fn parse_player_index(field: &[u8]) -> Option<u8> {
    match *field {
        [byte] if byte.is_ascii_digit() && usize::from(byte - b'0') < MAX_PLAYERS => {
            Some(byte - b'0')
        }
        _ => None,
    }
}

fn parse_flag(field: &[u8]) -> Option<bool> {
    match field {
        b"1" => Some(true),
        b"0" => Some(false),
        _ => None,
    }
}
