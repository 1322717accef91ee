//! Record layout shared by the encoder and decoder.
//!
//! A record is `<P>|<S1><S2><S3><S4><T1><T2><B1>..<B10><D>`. Every offset
//! below is derived from [`FIELDS`], so the encoder and decoder cannot
//! drift apart.

use crate::state::Button;

pub const DELIMITER: u8 = b'|';
pub const DELIMITER_WIDTH: usize = 1;

pub const INDEX_WIDTH: usize = 1;
pub const AXIS_WIDTH: usize = 5;
pub const FLAG_WIDTH: usize = 1;

pub const FIELD_COUNT: usize = 18;

/// Total record length: index, delimiter, four axes, thirteen flags.
pub const RECORD_LEN: usize = {
    let mut len = DELIMITER_WIDTH;
    let mut i = 0;
    while i < FIELD_COUNT {
        len += FIELDS[i].width();
        i += 1;
    }
    len
};

/// One logical segment of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PlayerIndex,
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
    Button(Button),
    DpadUp,
}

/// Wire order of every field.
pub const FIELDS: [Field; FIELD_COUNT] = [
    Field::PlayerIndex,
    Field::LeftStickX,
    Field::LeftStickY,
    Field::RightStickX,
    Field::RightStickY,
    Field::LeftTrigger,
    Field::RightTrigger,
    Field::Button(Button::A),
    Field::Button(Button::B),
    Field::Button(Button::X),
    Field::Button(Button::Y),
    Field::Button(Button::LeftBumper),
    Field::Button(Button::RightBumper),
    Field::Button(Button::Back),
    Field::Button(Button::Start),
    Field::Button(Button::LeftStickClick),
    Field::Button(Button::RightStickClick),
    Field::DpadUp,
];

impl Field {
    pub const fn width(self) -> usize {
        match self {
            Field::PlayerIndex => INDEX_WIDTH,
            Field::LeftStickX | Field::LeftStickY | Field::RightStickX | Field::RightStickY => {
                AXIS_WIDTH
            }
            Field::LeftTrigger | Field::RightTrigger | Field::Button(_) | Field::DpadUp => {
                FLAG_WIDTH
            }
        }
    }

    /// Byte offset of this field within a record.
    pub fn offset(self) -> usize {
        let mut offset = 0;
        for field in FIELDS {
            if field == self {
                return offset;
            }
            offset += field.width();
            if field == Field::PlayerIndex {
                offset += DELIMITER_WIDTH;
            }
        }
        unreachable!("every field appears in FIELDS")
    }
}
