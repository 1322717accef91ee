//! Fixed-width stick axis text: `<sign><digit>.<digit><digit>`.
//!
//! Values are clamped to `[-1, 1]` and truncated toward zero to hundredths,
//! so `-0.0012` becomes `-0.00` and `0.999` becomes `+0.99`. The sign is
//! always written, which keeps every axis at exactly [`AXIS_WIDTH`] bytes.

use crate::layout::AXIS_WIDTH;

/// Smallest step an axis can carry on the wire.
pub const AXIS_PRECISION: f32 = 0.01;

const HUNDREDTHS_MAX: u32 = 100;

// Absorbs f32 representation error so a decoded value re-encodes to the same text.
const TRUNCATION_EPSILON: f64 = 1e-4;

pub fn format_axis(value: f32) -> [u8; AXIS_WIDTH] {
    let value = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
    let scaled = f64::from(value.abs()) * 100.0 + TRUNCATION_EPSILON;
    let hundredths = (scaled.floor() as u32).min(HUNDREDTHS_MAX);

    let sign = if value < 0.0 { b'-' } else { b'+' };
    [
        sign,
        digit(hundredths / 100),
        b'.',
        digit(hundredths / 10 % 10),
        digit(hundredths % 10),
    ]
}

/// Parses one axis field. Returns `None` for anything the encoder would not
/// have produced, including magnitudes above `1.00`.
pub fn parse_axis(field: &[u8]) -> Option<f32> {
    let &[sign, whole, b'.', tenths, hundredths] = field else {
        return None;
    };

    let negative = match sign {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };

    let magnitude = u32::from(value_of(whole)?) * 100
        + u32::from(value_of(tenths)?) * 10
        + u32::from(value_of(hundredths)?);
    if magnitude > HUNDREDTHS_MAX {
        return None;
    }

    let value = magnitude as f32 / 100.0;
    Some(if negative { -value } else { value })
}

fn digit(n: u32) -> u8 {
    b'0' + (n % 10) as u8
}

fn value_of(byte: u8) -> Option<u8> {
    byte.is_ascii_digit().then(|| byte - b'0')
}
