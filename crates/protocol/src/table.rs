//! Per-player input table consumed by the simulation.
//!
//! Each applied record replaces the previous state for its player index.
//! Because replacement is not commutative, records must arrive in tick order;
//! the table refuses anything that is not strictly newer than what it holds.

use crate::decode::{DecodeError, DecodeReport, decode_with_report};
use crate::layout::Field;
use crate::message::Tick;
use crate::state::{ControllerState, MAX_PLAYERS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("record carries no valid player index")]
    UnknownPlayer,
    #[error("stale record for player {player_index}: tick {tick} is not after {last_applied}")]
    Stale {
        player_index: u8,
        tick: Tick,
        last_applied: Tick,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    tick: Tick,
    state: ControllerState,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerInputTable {
    entries: [Option<Entry>; MAX_PLAYERS],
}

impl PlayerInputTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `record` and, if it is usable and newer than the current
    /// entry, replaces that player's state. On any error the table is left
    /// untouched.
    pub fn apply(&mut self, tick: Tick, record: &str) -> Result<DecodeReport, ApplyError> {
        let decoded = decode_with_report(record)?;

        if decoded.report.fell_back(Field::PlayerIndex) {
            tracing::warn!(tick, "record has a corrupt player index, not applying");
            return Err(ApplyError::UnknownPlayer);
        }

        let player_index = decoded.state.player_index;
        let slot = &mut self.entries[usize::from(player_index)];
        if let Some(entry) = *slot
            && tick <= entry.tick
        {
            tracing::debug!(player_index, tick, last_applied = entry.tick, "stale record");
            return Err(ApplyError::Stale {
                player_index,
                tick,
                last_applied: entry.tick,
            });
        }

        if decoded.report.fallback_count() > 0 {
            tracing::debug!(
                player_index,
                tick,
                fallbacks = decoded.report.fallback_count(),
                "applying record with defaulted fields"
            );
        }

        *slot = Some(Entry {
            tick,
            state: decoded.state,
        });
        Ok(decoded.report)
    }

    pub fn get(&self, player_index: u8) -> Option<&ControllerState> {
        self.entries
            .get(usize::from(player_index))?
            .as_ref()
            .map(|entry| &entry.state)
    }

    /// Tick of the last record applied for `player_index`.
    pub fn last_tick(&self, player_index: u8) -> Option<Tick> {
        self.entries
            .get(usize::from(player_index))
            .copied()?
            .map(|entry| entry.tick)
    }

    pub fn clear(&mut self) {
        self.entries = [None; MAX_PLAYERS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::state::Button;

    #[test]
    fn applies_and_replaces() {
        let mut table = PlayerInputTable::new();
        let first = ControllerState::new(2).with_button(Button::A);
        let second = ControllerState::new(2).with_button(Button::B);

        table.apply(0, &encode(2, &first)).unwrap();
        assert_eq!(table.get(2), Some(&first));

        table.apply(1, &encode(2, &second)).unwrap();
        assert_eq!(table.get(2), Some(&second));
        assert!(!table.get(2).unwrap().pressed(Button::A));
        assert_eq!(table.last_tick(2), Some(1));
    }

    #[test]
    fn stale_and_duplicate_ticks_are_refused() {
        let mut table = PlayerInputTable::new();
        let newer = ControllerState::new(0).with_button(Button::Start);
        table.apply(5, &encode(0, &newer)).unwrap();

        let older = ControllerState::new(0);
        for tick in [4, 5] {
            let err = table.apply(tick, &encode(0, &older)).unwrap_err();
            assert_eq!(
                err,
                ApplyError::Stale {
                    player_index: 0,
                    tick,
                    last_applied: 5
                }
            );
        }
        assert_eq!(table.get(0), Some(&newer));
    }

    #[test]
    fn short_record_leaves_prior_state() {
        let mut table = PlayerInputTable::new();
        let state = ControllerState::new(1).with_button(Button::Y);
        let record = encode(1, &state);
        table.apply(0, &record).unwrap();

        let err = table.apply(1, &record[..10]).unwrap_err();
        assert!(matches!(err, ApplyError::Decode(DecodeError::TooShort { .. })));
        assert_eq!(table.get(1), Some(&state));
        assert_eq!(table.last_tick(1), Some(0));
    }

    #[test]
    fn corrupt_index_does_not_overwrite_player_zero() {
        let mut table = PlayerInputTable::new();
        let state = ControllerState::new(0).with_button(Button::X);
        table.apply(0, &encode(0, &state)).unwrap();

        let other = encode(3, &ControllerState::new(3));
        let corrupted = format!("9{}", &other[1..]);
        assert_eq!(table.apply(1, &corrupted), Err(ApplyError::UnknownPlayer));
        assert_eq!(table.get(0), Some(&state));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn players_are_independent() {
        let mut table = PlayerInputTable::new();
        for index in 0..MAX_PLAYERS as u8 {
            table.apply(7, &encode(index, &ControllerState::new(index))).unwrap();
        }
        for index in 0..MAX_PLAYERS as u8 {
            assert_eq!(table.get(index).map(|s| s.player_index), Some(index));
        }
        assert_eq!(table.get(4), None);

        table.clear();
        assert_eq!(table.get(0), None);
    }
}
