//! Envelope messages exchanged between peers and the relay.
//!
//! Records travel as text inside a postcard-serialized envelope that adds the
//! tick they belong to. Postcard needs no framing since UDP is
//! message-oriented.

use serde::{Deserialize, Serialize};

pub type Tick = u32;
pub type PlayerSlot = u8;

// ---- Peer -> Relay ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    Hello,
    Input { tick: Tick, record: String },
}

// ---- Relay -> Peer ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayMessage {
    Welcome { player_slot: PlayerSlot },
    GameStart { player_count: u8 },
    /// One record per slot, indexed by player slot.
    TickInputs { tick: Tick, records: Vec<String> },
}

// ---- Serialization helpers --------------------------------------------------

pub fn serialize<T: Serialize>(value: &T) -> Vec<u8> {
    // Serializing into a growable Vec only fails on a broken Serialize impl.
    postcard::to_allocvec(value).unwrap_or_default()
}

pub fn deserialize<T: for<'a> Deserialize<'a>>(bytes: &[u8]) -> Option<T> {
    postcard::from_bytes(bytes).ok()
}
