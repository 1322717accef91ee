//! Fixed-width text records for exchanging controller input between
//! lockstep peers.
//!
//! Every peer encodes its own controller once per tick, sends the record,
//! and decodes every record it receives into a [`PlayerInputTable`]. Only
//! input crosses the wire, so encoder and decoder must agree exactly on the
//! layout in [`layout`].

pub mod axis;
pub mod decode;
pub mod encode;
pub mod layout;
pub mod message;
pub mod snapshot;
pub mod state;
pub mod table;

pub use decode::{DecodeError, DecodeReport, Decoded, Parsed, decode, decode_with_report};
pub use encode::encode;
pub use layout::{Field, RECORD_LEN};
pub use message::{ClientMessage, PlayerSlot, RelayMessage, Tick, deserialize, serialize};
pub use snapshot::ControllerSnapshot;
pub use state::{Button, ControllerState, MAX_PLAYERS, Stick};
pub use table::{ApplyError, PlayerInputTable};
