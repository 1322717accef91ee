//! Lockstep relay state for up to four peers.
//!
//! The relay collects one input record per player slot for the current
//! tick, then broadcasts all of them so every peer advances its simulation
//! with identical input. It only checks that a record is long enough to
//! decode and names the sender's own slot; the rest of the record is passed
//! through untouched.

pub mod config;

use std::net::SocketAddr;

use protocol::{ClientMessage, Field, PlayerSlot, RelayMessage, Tick, decode_with_report};

pub use config::{ConfigError, RelayConfig};

/// A message to send and where to send it.
pub type Outbound = (SocketAddr, RelayMessage);

pub struct RelayState {
    players: Vec<Option<SocketAddr>>,
    game_started: bool,
    current_tick: Tick,
    tick_inputs: Vec<Option<String>>,
}

impl RelayState {
    pub fn new(max_players: usize) -> Self {
        Self {
            players: vec![None; max_players],
            game_started: false,
            current_tick: 0,
            tick_inputs: vec![None; max_players],
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    fn find_player(&self, addr: &SocketAddr) -> Option<usize> {
        self.players.iter().position(|slot| slot.as_ref() == Some(addr))
    }

    fn next_empty_slot(&self) -> Option<usize> {
        self.players.iter().position(|slot| slot.is_none())
    }

    fn all_slots_filled(&self) -> bool {
        self.players.iter().all(|slot| slot.is_some())
    }

    fn all_inputs_received(&self) -> bool {
        self.tick_inputs.iter().all(|input| input.is_some())
    }

    fn broadcast(&self, msg: &RelayMessage) -> Vec<Outbound> {
        self.players
            .iter()
            .flatten()
            .map(|addr| (*addr, msg.clone()))
            .collect()
    }

    /// Applies one message from `src` and returns what should be sent in
    /// response.
    pub fn handle(&mut self, src: SocketAddr, msg: ClientMessage) -> Vec<Outbound> {
        match msg {
            ClientMessage::Hello => self.handle_hello(src),
            ClientMessage::Input { tick, record } => self.handle_input(src, tick, record),
        }
    }

    fn handle_hello(&mut self, src: SocketAddr) -> Vec<Outbound> {
        // Already connected? Re-send welcome.
        if let Some(slot) = self.find_player(&src) {
            let mut out = vec![(
                src,
                RelayMessage::Welcome {
                    player_slot: slot as PlayerSlot,
                },
            )];
            if self.game_started {
                out.push((src, self.game_start()));
            }
            return out;
        }

        let Some(slot) = self.next_empty_slot() else {
            tracing::warn!(%src, "rejected, game is full");
            return Vec::new();
        };

        self.players[slot] = Some(src);
        tracing::info!(slot, %src, "player connected");

        let mut out = vec![(
            src,
            RelayMessage::Welcome {
                player_slot: slot as PlayerSlot,
            },
        )];

        if self.all_slots_filled() && !self.game_started {
            self.game_started = true;
            tracing::info!(players = self.players.len(), "all players connected, starting game");
            out.extend(self.broadcast(&self.game_start()));
        }
        out
    }

    fn handle_input(&mut self, src: SocketAddr, tick: Tick, record: String) -> Vec<Outbound> {
        let Some(slot) = self.find_player(&src) else {
            tracing::warn!(%src, "input from unknown client");
            return Vec::new();
        };

        if tick != self.current_tick {
            // Stale or future.
            tracing::trace!(slot, tick, current = self.current_tick, "ignoring input");
            return Vec::new();
        }

        let decoded = match decode_with_report(&record) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(slot, tick, %err, "dropping input");
                return Vec::new();
            }
        };
        let index = decoded.state.player_index;
        if decoded.report.fell_back(Field::PlayerIndex) || usize::from(index) != slot {
            tracing::warn!(slot, tick, index, "record names another player, dropping");
            return Vec::new();
        }

        self.tick_inputs[slot] = Some(record);

        if !self.all_inputs_received() {
            return Vec::new();
        }

        let records: Vec<String> = self.tick_inputs.iter_mut().filter_map(Option::take).collect();
        let msg = RelayMessage::TickInputs {
            tick: self.current_tick,
            records,
        };
        let out = self.broadcast(&msg);

        // Advance to next tick.
        self.current_tick += 1;
        tracing::debug!(tick = self.current_tick, "advanced");
        out
    }

    fn game_start(&self) -> RelayMessage {
        RelayMessage::GameStart {
            player_count: self.players.len() as u8,
        }
    }
}
