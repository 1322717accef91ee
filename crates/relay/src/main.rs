//! UDP relay server for deterministic lockstep multiplayer.
//!
//! Collects one controller record per connected peer for each tick, then
//! broadcasts the combined records to every peer.
//!
//! Usage: `cargo run -p relay [config.toml]`
//! Without a config file the relay binds `0.0.0.0:7700` and waits for four
//! players.

use std::net::UdpSocket;
use std::path::{Path, PathBuf};

use protocol::{ClientMessage, deserialize, serialize};
use relay::{RelayConfig, RelayState};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

const RECV_BUF_SIZE: usize = 1024;

fn main() {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => RelayConfig::load(&path)
            .unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display())),
        None => RelayConfig::default(),
    };

    let level = config.level_filter().unwrap_or(LevelFilter::INFO);
    let _log_guard = init_logging(level, config.log_dir.as_deref());

    let socket = UdpSocket::bind(&config.bind_address)
        .unwrap_or_else(|e| panic!("failed to bind to {}: {e}", config.bind_address));

    tracing::info!(
        bind = %config.bind_address,
        max_players = config.max_players,
        "relay listening"
    );

    let mut state = RelayState::new(usize::from(config.max_players));
    let mut buf = [0u8; RECV_BUF_SIZE];

    loop {
        let (len, src) = match socket.recv_from(&mut buf) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(%e, "recv error");
                continue;
            }
        };

        let Some(msg) = deserialize::<ClientMessage>(&buf[..len]) else {
            tracing::warn!(%src, "bad message");
            continue;
        };

        for (addr, reply) in state.handle(src, msg) {
            if let Err(e) = socket.send_to(&serialize(&reply), addr) {
                tracing::warn!(%addr, %e, "send failed");
            }
        }
    }
}

/// Logs to stdout, and to a daily rolling file when `log_dir` is set. The
/// returned guard flushes the file writer on drop.
fn init_logging(level: LevelFilter, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stdout = tracing_subscriber::fmt::layer().with_filter(level);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry().with(stdout).init();
        return None;
    };

    let appender = tracing_appender::rolling::daily(dir, "relay.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(level);
    tracing_subscriber::registry().with(stdout).with(file).init();
    Some(guard)
}
