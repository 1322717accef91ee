//! Two peers and the relay over loopback UDP, driven step by step.

use std::net::UdpSocket;
use std::time::Duration;

use protocol::{
    Button, ClientMessage, ControllerState, PlayerInputTable, RelayMessage, Stick, deserialize,
    encode, serialize,
};
use relay::RelayState;

fn bind() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    socket
}

/// Receives one datagram on the relay socket and sends the replies.
fn pump(relay_socket: &UdpSocket, relay: &mut RelayState) {
    let mut buf = [0u8; 1024];
    let (len, src) = relay_socket.recv_from(&mut buf).unwrap();
    let msg: ClientMessage = deserialize(&buf[..len]).unwrap();
    for (addr, reply) in relay.handle(src, msg) {
        relay_socket.send_to(&serialize(&reply), addr).unwrap();
    }
}

fn recv(peer: &UdpSocket) -> RelayMessage {
    let mut buf = [0u8; 1024];
    let len = peer.recv(&mut buf).unwrap();
    deserialize(&buf[..len]).unwrap()
}

#[test]
fn peers_converge_on_the_same_input_table() {
    let relay_socket = bind();
    let relay_addr = relay_socket.local_addr().unwrap();
    let mut relay = RelayState::new(2);
    let peers = [bind(), bind()];

    for (slot, peer) in peers.iter().enumerate() {
        peer.send_to(&serialize(&ClientMessage::Hello), relay_addr).unwrap();
        pump(&relay_socket, &mut relay);
        assert_eq!(recv(peer), RelayMessage::Welcome { player_slot: slot as u8 });
    }
    for peer in &peers {
        assert_eq!(recv(peer), RelayMessage::GameStart { player_count: 2 });
    }

    let local = [
        ControllerState {
            left_stick: Stick::new(-0.5, 0.25),
            left_trigger_pressed: true,
            ..ControllerState::new(0).with_button(Button::A)
        },
        ControllerState {
            right_stick: Stick::new(1.0, -1.0),
            dpad_up: true,
            ..ControllerState::new(1).with_button(Button::Start)
        },
    ];

    for (slot, peer) in peers.iter().enumerate() {
        let msg = ClientMessage::Input {
            tick: 0,
            record: encode(slot as u8, &local[slot]),
        };
        peer.send_to(&serialize(&msg), relay_addr).unwrap();
        pump(&relay_socket, &mut relay);
    }

    let mut tables = [PlayerInputTable::new(), PlayerInputTable::new()];
    for (peer, table) in peers.iter().zip(&mut tables) {
        let RelayMessage::TickInputs { tick, records } = recv(peer) else {
            panic!("expected tick inputs");
        };
        for record in &records {
            assert!(table.apply(tick, record).unwrap().is_clean());
        }
    }

    for (slot, state) in local.iter().enumerate() {
        let slot = slot as u8;
        assert_eq!(tables[0].get(slot), Some(state));
        assert_eq!(tables[1].get(slot), Some(state));
    }
    assert_eq!(relay.current_tick(), 1);
}
