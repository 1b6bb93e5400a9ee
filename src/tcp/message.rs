//! The abstract records exchanged between a `TCPSender` and a peer `TCPReceiver`.
//!
//! These are not raw TCP headers: constructing the actual wire-format TCP
//! segment (and wrapping it in an IP datagram) happens outside this crate.

use crate::wrap32::Wrap32;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TCPSenderMessage {
    pub seqno: Wrap32,
    pub syn: bool,
    pub payload: Vec<u8>,
    pub fin: bool,
}

impl TCPSenderMessage {
    pub fn sequence_length(&self) -> u64 {
        self.syn as u64 + self.payload.len() as u64 + self.fin as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TCPReceiverMessage {
    pub ackno: Option<Wrap32>,
    pub window_size: u16,
}
