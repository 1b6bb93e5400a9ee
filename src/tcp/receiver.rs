//! Consumes `TCPSenderMessage`s and reports `TCPReceiverMessage` acks/windows.

use crate::byte_stream::ByteStream;
use crate::reassembler::Reassembler;
use crate::tcp::message::{TCPReceiverMessage, TCPSenderMessage};
use crate::wrap32::Wrap32;

#[derive(Debug, Default)]
pub struct TCPReceiver {
    zero_point: Option<Wrap32>,
    checkpoint: u64,
}

impl TCPReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one inbound segment into `reassembler`, which writes into `inbound`.
    pub fn receive(
        &mut self,
        msg: &TCPSenderMessage,
        reassembler: &mut Reassembler,
        inbound: &mut ByteStream,
    ) {
        if msg.syn && self.zero_point.is_none() {
            self.zero_point = Some(msg.seqno);
        }

        let Some(zero_point) = self.zero_point else {
            return;
        };

        let stream_index = msg.seqno.unwrap(zero_point, self.checkpoint);
        let abs = if msg.syn {
            stream_index
        } else {
            stream_index.wrapping_sub(1)
        };

        reassembler.insert(abs, &msg.payload, msg.fin, inbound);
        self.checkpoint = inbound.bytes_pushed();
    }

    pub fn send(&self, inbound: &ByteStream) -> TCPReceiverMessage {
        let window_size = inbound.available_capacity().min(u16::MAX as usize) as u16;
        let ackno = self.zero_point.map(|zero_point| {
            let closed = if inbound.is_closed() { 1 } else { 0 };
            Wrap32::wrap(1 + inbound.bytes_pushed() + closed, zero_point)
        });
        TCPReceiverMessage { ackno, window_size }
    }
}
