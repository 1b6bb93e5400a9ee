//! Segments outbound bytes into `TCPSenderMessage`s, tracks the outstanding
//! (unacked) queue, and retransmits on a single shared timer with exponential
//! backoff and zero-window probing.

use std::collections::VecDeque;

use crate::byte_stream::ByteStream;
use crate::tcp::config::TcpConfig;
use crate::tcp::message::{TCPReceiverMessage, TCPSenderMessage};
use crate::wrap32::Wrap32;

#[derive(Debug)]
pub struct TCPSender {
    isn: Wrap32,
    config: TcpConfig,

    /// Absolute index of the next byte to assign a sequence number to.
    next_seqno: u64,
    /// Absolute index of the highest cumulative ACK received so far.
    ack_seqno: u64,
    /// How far into `outstanding` has actually been handed out by `maybe_send`.
    send_cursor: u64,

    outstanding: VecDeque<TCPSenderMessage>,

    /// Remaining send credit: peer's advertised window minus bytes in flight.
    window_remaining: u64,
    /// Set when the peer's last advertised window was 0; gives `push` one
    /// byte of credit to send a probe, then clears once that probe is sent.
    force_one_credit: bool,
    /// Mirrors the peer's last advertised window being exactly 0, used only
    /// to suppress backoff on the probe's retransmission.
    peer_window_is_zero: bool,

    rto_ms: u64,
    timer_remaining: Option<u64>,
    retransmit_pending: bool,
    consecutive_retransmissions: u32,

    fin_sent: bool,
}

impl TCPSender {
    pub fn new(isn: Wrap32, config: TcpConfig) -> Self {
        Self {
            isn,
            rto_ms: config.initial_rto_ms,
            config,
            next_seqno: 0,
            ack_seqno: 0,
            send_cursor: 0,
            outstanding: VecDeque::new(),
            window_remaining: 1,
            force_one_credit: false,
            peer_window_is_zero: false,
            timer_remaining: None,
            retransmit_pending: false,
            consecutive_retransmissions: 0,
            fin_sent: false,
        }
    }

    pub fn sequence_numbers_in_flight(&self) -> u64 {
        self.next_seqno - self.ack_seqno
    }

    pub fn consecutive_retransmissions(&self) -> u32 {
        self.consecutive_retransmissions
    }

    /// Builds and enqueues as many segments as the send window allows.
    pub fn push(&mut self, outbound: &mut ByteStream) {
        if self.force_one_credit && self.window_remaining == 0 {
            self.window_remaining = 1;
        }

        while self.window_remaining > 0 && !self.fin_sent {
            let seqno = Wrap32::wrap(self.next_seqno, self.isn);
            let mut msg = TCPSenderMessage {
                seqno,
                ..Default::default()
            };

            if self.next_seqno == 0 {
                msg.syn = true;
                self.window_remaining -= 1;
            }

            let n = (outbound.bytes_buffered() as u64)
                .min(self.window_remaining)
                .min(self.config.max_payload_size as u64) as usize;
            if n > 0 {
                let (head, tail) = outbound.peek_slices();
                let mut payload = Vec::with_capacity(n);
                let from_head = n.min(head.len());
                payload.extend_from_slice(&head[..from_head]);
                payload.extend_from_slice(&tail[..n - from_head]);
                outbound.pop(n);
                msg.payload = payload;
                self.window_remaining -= n as u64;
            }

            if !self.fin_sent && outbound.is_finished() && self.window_remaining > 0 {
                msg.fin = true;
                self.window_remaining -= 1;
                self.fin_sent = true;
            }

            let seq_len = msg.sequence_length();
            if seq_len == 0 {
                break;
            }

            self.force_one_credit = false;
            self.next_seqno += seq_len;
            self.outstanding.push_back(msg);
            if self.timer_remaining.is_none() {
                self.timer_remaining = Some(self.rto_ms);
            }
        }
    }

    /// Returns the next not-yet-transmitted outstanding segment, or the
    /// oldest outstanding segment if the retransmit timer just fired.
    pub fn maybe_send(&mut self) -> Option<TCPSenderMessage> {
        for msg in self.outstanding.iter() {
            let start = msg.seqno.unwrap(self.isn, self.ack_seqno);
            let end = start + msg.sequence_length();
            if end > self.send_cursor {
                self.send_cursor = end;
                if self.timer_remaining.is_none() {
                    self.timer_remaining = Some(self.rto_ms);
                }
                return Some(msg.clone());
            }
        }

        if self.retransmit_pending {
            self.retransmit_pending = false;
            return self.outstanding.front().cloned();
        }

        None
    }

    pub fn send_empty_message(&self) -> TCPSenderMessage {
        TCPSenderMessage {
            seqno: Wrap32::wrap(self.next_seqno, self.isn),
            ..Default::default()
        }
    }

    pub fn receive(&mut self, msg: &TCPReceiverMessage) {
        if let Some(ackno) = msg.ackno {
            let ack = ackno.unwrap(self.isn, self.ack_seqno);
            if ack > self.ack_seqno && ack <= self.next_seqno {
                self.ack_seqno = ack;
                while let Some(front) = self.outstanding.front() {
                    let start = front.seqno.unwrap(self.isn, self.ack_seqno);
                    if start + front.sequence_length() <= self.ack_seqno {
                        self.outstanding.pop_front();
                    } else {
                        break;
                    }
                }
                self.consecutive_retransmissions = 0;
                self.rto_ms = self.config.initial_rto_ms;
                self.timer_remaining = if self.outstanding.is_empty() {
                    None
                } else {
                    Some(self.rto_ms)
                };
            }
        }

        let in_flight = self.sequence_numbers_in_flight();
        self.window_remaining = (msg.window_size as u64).saturating_sub(in_flight);
        self.peer_window_is_zero = msg.window_size == 0;
        if self.peer_window_is_zero {
            self.force_one_credit = true;
        }
    }

    pub fn tick(&mut self, ms_since_last_tick: u64) {
        let Some(remaining) = self.timer_remaining else {
            return;
        };

        if ms_since_last_tick < remaining {
            self.timer_remaining = Some(remaining - ms_since_last_tick);
            return;
        }

        self.timer_remaining = None;
        if self.sequence_numbers_in_flight() == 0 {
            return;
        }

        self.retransmit_pending = true;
        if !self.peer_window_is_zero {
            self.consecutive_retransmissions += 1;
        }
        self.rto_ms = self
            .config
            .initial_rto_ms
            .checked_shl(self.consecutive_retransmissions)
            .unwrap_or(u64::MAX);
        self.timer_remaining = Some(self.rto_ms);
    }
}
