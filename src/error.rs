//! Typed errors for the wire-format boundary. Everything above this layer
//! (byte stream, reassembler, sender, receiver) has no fallible operations:
//! bad input is silently absorbed per the protocol's own retransmission
//! semantics. Only parsing raw bytes off the network can fail outright.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("frame too short: got {got} bytes, need at least {need}")]
    TooShort { got: usize, need: usize },

    #[error("unsupported ethertype {0:#06x}")]
    UnsupportedEtherType(u16),

    #[error("unsupported ARP hardware type {0}")]
    UnsupportedHardwareType(u16),

    #[error("unsupported ARP protocol type {0:#06x}")]
    UnsupportedProtocolType(u16),

    #[error("unsupported ARP opcode {0}")]
    UnsupportedArpOpcode(u16),

    #[error("malformed IPv4 header: {0}")]
    MalformedIpv4(String),
}
