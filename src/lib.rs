//! A user-space TCP/IP stack: bounded byte streams, out-of-order reassembly,
//! wraparound sequence numbers, a TCP sender/receiver pair, and an
//! Ethernet/ARP/IPv4 network layer with longest-prefix-match routing.
//!
//! Nothing in this crate opens a socket or a tun device; it implements the
//! protocol state machines and leaves I/O to the embedder.

pub mod byte_stream;
pub mod error;
pub mod net;
pub mod reassembler;
pub mod tcp;
pub mod wire;
pub mod wrap32;

pub use byte_stream::ByteStream;
pub use error::WireError;
pub use reassembler::Reassembler;
pub use wrap32::Wrap32;
