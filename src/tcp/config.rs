//! Tunable constants for the TCP sender/receiver pair.
//!
//! The teacher crate scattered these as free `const`s at the top of
//! `connection.rs` (`MTU`, `TTL`, `WINDOW_SIZE`). Collecting them into a
//! value type makes it possible to run several senders with different
//! timeouts in the same process (e.g. in tests).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpConfig {
    pub max_payload_size: usize,
    pub initial_rto_ms: u64,
}

impl TcpConfig {
    pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 1000;
    pub const DEFAULT_INITIAL_RTO_MS: u64 = 1000;
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            max_payload_size: Self::DEFAULT_MAX_PAYLOAD_SIZE,
            initial_rto_ms: Self::DEFAULT_INITIAL_RTO_MS,
        }
    }
}
