//! TCP connection-state machinery: segmentation/retransmission (sender) and
//! reassembly/acknowledgment (receiver), plus the shared message types and
//! tunable configuration they use.

pub mod config;
pub mod message;
pub mod receiver;
pub mod sender;

pub use config::TcpConfig;
pub use message::{TCPReceiverMessage, TCPSenderMessage};
pub use receiver::TCPReceiver;
pub use sender::TCPSender;
