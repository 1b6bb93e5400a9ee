//! Link-layer and network-layer wire formats: Ethernet framing, ARP, and
//! IPv4. Everything here is a dumb codec; protocol behavior lives in
//! [`crate::net`].

pub mod arp;
pub mod ethernet;
pub mod ipv4;

pub use arp::{ArpMessage, ArpOpcode};
pub use ethernet::{EthernetAddress, EthernetFrame};
pub use ipv4::Ipv4Datagram;
