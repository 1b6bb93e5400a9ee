//! Network layer: addressing, the per-link ARP/Ethernet interface, and the
//! longest-prefix-match router that connects interfaces together.

pub mod address;
pub mod interface;
pub mod router;

pub use address::Address;
pub use interface::NetworkInterface;
pub use router::Router;
