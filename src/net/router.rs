//! Longest-prefix-match router over a set of owned [`NetworkInterface`]s.
//!
//! Routes are plain value records rather than objects holding a
//! back-reference to the router (the original's `MatchRouter` pattern):
//! lookup and forwarding both happen inside [`Router::route`].

use tracing::debug;

use crate::net::address::Address;
use crate::net::interface::NetworkInterface;
use crate::wire::ipv4::Ipv4Datagram;

#[derive(Debug, Clone, Copy)]
struct Route {
    prefix: u32,
    prefix_len: u8,
    next_hop: Option<Address>,
    interface_index: usize,
}

impl Route {
    fn matches(&self, dst: u32) -> bool {
        if self.prefix_len == 0 {
            return true;
        }
        let mask = u32::MAX << (32 - self.prefix_len as u32);
        (dst & mask) == (self.prefix & mask)
    }
}

pub struct Router {
    interfaces: Vec<NetworkInterface>,
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            interfaces: Vec::new(),
            routes: Vec::new(),
        }
    }

    pub fn add_interface(&mut self, interface: NetworkInterface) -> usize {
        self.interfaces.push(interface);
        self.interfaces.len() - 1
    }

    pub fn interface(&mut self, index: usize) -> &mut NetworkInterface {
        &mut self.interfaces[index]
    }

    pub fn add_route(
        &mut self,
        prefix: u32,
        prefix_len: u8,
        next_hop: Option<Address>,
        interface_index: usize,
    ) {
        debug!(
            prefix = format!("{:#010x}", prefix),
            prefix_len,
            interface_index,
            "adding route"
        );
        self.routes.push(Route {
            prefix,
            prefix_len,
            next_hop,
            interface_index,
        });
        // Stable sort preserves insertion order among equal prefix lengths.
        self.routes.sort_by(|a, b| b.prefix_len.cmp(&a.prefix_len));
    }

    /// Drains every interface's received datagrams and forwards each by
    /// longest-prefix match, decrementing TTL and recomputing the header
    /// checksum. Datagrams with no matching route or with `ttl <= 1` are
    /// silently dropped.
    pub fn route(&mut self) {
        for iface_index in 0..self.interfaces.len() {
            loop {
                let Some(mut dgram) = self.interfaces[iface_index].maybe_receive() else {
                    break;
                };

                let dst = dgram.destination();
                let dst_numeric = u32::from(dst);
                let Some(route) = self
                    .routes
                    .iter()
                    .copied()
                    .find(|r| r.matches(dst_numeric))
                else {
                    debug!(%dst, "no matching route, dropping datagram");
                    continue;
                };

                if dgram.ttl() <= 1 {
                    debug!(%dst, "ttl expired, dropping datagram");
                    continue;
                }
                dgram.decrement_ttl();

                let next_hop = route.next_hop.unwrap_or_else(|| Address::from_ipv4_numeric(dst_numeric));
                self.interfaces[route.interface_index].send_datagram(dgram, next_hop);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etherparse::{IpNumber, Ipv4Header};
    use std::net::Ipv4Addr;

    fn datagram_to(dst: [u8; 4], ttl: u8) -> Ipv4Datagram {
        let header = Ipv4Header::new(0, ttl, IpNumber::TCP, [10, 0, 0, 9], dst).unwrap();
        Ipv4Datagram {
            header,
            payload: vec![],
        }
    }

    fn inject(router: &mut Router, iface_index: usize, dgram: Ipv4Datagram) {
        use crate::wire::ethernet::{EthernetFrame, ETHERTYPE_IPV4};
        let mac = router.interface(iface_index).ethernet_address();
        router.interface(iface_index).recv_frame(EthernetFrame {
            dst: mac,
            src: [0xaa; 6],
            ethertype: ETHERTYPE_IPV4,
            payload: dgram.serialize(),
        });
    }

    #[test]
    fn longest_prefix_match_wins_and_decrements_ttl() {
        let mut router = Router::new();
        let iface0 = router.add_interface(NetworkInterface::new(
            [1; 6],
            Address::new(Ipv4Addr::new(10, 0, 0, 1)),
        ));
        let iface1 = router.add_interface(NetworkInterface::new(
            [2; 6],
            Address::new(Ipv4Addr::new(192, 168, 0, 1)),
        ));

        router.add_route(0, 0, Some(Address::new(Ipv4Addr::new(10, 0, 0, 1))), iface0);
        router.add_route(
            u32::from(Ipv4Addr::new(192, 168, 0, 0)),
            16,
            None,
            iface1,
        );

        inject(&mut router, iface0, datagram_to([192, 168, 5, 5], 64));
        router.route();

        let forwarded = router.interfaces[iface1].maybe_send().expect("forwarded via iface1");
        let dgram = Ipv4Datagram::parse(&forwarded.payload).unwrap();
        assert_eq!(dgram.ttl(), 63);
        assert_eq!(dgram.destination(), Ipv4Addr::new(192, 168, 5, 5));
    }

    #[test]
    fn ttl_one_is_dropped() {
        let mut router = Router::new();
        let iface0 = router.add_interface(NetworkInterface::new(
            [1; 6],
            Address::new(Ipv4Addr::new(10, 0, 0, 1)),
        ));
        router.add_route(0, 0, Some(Address::new(Ipv4Addr::new(10, 0, 0, 1))), iface0);

        inject(&mut router, iface0, datagram_to([8, 8, 8, 8], 1));
        router.route();

        assert!(router.interfaces[iface0].maybe_send().is_none());
    }
}
