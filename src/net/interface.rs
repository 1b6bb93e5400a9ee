//! Ethernet/ARP network interface: ARP cache with TTL expiry, per-target
//! request throttling, and a deferred-datagram queue for in-flight ARP
//! resolution.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use crate::net::address::Address;
use crate::wire::arp::{ArpMessage, ArpOpcode};
use crate::wire::ethernet::{EthernetAddress, EthernetFrame, BROADCAST, ETHERTYPE_ARP, ETHERTYPE_IPV4};
use crate::wire::ipv4::Ipv4Datagram;

pub const ARP_CACHE_TTL_MS: u64 = 30_000;
pub const ARP_REQUEST_THROTTLE_MS: u64 = 5_000;

struct CacheEntry {
    mac: EthernetAddress,
    ttl_ms: u64,
}

pub struct NetworkInterface {
    ethernet_address: EthernetAddress,
    ip_address: Address,

    arp_cache: HashMap<u32, CacheEntry>,
    request_throttle: HashMap<u32, u64>,
    deferred: HashMap<u32, Vec<Ipv4Datagram>>,
    outbound: VecDeque<EthernetFrame>,

    /// Datagrams handed back by `recv_frame`, buffered here too so a
    /// `Router` can drain them asynchronously via `maybe_receive`.
    inbound: VecDeque<Ipv4Datagram>,
}

impl NetworkInterface {
    pub fn new(ethernet_address: EthernetAddress, ip_address: Address) -> Self {
        debug!(
            mac = ?ethernet_address,
            ip = %ip_address,
            "network interface created"
        );
        Self {
            ethernet_address,
            ip_address,
            arp_cache: HashMap::new(),
            request_throttle: HashMap::new(),
            deferred: HashMap::new(),
            outbound: VecDeque::new(),
            inbound: VecDeque::new(),
        }
    }

    pub fn ethernet_address(&self) -> EthernetAddress {
        self.ethernet_address
    }

    pub fn ip_address(&self) -> Address {
        self.ip_address
    }

    pub fn send_datagram(&mut self, dgram: Ipv4Datagram, next_hop: Address) {
        let next_hop_numeric = next_hop.ipv4_numeric();

        if let Some(entry) = self.arp_cache.get(&next_hop_numeric) {
            let frame = EthernetFrame {
                dst: entry.mac,
                src: self.ethernet_address,
                ethertype: ETHERTYPE_IPV4,
                payload: dgram.serialize(),
            };
            self.outbound.push_back(frame);
            return;
        }

        self.deferred.entry(next_hop_numeric).or_default().push(dgram);

        if self.request_throttle.contains_key(&next_hop_numeric) {
            return;
        }

        let arp = ArpMessage {
            opcode: ArpOpcode::Request,
            sender_mac: self.ethernet_address,
            sender_ip: self.ip_address.ipv4_numeric(),
            target_mac: [0; 6],
            target_ip: next_hop_numeric,
        };
        self.outbound.push_back(EthernetFrame {
            dst: BROADCAST,
            src: self.ethernet_address,
            ethertype: ETHERTYPE_ARP,
            payload: arp.serialize(),
        });
        self.request_throttle
            .insert(next_hop_numeric, ARP_REQUEST_THROTTLE_MS);
    }

    pub fn recv_frame(&mut self, frame: EthernetFrame) -> Option<Ipv4Datagram> {
        if frame.dst != self.ethernet_address && frame.dst != BROADCAST {
            return None;
        }

        match frame.ethertype {
            ETHERTYPE_IPV4 => match Ipv4Datagram::parse(&frame.payload) {
                Ok(dgram) => {
                    self.inbound.push_back(dgram.clone());
                    Some(dgram)
                }
                Err(err) => {
                    trace!(%err, "dropping unparseable IPv4 datagram");
                    None
                }
            },
            ETHERTYPE_ARP => {
                let arp = match ArpMessage::parse(&frame.payload) {
                    Ok(arp) => arp,
                    Err(err) => {
                        trace!(%err, "dropping unparseable ARP message");
                        return None;
                    }
                };

                self.arp_cache.insert(
                    arp.sender_ip,
                    CacheEntry {
                        mac: arp.sender_mac,
                        ttl_ms: ARP_CACHE_TTL_MS,
                    },
                );

                if arp.opcode == ArpOpcode::Request && arp.target_ip == self.ip_address.ipv4_numeric() {
                    let reply = ArpMessage {
                        opcode: ArpOpcode::Reply,
                        sender_mac: self.ethernet_address,
                        sender_ip: self.ip_address.ipv4_numeric(),
                        target_mac: arp.sender_mac,
                        target_ip: arp.sender_ip,
                    };
                    self.outbound.push_back(EthernetFrame {
                        dst: arp.sender_mac,
                        src: self.ethernet_address,
                        ethertype: ETHERTYPE_ARP,
                        payload: reply.serialize(),
                    });
                }

                if let Some(pending) = self.deferred.remove(&arp.sender_ip) {
                    for dgram in pending {
                        self.send_datagram(dgram, Address::from_ipv4_numeric(arp.sender_ip));
                    }
                }

                None
            }
            other => {
                trace!(ethertype = other, "dropping frame of unknown ethertype");
                None
            }
        }
    }

    pub fn tick(&mut self, ms_since_last_tick: u64) {
        self.arp_cache.retain(|_, entry| entry.ttl_ms > ms_since_last_tick);
        for entry in self.arp_cache.values_mut() {
            entry.ttl_ms -= ms_since_last_tick;
        }

        self.request_throttle
            .retain(|_, remaining| *remaining > ms_since_last_tick);
        for remaining in self.request_throttle.values_mut() {
            *remaining -= ms_since_last_tick;
        }
    }

    pub fn maybe_send(&mut self) -> Option<EthernetFrame> {
        self.outbound.pop_front()
    }

    /// Drains a datagram queued by a prior `recv_frame` call. Used by
    /// [`crate::net::router::Router`] to pull incoming traffic off each of
    /// its interfaces without holding on to a borrow across the match.
    pub fn maybe_receive(&mut self) -> Option<Ipv4Datagram> {
        self.inbound.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etherparse::{IpNumber, Ipv4Header};
    use std::net::Ipv4Addr;

    fn iface(mac: EthernetAddress, ip: [u8; 4]) -> NetworkInterface {
        NetworkInterface::new(mac, Address::new(Ipv4Addr::from(ip)))
    }

    fn sample_datagram() -> Ipv4Datagram {
        let header = Ipv4Header::new(0, 64, IpNumber::TCP, [192, 168, 0, 1], [192, 168, 0, 2]).unwrap();
        Ipv4Datagram {
            header,
            payload: vec![],
        }
    }

    #[test]
    fn resolves_unknown_next_hop_via_arp_then_flushes_deferred() {
        let mut a = iface([1; 6], [192, 168, 0, 1]);
        let next_hop = Address::new(Ipv4Addr::new(192, 168, 0, 2));

        a.send_datagram(sample_datagram(), next_hop);
        let arp_request = a.maybe_send().expect("arp request queued");
        assert_eq!(arp_request.ethertype, ETHERTYPE_ARP);
        assert!(a.maybe_send().is_none(), "datagram stays deferred");

        // A second send to the same unresolved next hop must not re-request (throttled).
        a.send_datagram(sample_datagram(), next_hop);
        assert!(a.maybe_send().is_none());

        let reply = ArpMessage {
            opcode: ArpOpcode::Reply,
            sender_mac: [2; 6],
            sender_ip: next_hop.ipv4_numeric(),
            target_mac: [1; 6],
            target_ip: a.ip_address.ipv4_numeric(),
        };
        let frame = EthernetFrame {
            dst: [1; 6],
            src: [2; 6],
            ethertype: ETHERTYPE_ARP,
            payload: reply.serialize(),
        };
        assert!(a.recv_frame(frame).is_none());

        let flushed_one = a.maybe_send().expect("first deferred datagram flushed");
        let flushed_two = a.maybe_send().expect("second deferred datagram flushed");
        assert_eq!(flushed_one.dst, [2; 6]);
        assert_eq!(flushed_two.dst, [2; 6]);
    }

    #[test]
    fn answers_arp_request_for_own_ip() {
        let mut a = iface([1; 6], [10, 0, 0, 1]);
        let request = ArpMessage {
            opcode: ArpOpcode::Request,
            sender_mac: [9; 6],
            sender_ip: 0x0a000009,
            target_mac: [0; 6],
            target_ip: a.ip_address.ipv4_numeric(),
        };
        let frame = EthernetFrame {
            dst: BROADCAST,
            src: [9; 6],
            ethertype: ETHERTYPE_ARP,
            payload: request.serialize(),
        };
        assert!(a.recv_frame(frame).is_none());
        let reply_frame = a.maybe_send().expect("arp reply queued");
        assert_eq!(reply_frame.dst, [9; 6]);
        let reply = ArpMessage::parse(&reply_frame.payload).unwrap();
        assert_eq!(reply.opcode, ArpOpcode::Reply);
    }

    #[test]
    fn arp_cache_entries_expire() {
        let mut a = iface([1; 6], [10, 0, 0, 1]);
        let reply = ArpMessage {
            opcode: ArpOpcode::Reply,
            sender_mac: [2; 6],
            sender_ip: 0x0a000002,
            target_mac: [1; 6],
            target_ip: a.ip_address.ipv4_numeric(),
        };
        a.recv_frame(EthernetFrame {
            dst: [1; 6],
            src: [2; 6],
            ethertype: ETHERTYPE_ARP,
            payload: reply.serialize(),
        });
        assert!(a.arp_cache.contains_key(&0x0a000002));
        a.tick(ARP_CACHE_TTL_MS);
        assert!(!a.arp_cache.contains_key(&0x0a000002));
    }

    #[test]
    fn discards_frames_not_addressed_to_us() {
        let mut a = iface([1; 6], [10, 0, 0, 1]);
        let frame = EthernetFrame {
            dst: [9; 6],
            src: [2; 6],
            ethertype: ETHERTYPE_IPV4,
            payload: sample_datagram().serialize(),
        };
        assert!(a.recv_frame(frame).is_none());
    }

    #[test]
    fn send_datagram_to_already_resolved_hop_emits_no_arp() {
        let mut a = iface([1; 6], [10, 0, 0, 1]);
        let next_hop = Address::new(Ipv4Addr::new(10, 0, 0, 2));

        a.send_datagram(sample_datagram(), next_hop);
        let arp_request = a.maybe_send().expect("one arp request");
        assert_eq!(arp_request.ethertype, ETHERTYPE_ARP);
        assert!(a.maybe_send().is_none());

        let reply = ArpMessage {
            opcode: ArpOpcode::Reply,
            sender_mac: [2; 6],
            sender_ip: next_hop.ipv4_numeric(),
            target_mac: [1; 6],
            target_ip: a.ip_address.ipv4_numeric(),
        };
        a.recv_frame(EthernetFrame {
            dst: [1; 6],
            src: [2; 6],
            ethertype: ETHERTYPE_ARP,
            payload: reply.serialize(),
        });
        let resolved_frame = a.maybe_send().expect("original datagram now flushed");
        assert_eq!(resolved_frame.dst, [2; 6]);
        assert!(a.maybe_send().is_none());

        // A second send within the cache TTL must go straight out, no further ARP.
        a.send_datagram(sample_datagram(), next_hop);
        let second_frame = a.maybe_send().expect("second datagram sent directly");
        assert_eq!(second_frame.ethertype, ETHERTYPE_IPV4);
        assert!(a.maybe_send().is_none());
    }
}
