//! IPv4 datagram parsing/serialization and TTL/checksum bookkeeping, built on
//! `etherparse` (already part of the teacher crate's dependency graph)
//! instead of hand-rolled header math.

use std::net::Ipv4Addr;

use etherparse::{Ipv4Header, Ipv4HeaderSlice};

use crate::error::WireError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Datagram {
    pub header: Ipv4Header,
    pub payload: Vec<u8>,
}

impl Ipv4Datagram {
    pub fn parse(bytes: &[u8]) -> Result<Self, WireError> {
        let slice =
            Ipv4HeaderSlice::from_slice(bytes).map_err(|e| WireError::MalformedIpv4(e.to_string()))?;
        let header_len = slice.slice().len();
        let header = slice.to_header();
        Ok(Self {
            header,
            payload: bytes[header_len..].to_vec(),
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.header_len() + self.payload.len());
        self.header
            .write(&mut out)
            .expect("writing to a Vec<u8> cannot fail");
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn source(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.header.source)
    }

    pub fn destination(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.header.destination)
    }

    pub fn ttl(&self) -> u8 {
        self.header.time_to_live
    }

    /// Decrements TTL by one and recomputes the header checksum. Caller must
    /// ensure `ttl() > 1` first (a router drops datagrams with ttl <= 1
    /// rather than forwarding them with an underflowed TTL).
    pub fn decrement_ttl(&mut self) {
        self.header.time_to_live -= 1;
        self.header.header_checksum = self
            .header
            .calc_header_checksum()
            .expect("header was already valid, recomputing checksum cannot fail");
    }
}
