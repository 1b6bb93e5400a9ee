//! IPv4 address helper: wraps [`std::net::Ipv4Addr`] with the numeric
//! conversion routing and ARP need.

use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub Ipv4Addr);

impl Address {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self(addr)
    }

    pub fn from_ipv4_numeric(raw: u32) -> Self {
        Self(Ipv4Addr::from(raw))
    }

    pub fn ipv4_numeric(&self) -> u32 {
        u32::from(self.0)
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.0
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
