//! Minimal ARP (RFC 826) message codec for Ethernet/IPv4, the one fixed
//! 28-byte layout this stack needs. Treated as an external serializer, like
//! the Ethernet framing in [`crate::wire::ethernet`].

use crate::error::WireError;
use crate::wire::ethernet::EthernetAddress;

const HTYPE_ETHERNET: u16 = 1;
const PTYPE_IPV4: u16 = 0x0800;
const HLEN: u8 = 6;
const PLEN: u8 = 4;
const MESSAGE_LEN: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOpcode {
    Request,
    Reply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpMessage {
    pub opcode: ArpOpcode,
    pub sender_mac: EthernetAddress,
    pub sender_ip: u32,
    pub target_mac: EthernetAddress,
    pub target_ip: u32,
}

impl ArpMessage {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MESSAGE_LEN);
        out.extend_from_slice(&HTYPE_ETHERNET.to_be_bytes());
        out.extend_from_slice(&PTYPE_IPV4.to_be_bytes());
        out.push(HLEN);
        out.push(PLEN);
        let opcode: u16 = match self.opcode {
            ArpOpcode::Request => 1,
            ArpOpcode::Reply => 2,
        };
        out.extend_from_slice(&opcode.to_be_bytes());
        out.extend_from_slice(&self.sender_mac);
        out.extend_from_slice(&self.sender_ip.to_be_bytes());
        out.extend_from_slice(&self.target_mac);
        out.extend_from_slice(&self.target_ip.to_be_bytes());
        out
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() < MESSAGE_LEN {
            return Err(WireError::TooShort {
                got: bytes.len(),
                need: MESSAGE_LEN,
            });
        }
        let htype = u16::from_be_bytes([bytes[0], bytes[1]]);
        if htype != HTYPE_ETHERNET {
            return Err(WireError::UnsupportedHardwareType(htype));
        }
        let ptype = u16::from_be_bytes([bytes[2], bytes[3]]);
        if ptype != PTYPE_IPV4 {
            return Err(WireError::UnsupportedProtocolType(ptype));
        }
        let opcode_raw = u16::from_be_bytes([bytes[6], bytes[7]]);
        let opcode = match opcode_raw {
            1 => ArpOpcode::Request,
            2 => ArpOpcode::Reply,
            other => return Err(WireError::UnsupportedArpOpcode(other)),
        };

        let mut sender_mac = [0u8; 6];
        sender_mac.copy_from_slice(&bytes[8..14]);
        let sender_ip = u32::from_be_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]);

        let mut target_mac = [0u8; 6];
        target_mac.copy_from_slice(&bytes[18..24]);
        let target_ip = u32::from_be_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);

        Ok(Self {
            opcode,
            sender_mac,
            sender_ip,
            target_mac,
            target_ip,
        })
    }
}
