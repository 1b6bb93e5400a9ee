//! Minimal Ethernet II framing. Treated as an external, byte-exact codec: the
//! interesting protocol logic lives in `NetworkInterface`, not here.

use crate::error::WireError;

pub type EthernetAddress = [u8; 6];

pub const BROADCAST: EthernetAddress = [0xff; 6];
pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;

const HEADER_LEN: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    pub dst: EthernetAddress,
    pub src: EthernetAddress,
    pub ethertype: u16,
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.payload.len());
        out.extend_from_slice(&self.dst);
        out.extend_from_slice(&self.src);
        out.extend_from_slice(&self.ethertype.to_be_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() < HEADER_LEN {
            return Err(WireError::TooShort {
                got: bytes.len(),
                need: HEADER_LEN,
            });
        }
        let mut dst = [0u8; 6];
        let mut src = [0u8; 6];
        dst.copy_from_slice(&bytes[0..6]);
        src.copy_from_slice(&bytes[6..12]);
        let ethertype = u16::from_be_bytes([bytes[12], bytes[13]]);
        Ok(Self {
            dst,
            src,
            ethertype,
            payload: bytes[HEADER_LEN..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let frame = EthernetFrame {
            dst: BROADCAST,
            src: [1, 2, 3, 4, 5, 6],
            ethertype: ETHERTYPE_ARP,
            payload: vec![0xde, 0xad, 0xbe, 0xef],
        };
        let bytes = frame.serialize();
        assert_eq!(EthernetFrame::parse(&bytes).unwrap(), frame);
    }

    #[test]
    fn rejects_short_frames() {
        assert!(matches!(
            EthernetFrame::parse(&[0u8; 4]),
            Err(WireError::TooShort { .. })
        ));
    }
}
