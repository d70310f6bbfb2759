//! ARP packet structure, parsing and forgery helpers

use crate::ethernet::EthernetFrame;
use arpoison_core::{Error, MacAddr, Result};
use bytes::{BufMut, BytesMut};
use std::net::Ipv4Addr;

/// ARP EtherType
pub const ETHERTYPE_ARP: u16 = 0x0806;

/// Hardware type: Ethernet
const HTYPE_ETHERNET: u16 = 1;

/// Protocol type: IPv4
const PTYPE_IPV4: u16 = 0x0800;

/// ARP payload length (fixed for Ethernet/IPv4)
pub const ARP_LEN: usize = 28;

/// ARP operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOpcode {
    /// who-has
    Request = 1,
    /// is-at
    Reply = 2,
}

impl ArpOpcode {
    pub fn from_u16(val: u16) -> Option<Self> {
        match val {
            1 => Some(Self::Request),
            2 => Some(Self::Reply),
            _ => None,
        }
    }
}

/// ARP packet for Ethernet/IPv4
#[derive(Debug, Clone)]
pub struct ArpPacket {
    pub operation: ArpOpcode,
    pub sender_hw_addr: MacAddr,
    pub sender_proto_addr: Ipv4Addr,
    pub target_hw_addr: MacAddr,
    pub target_proto_addr: Ipv4Addr,
}

impl ArpPacket {
    /// Build a who-has request broadcast for `target_ip`
    pub fn who_has(sender_mac: MacAddr, sender_ip: Ipv4Addr, target_ip: Ipv4Addr) -> Self {
        Self {
            operation: ArpOpcode::Request,
            sender_hw_addr: sender_mac,
            sender_proto_addr: sender_ip,
            target_hw_addr: MacAddr::zero(),
            target_proto_addr: target_ip,
        }
    }

    /// Build an is-at reply claiming `sender_ip` lives at `sender_mac`
    pub fn is_at(
        sender_mac: MacAddr,
        sender_ip: Ipv4Addr,
        target_mac: MacAddr,
        target_ip: Ipv4Addr,
    ) -> Self {
        Self {
            operation: ArpOpcode::Reply,
            sender_hw_addr: sender_mac,
            sender_proto_addr: sender_ip,
            target_hw_addr: target_mac,
            target_proto_addr: target_ip,
        }
    }

    /// Parse an ARP payload (without the Ethernet header)
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < ARP_LEN {
            return Err(Error::parsing("ARP packet too short"));
        }

        let htype = u16::from_be_bytes([data[0], data[1]]);
        let ptype = u16::from_be_bytes([data[2], data[3]]);
        if htype != HTYPE_ETHERNET || ptype != PTYPE_IPV4 {
            return Err(Error::parsing("not an Ethernet/IPv4 ARP packet"));
        }

        let op_val = u16::from_be_bytes([data[6], data[7]]);
        let operation =
            ArpOpcode::from_u16(op_val).ok_or_else(|| Error::parsing("invalid ARP opcode"))?;

        let sender_hw_addr =
            MacAddr::from_slice(&data[8..14]).ok_or_else(|| Error::parsing("truncated SHA"))?;
        let sender_proto_addr = Ipv4Addr::new(data[14], data[15], data[16], data[17]);
        let target_hw_addr =
            MacAddr::from_slice(&data[18..24]).ok_or_else(|| Error::parsing("truncated THA"))?;
        let target_proto_addr = Ipv4Addr::new(data[24], data[25], data[26], data[27]);

        Ok(Self {
            operation,
            sender_hw_addr,
            sender_proto_addr,
            target_hw_addr,
            target_proto_addr,
        })
    }

    /// Parse an ARP packet out of a raw Ethernet frame
    pub fn from_frame(frame: &[u8]) -> Result<Self> {
        let eth = EthernetFrame::parse(frame)?;
        if eth.ethertype != ETHERTYPE_ARP {
            return Err(Error::parsing("not an ARP frame"));
        }
        Self::parse(&eth.payload)
    }

    /// Serialize the ARP payload
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(ARP_LEN);

        buf.put_u16(HTYPE_ETHERNET);
        buf.put_u16(PTYPE_IPV4);
        buf.put_u8(6);
        buf.put_u8(4);
        buf.put_u16(self.operation as u16);
        buf.put_slice(self.sender_hw_addr.as_bytes());
        buf.put_slice(&self.sender_proto_addr.octets());
        buf.put_slice(self.target_hw_addr.as_bytes());
        buf.put_slice(&self.target_proto_addr.octets());

        buf.to_vec()
    }

    /// Wrap the packet in an Ethernet frame ready for transmission
    pub fn to_frame(&self, eth_src: MacAddr, eth_dst: MacAddr) -> Vec<u8> {
        EthernetFrame::new(eth_dst, eth_src, ETHERTYPE_ARP, self.serialize()).to_bytes()
    }

    pub fn is_request(&self) -> bool {
        self.operation == ArpOpcode::Request
    }

    pub fn is_reply(&self) -> bool {
        self.operation == ArpOpcode::Reply
    }

    /// A live who-has probe: the requester does not yet know the answer.
    ///
    /// Requests carrying a non-zero target hardware field are cache
    /// refreshes the watcher leaves alone.
    pub fn is_open_request(&self) -> bool {
        self.is_request() && self.target_hw_addr.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(b: u8) -> MacAddr {
        MacAddr([b; 6])
    }

    #[test]
    fn test_is_at_layout() {
        let packet = ArpPacket::is_at(
            mac(0x11),
            Ipv4Addr::new(192, 168, 1, 1),
            mac(0x22),
            Ipv4Addr::new(192, 168, 1, 50),
        );
        let bytes = packet.serialize();

        assert_eq!(bytes.len(), ARP_LEN);
        // opcode
        assert_eq!(u16::from_be_bytes([bytes[6], bytes[7]]), 2);
        // sender MAC / IP
        assert_eq!(&bytes[8..14], mac(0x11).as_bytes());
        assert_eq!(&bytes[14..18], &[192, 168, 1, 1]);
        // target MAC / IP
        assert_eq!(&bytes[18..24], mac(0x22).as_bytes());
        assert_eq!(&bytes[24..28], &[192, 168, 1, 50]);
    }

    #[test]
    fn test_who_has_target_is_zero() {
        let packet = ArpPacket::who_has(
            mac(0x11),
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        );
        assert!(packet.is_request());
        assert!(packet.is_open_request());
        assert!(packet.target_hw_addr.is_zero());
    }

    #[test]
    fn test_refresh_request_is_not_open() {
        let mut packet = ArpPacket::who_has(
            mac(0x11),
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        );
        packet.target_hw_addr = mac(0x33);
        assert!(packet.is_request());
        assert!(!packet.is_open_request());
    }

    #[test]
    fn test_parse_rejects_non_ethernet_ipv4() {
        let packet = ArpPacket::who_has(
            mac(0x11),
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        );
        let mut bytes = packet.serialize();
        bytes[0] = 0xff; // bogus hardware type
        assert!(ArpPacket::parse(&bytes).is_err());
    }

    #[test]
    fn test_from_frame() {
        let packet = ArpPacket::is_at(
            mac(0xaa),
            Ipv4Addr::new(172, 16, 0, 1),
            mac(0xbb),
            Ipv4Addr::new(172, 16, 0, 2),
        );
        let frame = packet.to_frame(mac(0xaa), mac(0xbb));

        let parsed = ArpPacket::from_frame(&frame).unwrap();
        assert!(parsed.is_reply());
        assert_eq!(parsed.sender_hw_addr, mac(0xaa));
        assert_eq!(parsed.sender_proto_addr, Ipv4Addr::new(172, 16, 0, 1));
        assert_eq!(parsed.target_hw_addr, mac(0xbb));
        assert_eq!(parsed.target_proto_addr, Ipv4Addr::new(172, 16, 0, 2));
    }

    #[test]
    fn test_from_frame_rejects_non_arp() {
        let packet = ArpPacket::who_has(
            mac(0x11),
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        );
        let mut frame = packet.to_frame(mac(0x11), MacAddr::broadcast());
        frame[12] = 0x08;
        frame[13] = 0x00; // IPv4 ethertype
        assert!(ArpPacket::from_frame(&frame).is_err());
    }
}
