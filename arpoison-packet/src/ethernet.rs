//! Ethernet II frame construction and parsing

use arpoison_core::{Error, MacAddr, Result};
use bytes::{BufMut, BytesMut};

/// Ethernet II frame
#[derive(Debug, Clone)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub destination: MacAddr,
    /// Source MAC address
    pub source: MacAddr,
    /// EtherType
    pub ethertype: u16,
    /// Payload data
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    /// Ethernet header size (dst + src + type)
    pub const HEADER_SIZE: usize = 14;

    /// Minimum frame size on the wire (without FCS)
    pub const MIN_FRAME_SIZE: usize = 60;

    pub fn new(destination: MacAddr, source: MacAddr, ethertype: u16, payload: Vec<u8>) -> Self {
        Self {
            destination,
            source,
            ethertype,
            payload,
        }
    }

    /// Serialize the frame, padding to the minimum wire size
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());

        buf.put_slice(self.destination.as_bytes());
        buf.put_slice(self.source.as_bytes());
        buf.put_u16(self.ethertype);
        buf.put_slice(&self.payload);

        let mut frame = buf.to_vec();
        if frame.len() < Self::MIN_FRAME_SIZE {
            frame.resize(Self::MIN_FRAME_SIZE, 0);
        }
        frame
    }

    /// Parse a frame from raw bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::parsing("Ethernet frame too short"));
        }

        let destination = MacAddr::from_slice(&data[0..6])
            .ok_or_else(|| Error::parsing("truncated destination MAC"))?;
        let source = MacAddr::from_slice(&data[6..12])
            .ok_or_else(|| Error::parsing("truncated source MAC"))?;
        let ethertype = u16::from_be_bytes([data[12], data[13]]);

        Ok(Self {
            destination,
            source,
            ethertype,
            payload: data[Self::HEADER_SIZE..].to_vec(),
        })
    }
}
