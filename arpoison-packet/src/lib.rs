//! Frame construction and parsing for arpoison
//!
//! Only what the spoofing engine needs: Ethernet II framing and the ARP
//! payload. Serialization is explicit and byte-exact so forged frames can
//! be asserted on in tests.

pub mod arp;
pub mod ethernet;

pub use arp::{ArpOpcode, ArpPacket, ETHERTYPE_ARP};
pub use ethernet::EthernetFrame;
