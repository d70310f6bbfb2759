//! Active hardware-address resolution over raw ARP probes

use arpoison_core::{AddressResolver, Error, Interface, MacAddr, Result};
use arpoison_packet::ArpPacket;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Default time to wait for an is-at answer
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Read timeout on the receiving half, so the deadline gets polled
const READ_TICK: Duration = Duration::from_millis(200);

/// Resolves hosts by broadcasting a genuine who-has request and waiting
/// for the owner's reply.
///
/// The probe blocks on a raw datalink channel, so the async entry point
/// runs it on the blocking pool.
pub struct ArpProbeResolver {
    interface: Interface,
    local_ip: Ipv4Addr,
    timeout: Duration,
}

impl ArpProbeResolver {
    pub fn new(interface: Interface, local_ip: Ipv4Addr) -> Self {
        Self {
            interface,
            local_ip,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait::async_trait]
impl AddressResolver for ArpProbeResolver {
    async fn resolve(&self, ip: Ipv4Addr) -> Result<Option<MacAddr>> {
        let interface = self.interface.clone();
        let local_ip = self.local_ip;
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || probe(&interface, local_ip, ip, timeout))
            .await
            .map_err(|e| Error::resolution(format!("resolver task failed: {}", e)))?
    }
}

fn probe(
    interface: &Interface,
    local_ip: Ipv4Addr,
    ip: Ipv4Addr,
    timeout: Duration,
) -> Result<Option<MacAddr>> {
    let (mut tx, mut rx) = interface.open_channel(Some(READ_TICK))?;

    let request = ArpPacket::who_has(interface.mac_address, local_ip, ip)
        .to_frame(interface.mac_address, MacAddr::broadcast());

    debug!(ip = %ip, "broadcasting who-has probe");
    tx.send_to(&request, None)
        .ok_or_else(|| Error::Interface("probe send rejected".to_string()))?
        .map_err(|e| Error::Interface(format!("probe send failed: {}", e)))?;

    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        let frame = match rx.next() {
            Ok(frame) => frame,
            // Read timeouts just mean nothing arrived this tick.
            Err(_) => continue,
        };

        let arp = match ArpPacket::from_frame(frame) {
            Ok(arp) => arp,
            Err(_) => continue,
        };

        if arp.is_reply() && arp.sender_proto_addr == ip {
            trace!(ip = %ip, mac = %arp.sender_hw_addr, "probe answered");
            return Ok(Some(arp.sender_hw_addr));
        }
    }

    debug!(ip = %ip, "probe timed out");
    Ok(None)
}
