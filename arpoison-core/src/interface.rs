//! Network interface wrapper and frame transmission

use crate::{Error, MacAddr, Result};
use parking_lot::Mutex;
use pnet_datalink::{Channel, DataLinkReceiver, DataLinkSender};
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

/// Raw frame transmission on a fixed interface.
///
/// The engine only ever submits fully-formed Ethernet frames; failures are
/// best-effort and reported to the caller for logging.
pub trait PacketSender: Send + Sync {
    fn send_frame(&self, frame: &[u8]) -> Result<()>;
}

/// Network interface
#[derive(Debug, Clone)]
pub struct Interface {
    /// Interface name (e.g., "eth0", "en0")
    pub name: String,
    /// Interface index
    pub index: u32,
    /// MAC address
    pub mac_address: MacAddr,
    /// Is interface up?
    pub is_up: bool,
}

impl Interface {
    /// Get interface by name
    pub fn by_name(name: &str) -> Result<Self> {
        let iface = pnet_datalink::interfaces()
            .into_iter()
            .find(|i| i.name == name)
            .ok_or_else(|| Error::Interface(format!("interface '{}' not found", name)))?;

        let mac_bytes = iface
            .mac
            .map(|mac| [mac.0, mac.1, mac.2, mac.3, mac.4, mac.5])
            .unwrap_or([0u8; 6]);

        Ok(Self {
            name: iface.name.clone(),
            index: iface.index,
            mac_address: MacAddr(mac_bytes),
            is_up: iface.is_up(),
        })
    }

    /// List all available interfaces
    pub fn list_all() -> Vec<Self> {
        pnet_datalink::interfaces()
            .into_iter()
            .map(|iface| {
                let mac_bytes = iface
                    .mac
                    .map(|mac| [mac.0, mac.1, mac.2, mac.3, mac.4, mac.5])
                    .unwrap_or([0u8; 6]);
                Self {
                    name: iface.name.clone(),
                    index: iface.index,
                    mac_address: MacAddr(mac_bytes),
                    is_up: iface.is_up(),
                }
            })
            .collect()
    }

    /// First IPv4 address assigned to this interface, if any
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        let iface = pnet_datalink::interfaces()
            .into_iter()
            .find(|i| i.name == self.name)?;

        for network in iface.ips {
            if let ipnetwork::IpNetwork::V4(v4) = network {
                return Some(v4.ip());
            }
        }
        None
    }

    /// Open a raw datalink channel on this interface.
    ///
    /// `read_timeout` bounds blocking reads on the receiving half so callers
    /// can poll a deadline between reads.
    pub fn open_channel(
        &self,
        read_timeout: Option<Duration>,
    ) -> Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>)> {
        let iface = pnet_datalink::interfaces()
            .into_iter()
            .find(|i| i.name == self.name)
            .ok_or_else(|| Error::Interface(format!("interface '{}' not found", self.name)))?;

        let config = pnet_datalink::Config {
            read_timeout,
            ..Default::default()
        };

        match pnet_datalink::channel(&iface, config) {
            Ok(Channel::Ethernet(tx, rx)) => Ok((tx, rx)),
            Ok(_) => Err(Error::Interface("unsupported channel type".to_string())),
            Err(e) => Err(Error::Interface(format!("failed to open channel: {}", e))),
        }
    }

    /// Create a persistent sender for this interface
    pub fn open_sender(&self) -> Result<FrameSender> {
        let (tx, _) = self.open_channel(None)?;
        Ok(FrameSender {
            interface: self.name.clone(),
            tx: Arc::new(Mutex::new(tx)),
        })
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.mac_address)
    }
}

/// Persistent datalink sender, shareable across tasks
#[derive(Clone)]
pub struct FrameSender {
    interface: String,
    tx: Arc<Mutex<Box<dyn DataLinkSender>>>,
}

impl PacketSender for FrameSender {
    fn send_frame(&self, frame: &[u8]) -> Result<()> {
        let mut tx = self.tx.lock();
        tx.send_to(frame, None)
            .ok_or_else(|| Error::Interface(format!("send on '{}' rejected", self.interface)))?
            .map_err(|e| Error::Interface(format!("send on '{}' failed: {}", self.interface, e)))?;
        Ok(())
    }
}

/// Default gateway for an interface, read from the kernel routing table.
///
/// `/proc/net/route` stores addresses as little-endian hex.
#[cfg(target_os = "linux")]
pub fn default_gateway(interface: &str) -> Result<Option<Ipv4Addr>> {
    let table = std::fs::read_to_string("/proc/net/route")?;

    for line in table.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 || fields[0] != interface {
            continue;
        }
        // Default route has destination 0.0.0.0
        if fields[1] != "00000000" {
            continue;
        }
        let raw = u32::from_str_radix(fields[2], 16)
            .map_err(|_| Error::Interface("malformed routing table entry".to_string()))?;
        return Ok(Some(Ipv4Addr::from(raw.to_le_bytes())));
    }

    Ok(None)
}

#[cfg(not(target_os = "linux"))]
pub fn default_gateway(_interface: &str) -> Result<Option<Ipv4Addr>> {
    Ok(None)
}
