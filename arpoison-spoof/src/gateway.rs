//! Gateway identity

use arpoison_core::{AddressResolver, Error, MacAddr, Result};
use std::fmt;
use std::net::Ipv4Addr;
use tracing::info;

/// The router being impersonated. Both addresses are pinned for the
/// lifetime of an engine run; the MAC is needed to forge frames toward
/// the gateway and to announce the truth again at teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gateway {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl Gateway {
    /// Resolve the gateway's hardware address.
    ///
    /// A gateway that does not answer is fatal: without its MAC neither
    /// full-duplex poisoning nor cache restoration can work.
    pub async fn resolve(resolver: &dyn AddressResolver, ip: Ipv4Addr) -> Result<Self> {
        match resolver.resolve(ip).await? {
            Some(mac) => {
                info!(gateway = %ip, mac = %mac, "gateway resolved");
                Ok(Self { ip, mac })
            }
            None => Err(Error::resolution(format!(
                "couldn't determine the hardware address of gateway {}",
                ip
            ))),
        }
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ip, self.mac)
    }
}
