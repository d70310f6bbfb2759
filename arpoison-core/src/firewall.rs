//! IP-forwarding control
//!
//! The engine needs kernel packet forwarding enabled while poisoning so
//! intercepted traffic is relayed instead of dropped. The flag observed at
//! construction is restored verbatim on stop.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// OS-level IP forwarding toggle
pub trait FirewallControl: Send + Sync {
    fn forwarding_enabled(&self) -> Result<bool>;
    fn enable_forwarding(&self, enabled: bool) -> Result<()>;
}

const IPV4_FORWARD: &str = "/proc/sys/net/ipv4/ip_forward";

/// Forwarding control backed by the `net.ipv4.ip_forward` sysctl
pub struct ProcForwarding {
    path: PathBuf,
}

impl ProcForwarding {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(IPV4_FORWARD),
        }
    }

    /// Use an alternate sysctl path (tests point this at a temp file)
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for ProcForwarding {
    fn default() -> Self {
        Self::new()
    }
}

impl FirewallControl for ProcForwarding {
    fn forwarding_enabled(&self) -> Result<bool> {
        let value = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Firewall(format!("read {}: {}", self.path.display(), e)))?;
        Ok(value.trim() == "1")
    }

    fn enable_forwarding(&self, enabled: bool) -> Result<()> {
        let value = if enabled { "1" } else { "0" };
        debug!(enabled, "setting ip_forward");
        std::fs::write(&self.path, value)
            .map_err(|e| Error::Firewall(format!("write {}: {}", self.path.display(), e)))?;
        Ok(())
    }
}
