//! Victim targets and the shared registry

use crate::MacAddr;
use parking_lot::Mutex;
use std::fmt;
use std::net::Ipv4Addr;

/// A victim host whose ARP cache is being poisoned.
///
/// The hardware address starts unknown and is filled in lazily by the
/// poison loop once resolution succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub ip: Ipv4Addr,
    pub mac: Option<MacAddr>,
}

impl Target {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self { ip, mac: None }
    }

    pub fn with_mac(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self { ip, mac: Some(mac) }
    }

    pub fn is_resolved(&self) -> bool {
        self.mac.is_some()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mac {
            Some(mac) => write!(f, "{} ({})", self.ip, mac),
            None => write!(f, "{} (?)", self.ip),
        }
    }
}

/// Shared, mutable set of targets.
///
/// The owner (scanner, CLI, operator console) adds and removes entries
/// while the engine runs; the poison loop reads snapshots and writes
/// resolved MACs back. Snapshot-on-read keeps the two sides from racing
/// on individual entries.
#[derive(Default)]
pub struct TargetRegistry {
    targets: Mutex<Vec<Target>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of victim addresses
    pub fn from_ips<I: IntoIterator<Item = Ipv4Addr>>(ips: I) -> Self {
        Self {
            targets: Mutex::new(ips.into_iter().map(Target::new).collect()),
        }
    }

    /// Add a target; duplicate IPs are ignored
    pub fn add(&self, target: Target) {
        let mut targets = self.targets.lock();
        if !targets.iter().any(|t| t.ip == target.ip) {
            targets.push(target);
        }
    }

    /// Remove a target by IP
    pub fn remove(&self, ip: Ipv4Addr) {
        self.targets.lock().retain(|t| t.ip != ip);
    }

    /// Ordered copy of the current target set
    pub fn snapshot(&self) -> Vec<Target> {
        self.targets.lock().clone()
    }

    /// Number of registered targets
    pub fn size(&self) -> usize {
        self.targets.lock().len()
    }

    /// Record a resolved hardware address.
    ///
    /// This is the loop's only write-back point; a target removed between
    /// snapshot and resolution is silently gone.
    pub fn set_mac(&self, ip: Ipv4Addr, mac: MacAddr) {
        let mut targets = self.targets.lock();
        if let Some(target) = targets.iter_mut().find(|t| t.ip == ip) {
            target.mac = Some(mac);
        }
    }
}
