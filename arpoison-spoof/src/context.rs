//! Engine configuration and wiring

use arpoison_core::{
    AddressResolver, DuplexMode, FirewallControl, FrameCapture, Interface, PacketSender,
    TargetRegistry,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default delay between poison cycles
const DEFAULT_POISON_INTERVAL: Duration = Duration::from_secs(1);

/// Default pause after corrective frames before teardown completes
const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Tunable engine parameters
#[derive(Debug, Clone)]
pub struct SpoofConfig {
    /// Gateway address to impersonate
    pub gateway_ip: Ipv4Addr,
    /// Poison both directions or victims only
    pub duplex: DuplexMode,
    /// Delay between poison cycles
    pub poison_interval: Duration,
    /// How long corrective frames get to propagate during teardown
    pub settle_delay: Duration,
}

impl SpoofConfig {
    pub fn new(gateway_ip: Ipv4Addr) -> Self {
        Self {
            gateway_ip,
            duplex: DuplexMode::default(),
            poison_interval: DEFAULT_POISON_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn duplex(mut self, duplex: DuplexMode) -> Self {
        self.duplex = duplex;
        self
    }

    pub fn poison_interval(mut self, interval: Duration) -> Self {
        self.poison_interval = interval;
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

/// Notifications emitted by the poison loop as the target set changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpoofEvent {
    /// New targets appeared in the registry
    TargetsAcquired(usize),
    /// Targets were removed from the registry
    TargetsLost(usize),
}

/// Everything the engine needs from its environment.
///
/// Collaborators sit behind traits so the engine can run against real
/// network plumbing or against in-memory doubles.
pub struct SpoofContext {
    /// Interface the attack runs on
    pub interface: Interface,
    /// Our own IPv4 address on that interface
    pub local_ip: Ipv4Addr,
    /// Raw frame transmission
    pub sender: Arc<dyn PacketSender>,
    /// Hardware-address resolution
    pub resolver: Arc<dyn AddressResolver>,
    /// Kernel forwarding control
    pub firewall: Arc<dyn FirewallControl>,
    /// Shared victim set
    pub targets: Arc<TargetRegistry>,
    /// Frame source for the request watcher
    pub capture: Box<dyn FrameCapture>,
    /// Engine parameters
    pub config: SpoofConfig,
    /// Optional channel for target-set notifications
    pub events: Option<mpsc::UnboundedSender<SpoofEvent>>,
}
