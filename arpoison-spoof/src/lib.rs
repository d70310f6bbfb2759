//! ARP cache-poisoning engine
//!
//! Floods victims with forged is-at replies so their traffic to the
//! gateway (and, in full-duplex mode, the gateway's traffic back)
//! transits this host. A background watcher answers live who-has
//! requests on the segment before the real owner can, and stopping the
//! engine re-announces the genuine hardware addresses so victim caches
//! heal.
//!
//! The kernel must forward the diverted traffic for victims to keep
//! their connectivity; the engine turns forwarding on while it runs and
//! puts it back the way it found it.

pub mod context;
pub mod forge;
pub mod gateway;
pub mod poison;
pub mod resolve;
pub mod spoofer;
pub mod watcher;

pub use context::{SpoofConfig, SpoofContext, SpoofEvent};
pub use forge::ArpForger;
pub use gateway::Gateway;
pub use poison::poison_cycle;
pub use resolve::ArpProbeResolver;
pub use spoofer::ArpSpoofer;
