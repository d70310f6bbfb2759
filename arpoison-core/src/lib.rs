//! Arpoison core library
//!
//! Fundamental types, error handling and the collaborator traits the
//! spoofing engine depends on: frame transmission, hardware-address
//! resolution, forwarding control and the shared target registry.

pub mod error;
pub mod firewall;
pub mod interface;
pub mod packet;
pub mod target;
pub mod types;

pub use error::{Error, Result};
pub use firewall::{FirewallControl, ProcForwarding};
pub use interface::{default_gateway, FrameSender, Interface, PacketSender};
pub use packet::{FrameCapture, Packet};
pub use target::{Target, TargetRegistry};
pub use types::{DuplexMode, MacAddr};

use std::net::Ipv4Addr;

/// Hardware-address resolution for a single host on the local segment.
///
/// Returns `Ok(None)` when the host did not answer within the resolver's
/// deadline; transport failures surface as errors.
#[async_trait::async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, ip: Ipv4Addr) -> Result<Option<MacAddr>>;
}
