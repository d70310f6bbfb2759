//! CLI argument parsing

use clap::Parser;
use std::net::Ipv4Addr;

#[derive(Parser, Debug)]
#[command(name = "arpoison")]
#[command(version, about = "ARP cache-poisoning tool for MITM auditing", long_about = None)]
pub struct Cli {
    /// Network interface to use
    #[arg(short = 'I', long)]
    pub interface: Option<String>,

    /// Gateway address (read from the routing table when omitted)
    #[arg(short = 'g', long, value_name = "IP")]
    pub gateway: Option<Ipv4Addr>,

    /// Victim addresses to poison (repeatable)
    #[arg(short = 't', long = "target", value_name = "IP")]
    pub targets: Vec<Ipv4Addr>,

    /// Poison the victims' caches only, leave the gateway's alone
    #[arg(long)]
    pub half_duplex: bool,

    /// Seconds between poison rounds
    #[arg(long, value_name = "SECONDS", default_value = "1")]
    pub interval: u64,

    /// List available network interfaces
    #[arg(short = 'l', long)]
    pub list_interfaces: bool,

    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Tracing filter directive for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
