pub mod hosts;
pub mod ports;

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use sondr_common::config::ScanConfig;
use sondr_common::network::host::DiscoveryMethod;

#[derive(Parser)]
#[command(name = "sondr")]
#[command(about = "A small concurrent host and port scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Maximum number of probes in flight
    #[arg(long, global = true, default_value_t = 100)]
    pub workers: usize,

    /// Suppress decorative output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Merge clearly labeled sample rows into empty loopback port scans
    #[arg(long, global = true)]
    pub demo_fixtures: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover reachable hosts in a network range
    #[command(alias = "h")]
    Hosts {
        /// CIDR block (e.g. 192.168.1.0/24) or a single IP
        range: String,
        /// Discovery method
        #[arg(long, value_enum, default_value_t = Method::Tcp)]
        method: Method,
        /// Per-probe timeout in seconds
        #[arg(long, default_value_t = 1)]
        timeout: u64,
    },
    /// Scan ports on a single target
    #[command(alias = "p")]
    Ports {
        /// IP address or hostname
        target: String,
        /// Port spec: 80, 80-443, or 80,443,8080
        ports: String,
        /// Per-probe timeout in seconds
        #[arg(long, default_value_t = 3)]
        timeout: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Method {
    Tcp,
    Icmp,
}

impl From<Method> for DiscoveryMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Tcp => DiscoveryMethod::Tcp,
            Method::Icmp => DiscoveryMethod::Icmp,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Builds the per-call scan settings from the global flags plus the
    /// subcommand's timeout.
    pub fn scan_config(&self, timeout_secs: u64) -> ScanConfig {
        let timeout = Duration::from_secs(timeout_secs.max(1));
        let defaults = ScanConfig::default();
        ScanConfig {
            max_workers: self.workers.max(1),
            host_probe_timeout: match self.command {
                Commands::Hosts { .. } => timeout,
                _ => defaults.host_probe_timeout,
            },
            port_probe_timeout: match self.command {
                Commands::Ports { .. } => timeout,
                _ => defaults.port_probe_timeout,
            },
            demo_fixtures: self.demo_fixtures,
            quiet: self.quiet,
        }
    }
}
