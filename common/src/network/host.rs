//! Probe outcome records.
//!
//! A record is created once by whichever probe succeeded, handed to the
//! drain loop, and only touched again by the enrichment pass.

use std::net::IpAddr;

use pnet::util::MacAddr;

/// How a host's reachability was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMethod {
    /// TCP connect sweep over a short list of commonly open ports.
    Tcp,
    /// One ICMP echo via the system `ping` utility.
    Icmp,
}

impl DiscoveryMethod {
    /// Label used in the report's `Method:` line.
    pub fn describe(&self) -> &'static str {
        match self {
            DiscoveryMethod::Tcp => "TCP (ports)",
            DiscoveryMethod::Icmp => "ICMP ping",
        }
    }
}

/// A host that answered a discovery probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub addr: IpAddr,
    pub method: DiscoveryMethod,
    /// The port that accepted the connect, for TCP discovery.
    pub responding_port: Option<u16>,
    pub hostname: Option<String>,
    pub mac: Option<MacAddr>,
    pub vendor: Option<String>,
}

impl HostRecord {
    pub fn new(addr: IpAddr, method: DiscoveryMethod) -> Self {
        Self {
            addr,
            method,
            responding_port: None,
            hostname: None,
            mac: None,
            vendor: None,
        }
    }

    pub fn with_responding_port(mut self, port: u16) -> Self {
        self.responding_port = Some(port);
        self
    }

    /// Value of the report's "Open Port" column: the responding port for
    /// TCP discovery, the literal `ICMP` otherwise.
    pub fn port_label(&self) -> String {
        match (self.method, self.responding_port) {
            (DiscoveryMethod::Tcp, Some(port)) => port.to_string(),
            _ => String::from("ICMP"),
        }
    }

    pub fn mac_label(&self) -> String {
        self.mac
            .map(|mac| mac.to_string().to_uppercase())
            .unwrap_or_else(|| String::from("Unknown"))
    }

    pub fn hostname_label(&self) -> &str {
        self.hostname.as_deref().unwrap_or("Unknown")
    }
}

/// Classification of a probed port.
///
/// Only `Open` outcomes survive into the report; the other states exist
/// so probe code can name what it observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
    Filtered,
}

impl PortState {
    pub fn describe(&self) -> &'static str {
        match self {
            PortState::Open => "Open",
            PortState::Closed => "Closed",
            PortState::Filtered => "Filtered",
        }
    }
}

/// An open port on the scanned target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRecord {
    pub port: u16,
    pub service: &'static str,
    pub state: PortState,
    pub banner: String,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn port_label_reflects_the_discovery_method() {
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let tcp = HostRecord::new(addr, DiscoveryMethod::Tcp).with_responding_port(443);
        assert_eq!(tcp.port_label(), "443");

        let icmp = HostRecord::new(addr, DiscoveryMethod::Icmp);
        assert_eq!(icmp.port_label(), "ICMP");
    }

    #[test]
    fn unknown_labels_when_enrichment_found_nothing() {
        let record = HostRecord::new(
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            DiscoveryMethod::Icmp,
        );
        assert_eq!(record.mac_label(), "Unknown");
        assert_eq!(record.hostname_label(), "Unknown");
    }
}
