//! # Address Space Model
//!
//! Turns a CIDR block or single IP into a concrete, ordered list of host
//! addresses to probe.
//!
//! Supported forms:
//! * **CIDR**: `192.168.1.0/24` (network and broadcast are excluded when
//!   the prefix leaves room for them).
//! * **Single IP**: `192.168.1.5` or an IPv6 address.

use std::net::{IpAddr, Ipv4Addr};

use pnet::ipnetwork::Ipv4Network;

use crate::error::ScanError;

/// An ordered, finite sequence of host addresses derived from a CIDR
/// prefix or a single address. Enumeration order is ascending numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpace {
    addrs: Vec<IpAddr>,
}

impl AddressSpace {
    /// Parses CIDR notation or a bare IP address.
    ///
    /// Fails with [`ScanError::InvalidRangeFormat`] before any probing can
    /// start; the `details` field carries the reason for the report text.
    pub fn parse(text: &str) -> Result<Self, ScanError> {
        let text = text.trim();

        if let Ok(addr) = text.parse::<IpAddr>() {
            return Ok(Self { addrs: vec![addr] });
        }

        let Some((ip_str, prefix_str)) = text.split_once('/') else {
            return Err(invalid(format!(
                "'{text}' is neither an IP address nor CIDR notation"
            )));
        };

        let ip = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| invalid(format!("invalid IP in CIDR '{ip_str}': {e}")))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| invalid(format!("invalid prefix in CIDR '{prefix_str}': {e}")))?;
        let network = Ipv4Network::new(ip, prefix)
            .map_err(|e| invalid(format!("invalid CIDR '{text}': {e}")))?;

        Ok(Self {
            addrs: enumerate_hosts(&network),
        })
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.addrs.iter().copied()
    }
}

fn invalid(details: String) -> ScanError {
    ScanError::InvalidRangeFormat { details }
}

/// Ascending host enumeration. A `/31` or `/32` has no distinct network
/// and broadcast addresses, so the full range is kept.
fn enumerate_hosts(network: &Ipv4Network) -> Vec<IpAddr> {
    let start: u32 = network.network().into();
    let end: u32 = network.broadcast().into();

    let range = if network.prefix() >= 31 {
        start..=end
    } else {
        start + 1..=end - 1
    };

    range.map(|raw| IpAddr::V4(Ipv4Addr::from(raw))).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
