//! Hostname and MAC enrichment for hosts that answered a probe.
//!
//! Enrichment runs after the scheduler has drained and only over positive
//! outcomes, never in the probing hot loop. Every step is best-effort: a
//! failed lookup falls through to the next source, and a host that resists
//! all of them simply keeps its `Unknown` labels.
//!
//! Resolution order for the hostname column: reverse DNS (PTR), NetBIOS
//! name on Windows, then the OUI vendor string as a last hint.

use std::net::IpAddr;
use std::time::Duration;

use pnet::datalink;
use pnet::util::MacAddr;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;
use trust_dns_resolver::TokioAsyncResolver;

use sondr_common::network::host::HostRecord;

use crate::vendors;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Fills in hostname, MAC, and vendor for every record in place.
pub async fn enrich(hosts: &mut [HostRecord]) {
    let resolver = TokioAsyncResolver::tokio_from_system_conf().ok();

    for host in hosts.iter_mut() {
        host.mac = resolve_mac(host.addr).await;
        host.vendor = host.mac.and_then(vendors::get_vendor);
        host.hostname = resolve_hostname(resolver.as_ref(), host.addr)
            .await
            .or_else(|| host.vendor.clone());
    }
}

async fn resolve_hostname(resolver: Option<&TokioAsyncResolver>, addr: IpAddr) -> Option<String> {
    if let Some(resolver) = resolver
        && let Ok(Ok(response)) = timeout(LOOKUP_TIMEOUT, resolver.reverse_lookup(addr)).await
        && let Some(name) = response.iter().next()
    {
        let name = name.to_string();
        let name = name.trim_end_matches('.');
        if !name.is_empty() && name != addr.to_string() {
            return Some(name.to_string());
        }
    }

    #[cfg(windows)]
    if let Some(name) = netbios_name(addr).await {
        return Some(name);
    }

    None
}

/// NetBIOS name query via `nbtstat -A`; the `<00> UNIQUE` entry is the
/// machine name.
#[cfg(windows)]
async fn netbios_name(addr: IpAddr) -> Option<String> {
    let output = timeout(
        LOOKUP_TIMEOUT,
        Command::new("nbtstat").arg("-A").arg(addr.to_string()).output(),
    )
    .await
    .ok()?
    .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if line.contains("<00>") && line.contains("UNIQUE") {
            return line.split_whitespace().next().map(str::to_string);
        }
    }
    None
}

/// MAC resolution: the local interface for our own addresses, the ARP
/// cache for neighbours. Absence yields `None`, never an error.
pub async fn resolve_mac(addr: IpAddr) -> Option<MacAddr> {
    if is_local_addr(addr) {
        return local_interface_mac();
    }
    arp_table_mac(addr).await
}

fn is_local_addr(addr: IpAddr) -> bool {
    if addr.is_loopback() {
        return true;
    }
    datalink::interfaces()
        .iter()
        .flat_map(|intf| intf.ips.iter())
        .any(|net| net.ip() == addr)
}

fn local_interface_mac() -> Option<MacAddr> {
    datalink::interfaces()
        .into_iter()
        .find(|intf| intf.is_up() && !intf.is_loopback() && !intf.ips.is_empty())
        .and_then(|intf| intf.mac)
}

async fn arp_table_mac(addr: IpAddr) -> Option<MacAddr> {
    // Targeted lookup first; some platforms only answer for the full table.
    if let Some(mac) = arp_query(addr, true).await {
        return Some(mac);
    }
    arp_query(addr, false).await
}

async fn arp_query(addr: IpAddr, targeted: bool) -> Option<MacAddr> {
    let mut cmd = Command::new("arp");
    cmd.arg("-a");
    if targeted {
        cmd.arg(addr.to_string());
    }

    let output = match timeout(LOOKUP_TIMEOUT, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            debug!("arp invocation failed: {e}");
            return None;
        }
        Err(_) => return None,
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_arp_output(&stdout, addr)
}

/// Scans ARP output for a MAC token on the line naming `addr`.
/// Accepts `:` and `-` separated MAC forms.
fn parse_arp_output(output: &str, addr: IpAddr) -> Option<MacAddr> {
    let needle = addr.to_string();
    for line in output.lines() {
        if !line_names_addr(line, &needle) {
            continue;
        }
        for token in line.split_whitespace() {
            if let Some(mac) = parse_mac_token(token) {
                return Some(mac);
            }
        }
    }
    None
}

/// Exact address-token match. `192.168.1.1` must not claim the line for
/// `192.168.1.10`; BSD-style output wraps the address in parentheses.
fn line_names_addr(line: &str, needle: &str) -> bool {
    line.split_whitespace()
        .any(|token| token.trim_matches(|c| c == '(' || c == ')') == needle)
}

fn parse_mac_token(token: &str) -> Option<MacAddr> {
    let normalized = token.replace('-', ":");
    let groups: Vec<&str> = normalized.split(':').collect();
    let well_formed = groups.len() == 6
        && groups
            .iter()
            .all(|group| group.len() == 2 && group.chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        return None;
    }
    normalized.parse().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
