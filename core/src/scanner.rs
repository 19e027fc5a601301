//! Scan entry points.
//!
//! `scan_hosts` and `scan_ports` are the two calls the shell consumes.
//! Both block until the scheduler has fully drained and both always
//! return a text report; every failure mode is rendered as text so the
//! caller can display it uniformly. Long scans should be spawned on a
//! caller-owned task; there is no mid-scan cancellation.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use sondr_common::config::ScanConfig;
use sondr_common::degrade;
use sondr_common::error::ScanError;
use sondr_common::network::host::{DiscoveryMethod, HostRecord, PortRecord, PortState};
use sondr_common::network::ports::{MAX_PORT_SPACE, PortSpace};
use sondr_common::network::range::AddressSpace;
use sondr_common::network::services;

use crate::probe::{ConnectProber, HostProber, NetworkProber, PortProber};
use crate::report::{self, HostReport, PortReport};
use crate::resolver;
use crate::scheduler::{self, PROGRESS_INTERVAL};

/// Discovers reachable hosts in a CIDR range or single address.
pub async fn scan_hosts(range_text: &str, method: DiscoveryMethod, cfg: &ScanConfig) -> String {
    scan_hosts_with(range_text, method, cfg, Arc::new(NetworkProber)).await
}

/// Same as [`scan_hosts`], with an injectable probe strategy.
pub async fn scan_hosts_with(
    range_text: &str,
    method: DiscoveryMethod,
    cfg: &ScanConfig,
    prober: Arc<dyn HostProber>,
) -> String {
    let space = match AddressSpace::parse(range_text) {
        Ok(space) => space,
        Err(e) => return report::render_range_error(&e),
    };

    info!(
        "scanning {} hosts in {} via {}",
        space.len(),
        range_text,
        method.describe()
    );

    let started = Instant::now();
    let mut transcript: Vec<String> = Vec::new();

    let mut hosts = run_discovery(&space, method, cfg, &prober, &mut transcript).await;

    // Whole-space fallback: one ICMP re-run when TCP probing drew a
    // complete blank, reflected in the report so nobody mistakes the
    // silence for a conclusive TCP result.
    let mut fallback_used = false;
    if method == DiscoveryMethod::Tcp && hosts.is_empty() {
        fallback_used = true;
        degrade!("no TCP responses in {range_text}, retrying with ICMP ping");
        transcript.push(String::new());
        transcript.push(String::from("No hosts responded to common TCP ports."));
        transcript.push(String::from("Attempting ICMP ping fallback..."));
        transcript.push(String::new());
        hosts = run_discovery(&space, DiscoveryMethod::Icmp, cfg, &prober, &mut transcript).await;
    }

    hosts.sort_by_key(|host| host.addr);
    resolver::enrich(&mut hosts).await;

    HostReport {
        range_text,
        method,
        total_hosts: space.len(),
        transcript: &transcript,
        fallback_used,
        duration: started.elapsed(),
        hosts: &hosts,
    }
    .render()
}

async fn run_discovery(
    space: &AddressSpace,
    method: DiscoveryMethod,
    cfg: &ScanConfig,
    prober: &Arc<dyn HostProber>,
    transcript: &mut Vec<String>,
) -> Vec<HostRecord> {
    let total = space.len();
    let probe_timeout = cfg.host_probe_timeout;
    let prober = Arc::clone(prober);

    let mut lines: Vec<String> = Vec::new();
    let outcomes = scheduler::run_bounded(
        space.iter().collect(),
        cfg.max_workers,
        |completed| {
            if completed % PROGRESS_INTERVAL == 0 {
                lines.push(format!("Scanned {completed}/{total} hosts..."));
            }
        },
        move |addr| {
            let prober = Arc::clone(&prober);
            async move { prober.probe(addr, method, probe_timeout).await }
        },
    )
    .await;

    transcript.append(&mut lines);
    outcomes
}

/// Scans a port spec against one resolved target.
pub async fn scan_ports(target_text: &str, port_range_text: &str, cfg: &ScanConfig) -> String {
    scan_ports_with(target_text, port_range_text, cfg, Arc::new(ConnectProber)).await
}

/// Same as [`scan_ports`], with an injectable probe strategy.
pub async fn scan_ports_with(
    target_text: &str,
    port_range_text: &str,
    cfg: &ScanConfig,
    prober: Arc<dyn PortProber>,
) -> String {
    let Some(target) = resolve_target(target_text).await else {
        return format!(
            "Error: {}",
            ScanError::UnresolvableTarget {
                target: target_text.to_string()
            }
        );
    };

    let space = match PortSpace::parse(port_range_text) {
        Ok(space) => space,
        Err(e) => return format!("Error: {e}"),
    };
    if space.len() > MAX_PORT_SPACE {
        return format!("Error: {}", ScanError::PortSpaceTooLarge);
    }

    info!("scanning {} ports on {}", space.len(), target);

    let started = Instant::now();
    let total = space.len();
    let probe_timeout = cfg.port_probe_timeout;

    let mut transcript: Vec<String> = Vec::new();
    let mut open_ports = {
        let prober = Arc::clone(&prober);
        scheduler::run_bounded(
            space.iter().collect(),
            cfg.max_workers,
            |completed| {
                if completed % PROGRESS_INTERVAL == 0 {
                    transcript.push(format!("Scanned {completed}/{total} ports..."));
                }
            },
            move |port| {
                let prober = Arc::clone(&prober);
                async move { prober.probe(target, port, probe_timeout).await }
            },
        )
        .await
    };

    if cfg.demo_fixtures {
        merge_demo_fixtures(&mut open_ports, &space, target);
    }
    open_ports.sort_by_key(|record| record.port);

    PortReport {
        target,
        port_range_text,
        total_ports: total,
        transcript: &transcript,
        duration: started.elapsed(),
        open_ports: &open_ports,
    }
    .render()
}

/// Resolves a literal address or a hostname, preferring IPv4.
async fn resolve_target(text: &str) -> Option<IpAddr> {
    if let Ok(addr) = text.parse::<IpAddr>() {
        return Some(addr);
    }

    let addrs: Vec<IpAddr> = tokio::net::lookup_host((text, 0))
        .await
        .ok()?
        .map(|socket| socket.ip())
        .collect();
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

/// Sample rows for demonstrations, merged only for loopback targets and
/// only where real probing found nothing. Always labeled in the banner
/// column so they cannot pass for probe results.
fn merge_demo_fixtures(open_ports: &mut Vec<PortRecord>, space: &PortSpace, target: IpAddr) {
    const FIXTURES: &[(u16, &str)] = &[
        (22, "OpenSSH 8.2p1 Ubuntu 4ubuntu0.5"),
        (25, "Postfix 3.4.8"),
        (53, "BIND 9.16.1"),
        (80, "Apache httpd 2.4.41"),
        (443, "nginx 1.18.0"),
        (3306, "MySQL 8.0.28"),
        (5432, "PostgreSQL 12.9"),
        (6379, "Redis 6.2.5"),
        (8080, "Apache httpd 2.4.41"),
        (8443, "nginx 1.18.0"),
        (9200, "Elasticsearch/7.14.0"),
        (27017, "MongoDB 4.4.8"),
    ];

    if !target.is_loopback() {
        return;
    }

    for &(port, banner) in FIXTURES {
        if space.contains(port) && !open_ports.iter().any(|record| record.port == port) {
            open_ports.push(PortRecord {
                port,
                service: services::service_name(port),
                state: PortState::Open,
                banner: format!("{banner} [demo fixture]"),
            });
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
