//! Probe strategies.
//!
//! Each probe answers one question about one unit of the scan space:
//! "is this host reachable?" or "is this port open?". Probes own their
//! socket or subprocess exclusively and release it on every exit path.
//! A refused or timed-out unit is `Ok(None)`, not an error; errors are
//! reserved for genuinely unexpected failures and are discarded by the
//! scheduler's drain loop.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;

use sondr_common::network::host::{DiscoveryMethod, HostRecord, PortRecord, PortState};
use sondr_common::network::services;

/// Ports tried, in order, when probing a host over TCP. The first
/// successful connect wins and is recorded as the responding port.
pub const DISCOVERY_PORTS: [u16; 9] = [80, 443, 22, 21, 25, 53, 135, 139, 445];

/// Reachability strategy for a single host.
///
/// The seam exists so scans can be driven by a deterministic probe in
/// tests; production code uses [`NetworkProber`].
#[async_trait]
pub trait HostProber: Send + Sync {
    async fn probe(
        &self,
        addr: IpAddr,
        method: DiscoveryMethod,
        probe_timeout: Duration,
    ) -> anyhow::Result<Option<HostRecord>>;
}

/// Open-port strategy for a single target port.
#[async_trait]
pub trait PortProber: Send + Sync {
    async fn probe(
        &self,
        addr: IpAddr,
        port: u16,
        probe_timeout: Duration,
    ) -> anyhow::Result<Option<PortRecord>>;
}

/// Production host prober: TCP connect sweep or system-ping echo.
pub struct NetworkProber;

#[async_trait]
impl HostProber for NetworkProber {
    async fn probe(
        &self,
        addr: IpAddr,
        method: DiscoveryMethod,
        probe_timeout: Duration,
    ) -> anyhow::Result<Option<HostRecord>> {
        let hit = match method {
            DiscoveryMethod::Tcp => tcp_sweep(addr, probe_timeout).await,
            DiscoveryMethod::Icmp => icmp_probe(addr, probe_timeout).await,
        };
        Ok(hit)
    }
}

/// Production port prober: connect plus best-effort banner grab.
pub struct ConnectProber;

#[async_trait]
impl PortProber for ConnectProber {
    async fn probe(
        &self,
        addr: IpAddr,
        port: u16,
        probe_timeout: Duration,
    ) -> anyhow::Result<Option<PortRecord>> {
        let socket = SocketAddr::new(addr, port);
        let mut stream = match timeout(probe_timeout, TcpStream::connect(socket)).await {
            Ok(Ok(stream)) => stream,
            // Refused (closed) and elapsed (filtered) both drop the unit.
            Ok(Err(_)) | Err(_) => return Ok(None),
        };

        let banner = sondr_protocols::banner::grab(&mut stream, port).await;

        Ok(Some(PortRecord {
            port,
            service: services::service_name(port),
            state: PortState::Open,
            banner,
        }))
    }
}

async fn tcp_sweep(addr: IpAddr, probe_timeout: Duration) -> Option<HostRecord> {
    for port in DISCOVERY_PORTS {
        let socket = SocketAddr::new(addr, port);
        if let Ok(Ok(_stream)) = timeout(probe_timeout, TcpStream::connect(socket)).await {
            return Some(HostRecord::new(addr, DiscoveryMethod::Tcp).with_responding_port(port));
        }
    }
    None
}

async fn icmp_probe(addr: IpAddr, probe_timeout: Duration) -> Option<HostRecord> {
    sondr_protocols::ping::icmp_echo(addr, probe_timeout)
        .await
        .then(|| HostRecord::new(addr, DiscoveryMethod::Icmp))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
