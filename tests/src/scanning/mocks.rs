//! Deterministic probe strategies for driving scans without a network.

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sondr_common::network::host::{DiscoveryMethod, HostRecord, PortRecord, PortState};
use sondr_common::network::services;
use sondr_core::probe::{HostProber, PortProber};

/// Host prober with fixed per-method answers and invocation counters.
pub struct ScriptedHostProber {
    pub tcp_reachable: bool,
    pub icmp_reachable: bool,
    pub tcp_calls: AtomicUsize,
    pub icmp_calls: AtomicUsize,
    /// Per-probe delay keyed off the last address octet, to force
    /// completion orders that differ from enumeration order.
    pub skew_completion_order: bool,
}

impl ScriptedHostProber {
    pub fn new(tcp_reachable: bool, icmp_reachable: bool) -> Self {
        Self {
            tcp_reachable,
            icmp_reachable,
            tcp_calls: AtomicUsize::new(0),
            icmp_calls: AtomicUsize::new(0),
            skew_completion_order: false,
        }
    }
}

#[async_trait]
impl HostProber for ScriptedHostProber {
    async fn probe(
        &self,
        addr: IpAddr,
        method: DiscoveryMethod,
        _probe_timeout: Duration,
    ) -> anyhow::Result<Option<HostRecord>> {
        if self.skew_completion_order {
            // Lower addresses finish last.
            if let IpAddr::V4(v4) = addr {
                let delay = 40u64.saturating_sub(u64::from(v4.octets()[3]) * 10);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }

        let hit = match method {
            DiscoveryMethod::Tcp => {
                self.tcp_calls.fetch_add(1, Ordering::SeqCst);
                self.tcp_reachable
                    .then(|| HostRecord::new(addr, method).with_responding_port(80))
            }
            DiscoveryMethod::Icmp => {
                self.icmp_calls.fetch_add(1, Ordering::SeqCst);
                self.icmp_reachable.then(|| HostRecord::new(addr, method))
            }
        };
        Ok(hit)
    }
}

/// Port prober that reports exactly the scripted ports open.
pub struct ScriptedPortProber {
    pub open_ports: Vec<u16>,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl ScriptedPortProber {
    pub fn new(open_ports: Vec<u16>) -> Self {
        Self {
            open_ports,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PortProber for ScriptedPortProber {
    async fn probe(
        &self,
        _addr: IpAddr,
        port: u16,
        _probe_timeout: Duration,
    ) -> anyhow::Result<Option<PortRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let hit = self.open_ports.contains(&port).then(|| PortRecord {
            port,
            service: services::service_name(port),
            state: PortState::Open,
            banner: String::from("No banner"),
        });
        Ok(hit)
    }
}
