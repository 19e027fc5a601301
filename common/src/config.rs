use std::time::Duration;

/// Per-call scan settings.
///
/// One instance is built for each scan invocation and never shared
/// between concurrent scans.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of probes in flight at any instant.
    pub max_workers: usize,
    /// Timeout for a single host reachability check.
    pub host_probe_timeout: Duration,
    /// Timeout for a single port connect. Longer than the host timeout
    /// because a banner read follows the connect.
    pub port_probe_timeout: Duration,
    /// Merge clearly labeled sample rows into empty loopback port scans.
    ///
    /// Off by default. Fixture rows are tagged `[demo fixture]` in the
    /// banner column and never replace real probe results.
    pub demo_fixtures: bool,
    /// Suppress decorative terminal output.
    pub quiet: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_workers: 100,
            host_probe_timeout: Duration::from_secs(1),
            port_probe_timeout: Duration::from_secs(3),
            demo_fixtures: false,
            quiet: false,
        }
    }
}
