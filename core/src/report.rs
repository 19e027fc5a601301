//! Plain-text report rendering.
//!
//! Every scan call produces exactly one of these blocks. The column
//! widths and header strings are a compatibility surface: the GUI shell,
//! the export-to-file feature, and saved sessions all store the text
//! verbatim, so the layout must not drift.

use std::net::IpAddr;
use std::time::Duration;

use sondr_common::error::ScanError;
use sondr_common::network::host::{DiscoveryMethod, HostRecord, PortRecord};
use sondr_common::network::services::HIGH_RISK_PORTS;

const TITLE_RULE: usize = 50;
const TABLE_RULE: usize = 80;
const BANNER_COLUMN: usize = 50;

/// Inputs for the host discovery report.
pub struct HostReport<'a> {
    pub range_text: &'a str,
    pub method: DiscoveryMethod,
    pub total_hosts: usize,
    /// In-progress lines (progress counts, fallback notice) in the order
    /// they were produced.
    pub transcript: &'a [String],
    pub fallback_used: bool,
    pub duration: Duration,
    pub hosts: &'a [HostRecord],
}

impl HostReport<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Network Scan Results for {}\n", self.range_text));
        out.push_str(&format!("{}\n\n", "=".repeat(TITLE_RULE)));
        out.push_str(&format!("Scanning {} hosts...\n", self.total_hosts));
        out.push_str(&format!("Method: {}\n\n", self.method.describe()));

        for line in self.transcript {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str("\nScan Summary:\n");
        out.push_str(&format!(
            "Duration: {:.2} seconds\n",
            self.duration.as_secs_f64()
        ));
        out.push_str(&format!("Active hosts found: {}\n\n", self.hosts.len()));

        if self.hosts.is_empty() {
            out.push_str("No active hosts found in the specified range.\n");
        } else {
            out.push_str("Active Hosts:\n");
            out.push_str(&format!("{}\n", "-".repeat(TABLE_RULE)));
            out.push_str(&format!(
                "{:<15} {:<10} {:<20} {:<30}\n",
                "IP Address", "Open Port", "MAC Address", "Hostname"
            ));
            out.push_str(&format!("{}\n", "-".repeat(TABLE_RULE)));
            for host in self.hosts {
                out.push_str(&format!(
                    "{:<15} {:<10} {:<20} {:<30}\n",
                    host.addr.to_string(),
                    host.port_label(),
                    host.mac_label(),
                    host.hostname_label()
                ));
            }
        }

        out.push_str("\nNote: This scan uses basic connectivity checks.\n");
        if self.method == DiscoveryMethod::Icmp || self.fallback_used {
            out.push_str(
                "Hosts may appear via ICMP ping even when no common TCP ports are open.\n",
            );
        }
        out.push_str("Some hosts may not respond due to firewalls or security policies.\n");

        out
    }
}

/// Inputs for the port scan report.
pub struct PortReport<'a> {
    pub target: IpAddr,
    pub port_range_text: &'a str,
    pub total_ports: usize,
    pub transcript: &'a [String],
    pub duration: Duration,
    pub open_ports: &'a [PortRecord],
}

impl PortReport<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Port Scan Results for {}\n", self.target));
        out.push_str(&format!("{}\n\n", "=".repeat(TITLE_RULE)));
        out.push_str(&format!("Target: {}\n", self.target));
        out.push_str(&format!(
            "Port Range: {} ({} ports)\n",
            self.port_range_text, self.total_ports
        ));
        out.push_str("Scanning...\n\n");

        for line in self.transcript {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str("\nScan Summary:\n");
        out.push_str(&format!(
            "Duration: {:.2} seconds\n",
            self.duration.as_secs_f64()
        ));
        out.push_str(&format!("Ports scanned: {}\n", self.total_ports));
        out.push_str(&format!("Open ports: {}\n\n", self.open_ports.len()));

        if self.open_ports.is_empty() {
            out.push_str("No open ports found.\n");
            out.push_str("This could indicate:\n");
            out.push_str("- Host is down or unreachable\n");
            out.push_str("- Firewall is blocking connections\n");
            out.push_str("- No services running on scanned ports\n");
        } else {
            out.push_str("Open Ports:\n");
            out.push_str(&format!("{}\n", "-".repeat(TABLE_RULE)));
            out.push_str(&format!(
                "{:<6} {:<15} {:<8} {}\n",
                "Port", "Service", "State", "Banner"
            ));
            out.push_str(&format!("{}\n", "-".repeat(TABLE_RULE)));
            for record in self.open_ports {
                out.push_str(&format!(
                    "{:<6} {:<15} {:<8} {}\n",
                    record.port,
                    record.service,
                    record.state.describe(),
                    clip_banner(&record.banner)
                ));
            }
            self.render_security_analysis(&mut out);
        }

        out.push_str("\nNote: Results may vary due to firewalls and network policies.\n");

        out
    }

    fn render_security_analysis(&self, out: &mut String) {
        out.push_str("\nSecurity Analysis:\n");

        let risky: Vec<String> = self
            .open_ports
            .iter()
            .filter(|record| HIGH_RISK_PORTS.contains(&record.port))
            .map(|record| record.port.to_string())
            .collect();
        if !risky.is_empty() {
            out.push_str(&format!(
                "   [!] High-risk ports detected: {}\n",
                risky.join(", ")
            ));
            out.push_str("   Consider securing or disabling these services.\n");
        }

        if self
            .open_ports
            .iter()
            .any(|record| matches!(record.port, 80 | 8080))
        {
            out.push_str("   HTTP services detected. Consider using HTTPS.\n");
        }

        if self.open_ports.iter().any(|record| record.port == 22) {
            out.push_str("   SSH detected. Ensure strong authentication.\n");
        }
    }
}

/// Banners longer than the column are clipped with an ellipsis.
fn clip_banner(banner: &str) -> String {
    if banner.chars().count() > BANNER_COLUMN {
        let clipped: String = banner.chars().take(BANNER_COLUMN - 3).collect();
        format!("{clipped}...")
    } else {
        banner.to_string()
    }
}

/// The error-formatted text block for an invalid range input.
pub fn render_range_error(err: &ScanError) -> String {
    let details = match err {
        ScanError::InvalidRangeFormat { details } => details.as_str(),
        other => return format!("Error: {other}"),
    };
    format!(
        "Error: Invalid network range format.\n\
         Please use CIDR notation (e.g., 192.168.1.0/24) or single IP.\n\
         Error details: {details}"
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
