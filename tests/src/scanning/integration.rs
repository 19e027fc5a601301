use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use sondr_common::config::ScanConfig;
use sondr_common::network::host::DiscoveryMethod;
use sondr_core::scanner;

use super::mocks::{ScriptedHostProber, ScriptedPortProber};

fn quick_config() -> ScanConfig {
    ScanConfig {
        max_workers: 8,
        host_probe_timeout: Duration::from_millis(100),
        port_probe_timeout: Duration::from_millis(100),
        demo_fixtures: false,
        quiet: true,
    }
}

#[tokio::test]
async fn tcp_silence_triggers_one_full_icmp_rerun() {
    let prober = Arc::new(ScriptedHostProber::new(false, true));
    let cfg = quick_config();

    let report = scanner::scan_hosts_with(
        "10.0.0.0/30",
        DiscoveryMethod::Tcp,
        &cfg,
        prober.clone(),
    )
    .await;

    // Both strategies covered the whole two-host space exactly once.
    assert_eq!(prober.tcp_calls.load(Ordering::SeqCst), 2);
    assert_eq!(prober.icmp_calls.load(Ordering::SeqCst), 2);

    assert!(report.contains("No hosts responded to common TCP ports."));
    // The fallback notice sits between blank lines, like the in-progress
    // output it replays.
    assert!(report.contains("\n\nNo hosts responded to common TCP ports.\nAttempting ICMP ping fallback...\n\n"));
    assert!(report.contains("Active hosts found: 2"));
    assert!(report.contains("Hosts may appear via ICMP ping"));
}

#[tokio::test]
async fn successful_tcp_scan_never_falls_back() {
    let prober = Arc::new(ScriptedHostProber::new(true, true));
    let cfg = quick_config();

    let report = scanner::scan_hosts_with(
        "10.0.0.0/30",
        DiscoveryMethod::Tcp,
        &cfg,
        prober.clone(),
    )
    .await;

    assert_eq!(prober.icmp_calls.load(Ordering::SeqCst), 0);
    assert!(!report.contains("Attempting ICMP ping fallback..."));
}

#[tokio::test]
async fn icmp_method_is_used_directly_when_selected() {
    let prober = Arc::new(ScriptedHostProber::new(false, true));
    let cfg = quick_config();

    let report = scanner::scan_hosts_with(
        "10.0.0.0/30",
        DiscoveryMethod::Icmp,
        &cfg,
        prober.clone(),
    )
    .await;

    assert_eq!(prober.tcp_calls.load(Ordering::SeqCst), 0);
    assert_eq!(prober.icmp_calls.load(Ordering::SeqCst), 2);
    assert!(report.contains("Method: ICMP ping"));
}

#[tokio::test]
async fn report_order_is_ascending_regardless_of_completion_order() {
    let mut prober = ScriptedHostProber::new(true, false);
    prober.skew_completion_order = true;
    let cfg = quick_config();

    let report = scanner::scan_hosts_with(
        "10.0.0.0/29",
        DiscoveryMethod::Tcp,
        &cfg,
        Arc::new(prober),
    )
    .await;

    let positions: Vec<usize> = (1..=6)
        .map(|octet| {
            report
                .find(&format!("10.0.0.{octet} "))
                .unwrap_or_else(|| panic!("10.0.0.{octet} missing from report"))
        })
        .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "host rows are not in ascending address order"
    );
}

#[tokio::test]
async fn port_scan_reports_only_the_open_port() {
    let prober = Arc::new(ScriptedPortProber::new(vec![80]));
    let cfg = quick_config();

    let report = scanner::scan_ports_with(
        "127.0.0.1",
        "22,80,443",
        &cfg,
        prober.clone(),
    )
    .await;

    assert_eq!(prober.calls.load(Ordering::SeqCst), 3);
    assert!(report.contains("Open ports: 1"));
    let row_count = report
        .lines()
        .filter(|line| line.starts_with("80 "))
        .count();
    assert_eq!(row_count, 1);
    assert!(report.contains("HTTP"));
    assert!(!report.contains("\n22 "));
    assert!(!report.contains("\n443 "));
}

#[tokio::test]
async fn port_scan_is_idempotent_under_a_deterministic_probe() {
    let cfg = quick_config();

    let mut tables = Vec::new();
    for _ in 0..2 {
        let prober = Arc::new(ScriptedPortProber::new(vec![22, 80]));
        let report =
            scanner::scan_ports_with("127.0.0.1", "20-90", &cfg, prober).await;
        let table: String = report
            .lines()
            .skip_while(|line| !line.starts_with("Open Ports:"))
            .collect::<Vec<&str>>()
            .join("\n");
        tables.push(table);
    }

    assert!(!tables[0].is_empty());
    assert_eq!(tables[0], tables[1]);
}

#[tokio::test]
async fn in_flight_probes_respect_the_worker_budget() {
    let prober = Arc::new(ScriptedPortProber::new(Vec::new()));
    let mut cfg = quick_config();
    cfg.max_workers = 4;

    scanner::scan_ports_with("127.0.0.1", "1-64", &cfg, prober.clone()).await;

    assert_eq!(prober.calls.load(Ordering::SeqCst), 64);
    assert!(prober.peak_in_flight.load(Ordering::SeqCst) <= 4);
}

#[tokio::test]
async fn invalid_inputs_become_error_reports() {
    let cfg = quick_config();

    let report = scanner::scan_ports("127.0.0.1", "70000", &cfg).await;
    assert_eq!(
        report,
        "Error: Invalid port format. Use: 80, 80-443, or 80,443,8080"
    );

    let report = scanner::scan_ports("127.0.0.1", "1-10001", &cfg).await;
    assert_eq!(report, "Error: Port range too large (max 10,000 ports)");

    let report = scanner::scan_hosts("not-a-range", DiscoveryMethod::Tcp, &cfg).await;
    assert!(report.starts_with("Error: Invalid network range format.\n"));
    assert!(report.contains("CIDR notation"));
}

#[tokio::test]
async fn unresolvable_target_becomes_an_error_report() {
    // RFC 2606 reserves .invalid; resolution can never succeed.
    let cfg = quick_config();
    let report = scanner::scan_ports("no-such-host.invalid", "80", &cfg).await;
    assert_eq!(report, "Error: Unable to resolve target 'no-such-host.invalid'");
}

#[tokio::test]
async fn demo_fixtures_stay_opt_in_and_labeled() {
    let mut cfg = quick_config();

    let prober = Arc::new(ScriptedPortProber::new(Vec::new()));
    let report =
        scanner::scan_ports_with("127.0.0.1", "22,80", &cfg, prober).await;
    assert!(report.contains("No open ports found."));

    cfg.demo_fixtures = true;
    let prober = Arc::new(ScriptedPortProber::new(Vec::new()));
    let report =
        scanner::scan_ports_with("127.0.0.1", "22,80", &cfg, prober).await;
    assert!(report.contains("Open ports: 2"));
    assert!(report.contains("[demo fixture]"));
}

/// End-to-end against the loopback interface; needs a live network stack.
#[tokio::test]
#[ignore]
async fn loopback_discovery_end_to_end() {
    let cfg = ScanConfig::default();
    let report = scanner::scan_hosts("127.0.0.1", DiscoveryMethod::Tcp, &cfg).await;
    assert!(report.starts_with("Network Scan Results for 127.0.0.1\n"));
    assert!(report.contains("Scanning 1 hosts..."));
}
