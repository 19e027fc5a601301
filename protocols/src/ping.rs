//! ICMP reachability via the system `ping` utility.
//!
//! Shelling out sidesteps the raw-socket privileges an in-process ICMP
//! echo would require. Reachability is decided by the exit status alone;
//! the utility's output is discarded.
//!
//! Flag syntax differs per platform: Windows takes `-n 1 -w <ms>`, the
//! POSIX family takes `-c 1 -W <sec>`.

use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

/// Sends one echo request with a bounded wait.
///
/// A missing or failing `ping` binary counts as unreachable, never as an
/// error for the surrounding scan.
pub async fn icmp_echo(addr: IpAddr, timeout: Duration) -> bool {
    let mut cmd = Command::new("ping");

    if cfg!(windows) {
        let timeout_ms = timeout.as_millis().max(1);
        cmd.args(["-n", "1", "-w"]).arg(timeout_ms.to_string());
    } else {
        let timeout_sec = timeout.as_secs().max(1);
        cmd.args(["-c", "1", "-W"]).arg(timeout_sec.to_string());
    }

    cmd.arg(addr.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match cmd.status().await {
        Ok(status) => status.success(),
        Err(e) => {
            debug!("ping invocation failed for {addr}: {e}");
            false
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
