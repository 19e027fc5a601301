//! Best-effort service banner collection.
//!
//! Runs immediately after a successful port connect. Three behaviours:
//! * greeting protocols (FTP, SSH, SMTP, POP3, IMAP) announce themselves,
//!   so the first kilobyte is read as-is;
//! * HTTP-family ports get a minimal `HEAD` request and the `Server:`
//!   header is extracted from the response;
//! * everything else is recorded as a generic service marker.
//!
//! A failed grab degrades to `No banner`; it never fails the probe.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const READ_BUDGET: usize = 1024;
const READ_TIMEOUT: Duration = Duration::from_secs(2);
const MAX_BANNER_LEN: usize = 100;

/// Ports whose services send a greeting line on connect.
const GREETING_PORTS: &[u16] = &[21, 22, 25, 110, 143];
/// Ports probed with a plaintext HTTP HEAD request.
const HTTP_PORTS: &[u16] = &[80, 8080];

/// Grabs a banner from a freshly connected stream.
pub async fn grab(stream: &mut TcpStream, port: u16) -> String {
    let grabbed = if GREETING_PORTS.contains(&port) {
        read_greeting(stream).await
    } else if HTTP_PORTS.contains(&port) {
        head_request(stream).await
    } else {
        return String::from("Service detected");
    };

    grabbed.unwrap_or_else(|| String::from("No banner"))
}

async fn read_greeting(stream: &mut TcpStream) -> Option<String> {
    let text = read_chunk(stream).await?;
    if text.is_empty() {
        return None;
    }
    Some(truncate(text))
}

async fn head_request(stream: &mut TcpStream) -> Option<String> {
    timeout(READ_TIMEOUT, stream.write_all(b"HEAD / HTTP/1.0\r\n\r\n"))
        .await
        .ok()?
        .ok()?;
    let response = read_chunk(stream).await?;
    Some(extract_server_header(&response))
}

/// Pulls the `Server:` line out of an HTTP response head, falling back
/// to a generic marker when the header is absent.
fn extract_server_header(response: &str) -> String {
    for line in response.lines() {
        if line.to_ascii_lowercase().contains("server:") {
            return truncate(line.trim().to_string());
        }
    }
    String::from("HTTP Service")
}

async fn read_chunk(stream: &mut TcpStream) -> Option<String> {
    let mut buf = vec![0u8; READ_BUDGET];
    let n = timeout(READ_TIMEOUT, stream.read(&mut buf)).await.ok()?.ok()?;
    if n == 0 {
        return None;
    }
    Some(String::from_utf8_lossy(&buf[..n]).trim().to_string())
}

fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_BANNER_LEN {
        return text;
    }
    text.chars().take(MAX_BANNER_LEN).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
