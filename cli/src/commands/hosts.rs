use std::time::Instant;

use sondr_common::network::host::DiscoveryMethod;
use sondr_common::success;
use sondr_core::scanner;

use crate::commands::{CommandLine, Method};
use crate::terminal::{print, spinner};

pub async fn run(
    range: &str,
    method: Method,
    timeout: u64,
    command_line: &CommandLine,
) -> anyhow::Result<()> {
    let cfg = command_line.scan_config(timeout);
    let method: DiscoveryMethod = method.into();

    let progress = spinner::start(format!("Probing {range} via {}...", method.describe()));
    let started = Instant::now();

    let report = scanner::scan_hosts(range, method, &cfg).await;

    progress.finish_and_clear();
    println!("{report}");

    if !cfg.quiet {
        print::fat_separator();
        print::summary_line(&format!(
            "Host discovery finished in {:.2}s",
            started.elapsed().as_secs_f64()
        ));
    }
    success!("done");
    Ok(())
}
