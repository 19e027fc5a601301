use std::time::Instant;

use sondr_common::success;
use sondr_core::scanner;

use crate::commands::CommandLine;
use crate::terminal::{print, spinner};

pub async fn run(
    target: &str,
    ports: &str,
    timeout: u64,
    command_line: &CommandLine,
) -> anyhow::Result<()> {
    let cfg = command_line.scan_config(timeout);

    let progress = spinner::start(format!("Scanning {target} ({ports})..."));
    let started = Instant::now();

    let report = scanner::scan_ports(target, ports, &cfg).await;

    progress.finish_and_clear();
    println!("{report}");

    if !cfg.quiet {
        print::fat_separator();
        print::summary_line(&format!(
            "Port scan finished in {:.2}s",
            started.elapsed().as_secs_f64()
        ));
    }
    success!("done");
    Ok(())
}
