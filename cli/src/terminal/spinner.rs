use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Starts a steady-tick spinner shown while a scan call is awaited.
///
/// The spinner owns a background tick thread, so the caller just awaits
/// the scan and clears the spinner afterwards.
pub fn start(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .expect("spinner template is static")
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
