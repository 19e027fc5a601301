/// Status logging for user-visible milestones.
///
/// Routed through `tracing` at info level so the CLI formatter can
/// decorate it with the `[+]` symbol. Expands via the crate's `tracing`
/// re-export, so callers need no tracing dependency of their own.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

/// Non-fatal degradation, rendered as `[*]` by the CLI formatter.
#[macro_export]
macro_rules! degrade {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
