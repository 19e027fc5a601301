pub mod config;
pub mod error;
pub mod macros;
pub mod network;

// Re-exported so the status macros expand without requiring callers to
// depend on tracing themselves.
pub use tracing;
