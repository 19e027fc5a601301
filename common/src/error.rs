use thiserror::Error;

/// Input validation failures, rejected before any probing starts.
///
/// The `Display` texts double as the user-facing error reports, so the
/// wording here is a compatibility surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Invalid network range format")]
    InvalidRangeFormat { details: String },

    #[error("Invalid port format. Use: 80, 80-443, or 80,443,8080")]
    InvalidPortFormat,

    #[error("Port range too large (max 10,000 ports)")]
    PortSpaceTooLarge,

    #[error("Unable to resolve target '{target}'")]
    UnresolvableTarget { target: String },
}
