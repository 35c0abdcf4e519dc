//! Error types for the blackout core.
//!
//! Destroying an overlay that is already gone is not an error anywhere in
//! this crate: teardown swallows those failures and only logs them.

use thiserror::Error;

/// Errors surfaced by monitor enumeration, selection, and overlay creation.
#[derive(Error, Debug)]
pub enum BlackoutError {
    /// The OS display query failed. Nothing can be shown without a monitor list.
    #[error("Failed to enumerate monitors: {0}")]
    Enumeration(String),

    /// A selection index outside the current monitor list.
    ///
    /// Valid menu input never produces this; it indicates a caller bug.
    #[error("Monitor index {index} out of range (have {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries in the selection.
        len: usize,
    },

    /// The OS refused to create an overlay for a monitor.
    ///
    /// Any overlays already created for the same activation are rolled back
    /// before this is returned.
    #[error("Failed to create overlay for monitor {}: {reason}", .monitor + 1)]
    WindowCreation {
        /// Zero-based index of the monitor whose overlay failed.
        monitor: usize,
        /// OS-provided failure description.
        reason: String,
    },

    /// The OS refused to destroy an overlay. Teardown logs and ignores this.
    #[error("Failed to destroy overlay: {0}")]
    WindowDestroy(String),

    /// Registering the overlay window class failed.
    #[error("Failed to register overlay window class: {0}")]
    ClassRegistration(String),
}

/// Convenience Result alias for blackout operations.
pub type Result<T> = std::result::Result<T, BlackoutError>;
