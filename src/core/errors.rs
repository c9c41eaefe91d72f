/*!
 * Error Types
 * Shared lock error handling with thiserror and miette
 *
 * The four core operations (`lock_a`, `unlock_a`, `lock_b`, `unlock_b`) have no
 * error channel. Errors only surface from the opt-in paths: interruptible
 * acquisition, checked release, and configuration loading.
 */

use crate::core::sync::shared::Side;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for shared lock operations that can fail
pub type LockResult<T> = Result<T, SharedLockError>;

/// Shared lock errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SharedLockError {
    #[error("Acquisition of side {side} was interrupted")]
    #[diagnostic(
        code(shared_lock::interrupted),
        help("The interrupt token was set while waiting. The lock was not granted.")
    )]
    Interrupted { side: Side },

    #[error("Release of side {side} without a matching acquisition (counter = {counter})")]
    #[diagnostic(
        code(shared_lock::not_held),
        help("Every unlock must be paired with a prior successful lock of the same side.")
    )]
    NotHeld { side: Side, counter: i64 },

    #[error("Invalid lock configuration: {0}")]
    #[diagnostic(
        code(shared_lock::invalid_config),
        help("Check SHARED_LOCK_* environment variables or the JSON config.")
    )]
    InvalidConfig(String),
}

impl SharedLockError {
    /// Side involved in the failure, if any
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Interrupted { side } | Self::NotHeld { side, .. } => Some(*side),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<serde_json::Error> for SharedLockError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
