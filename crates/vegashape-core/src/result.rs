//! Result type alias for shape-check operations

use crate::error::ShapeError;

/// Standard Result type for shape-check operations
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Log the error and continue with None if recoverable
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                    None
                } else {
                    tracing::error!("Fatal error: {}", err);
                    None
                }
            }
        }
    }
}
