//! Result type alias for guidance operations.

use super::context::ErrorContext;
use super::guru_error::GuruError;

/// Type alias for Results using GuruError.
pub type GuruResult<T> = Result<T, GuruError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> GuruResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> GuruResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<GuruError>,
{
    fn context(self, ctx: ErrorContext) -> GuruResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> GuruResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
