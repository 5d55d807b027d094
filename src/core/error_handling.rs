//! Generic error handling utilities
//!
//! Provides unified error logging that works across the configuration and
//! scanner error types while keeping their domain-specific messages.

use crate::core::logging::LogSink;

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// # Implementation Consistency
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)` with a helpful, actionable message. When it returns `false`,
/// `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if the user can fix this error (e.g. by editing the
    /// configuration file) rather than it being an environment/IO failure
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<String>;
}

/// Log a fatal error on `sink` with the detail appropriate to its kind
///
/// - User-actionable errors log their own message
/// - System errors log the operation context followed by the error detail
///
/// The debug representation always follows at debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    sink: &dyn LogSink,
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            sink.error(&format!("FATAL: {}", user_msg));
        }
        _ => {
            sink.error(&format!("FATAL: {}: {}", operation_context, error));
        }
    }
    sink.debug(&format!("DEBUG_DETAILS: {:?}", error));
}
