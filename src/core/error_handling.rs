//! Generic error handling utilities
//!
//! Distinguishes configuration mistakes a caller can fix from host/system
//! failures, so the binary can report each with the right level of detail.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` returns
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True when the error carries a message the user can act on directly
    /// (bad container id, malformed config file, invalid data layer name).
    fn is_user_actionable(&self) -> bool;

    /// The specific user message for user-actionable errors
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; everything else logs the
/// operation context. Full detail always goes to debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(user_msg) => log::error!("FATAL: {}", user_msg),
        None => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::GtmError;

    #[test]
    fn test_config_error_is_user_actionable() {
        let error = GtmError::config("container id must not be empty");

        assert!(error.is_user_actionable());
        assert_eq!(error.user_message(), Some("container id must not be empty"));
    }

    #[test]
    fn test_host_error_uses_generic_context() {
        let error = GtmError::Host {
            message: "window is unavailable".to_string(),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
        // Should not panic without a logger installed
        log_error_with_context(&error, "Initialising client");
    }
}
