//! Error types for page behavior installation.
//!
//! All errors are explicit and typed. Absent optional markup is not an error;
//! only failures of the host environment or a strict-mode missing element end
//! up here.

use thiserror::Error;

/// Errors raised while wiring behaviors to the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    /// A required element was not found and strict mode is on
    #[error("required element not found: {selector}")]
    MissingElement { selector: String },

    /// The host refused an event listener registration
    #[error("failed to attach '{event}' listener: {reason}")]
    ListenerFailed { event: String, reason: String },

    /// Intersection observer could not be created or refused an element
    #[error("intersection observer failed: {0}")]
    ObserverFailed(String),

    /// Deferred callback could not be scheduled
    #[error("failed to schedule timer: {0}")]
    SchedulerFailed(String),

    /// Configuration rejected by validation or parsing
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Window, document or body is missing
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),
}

impl BehaviorError {
    /// Create a missing element error.
    pub fn missing_element(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }

    /// Create a listener registration error.
    pub fn listener_failed(event: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ListenerFailed {
            event: event.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for behavior operations
pub type Result<T> = std::result::Result<T, BehaviorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BehaviorError::missing_element(".navbar");
        assert_eq!(error.to_string(), "required element not found: .navbar");

        let error = BehaviorError::listener_failed("scroll", "detached window");
        assert_eq!(
            error.to_string(),
            "failed to attach 'scroll' listener: detached window"
        );

        let error = BehaviorError::SchedulerFailed("no window".to_string());
        assert_eq!(error.to_string(), "failed to schedule timer: no window");
    }

    #[test]
    fn test_error_clone() {
        let error = BehaviorError::InvalidConfig("tilt divisor is zero".to_string());
        assert_eq!(error.clone(), error);
    }
}
