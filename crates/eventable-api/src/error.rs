//! Uniform error taxonomy for API calls.

use thiserror::Error;

/// Failure of an API operation.
///
/// Every variant is scoped to the single call that produced it; nothing
/// here is fatal and nothing is retried automatically. `PermissionDenied`
/// is kept distinct from transport failures so callers can render a stable
/// "not authorized" message instead of "try again".
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before or by the server for malformed input.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The server (or the local evaluator) refused the action.
    #[error("not authorized: {0}")]
    PermissionDenied(String),
    /// Stale or deleted entity; callers should refetch the owning list.
    #[error("not found: {0}")]
    NotFound(String),
    /// Domain conflict, surfaced verbatim (already a member, event full, ...).
    #[error("{0}")]
    Conflict(String),
    /// Network unreachable or request failed to complete.
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map an HTTP status to the taxonomy. `message` is the server's
    /// user-displayable explanation when one was present.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => ApiError::Validation(message),
            401 | 403 => ApiError::PermissionDenied(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Transport(format!("server returned {status}: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(400, "bad"),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(401, "no"),
            ApiError::PermissionDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(403, "no"),
            ApiError::PermissionDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(404, "gone"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(409, "full"),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(500, "boom"),
            ApiError::Transport(_)
        ));
    }

    #[test]
    fn test_conflict_displays_verbatim() {
        let err = ApiError::Conflict("Event is full".to_string());
        assert_eq!(err.to_string(), "Event is full");
    }
}
