//! Exception-handler table.
//!
//! Handlers are registered in fixed precedence order at setup time:
//! validation handler, typed-HTTP-error handler, catch-all. Dispatch scans
//! the table in registration order and the first matching entry wins, so a
//! handler registered for a specific class always takes priority over the
//! catch-all.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use keel_types::AppError;

/// Boxed handler turning a classified error into a response.
pub type ExceptionHandler = Box<dyn Fn(&AppError) -> Response + Send + Sync>;

/// Error class an exception handler is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Matches request-validation failures only.
    Validation,
    /// Matches typed errors carrying a status code only.
    Http,
    /// Matches every error; the backstop.
    Any,
}

impl ErrorClass {
    /// Whether this class matches the given error.
    pub fn matches(&self, err: &AppError) -> bool {
        match self {
            ErrorClass::Validation => matches!(err, AppError::Validation(_)),
            ErrorClass::Http => matches!(err, AppError::Http { .. }),
            ErrorClass::Any => true,
        }
    }
}

/// Ordered table of exception handlers.
#[derive(Default)]
pub struct ExceptionTable {
    entries: Vec<(ErrorClass, ExceptionHandler)>,
}

impl ExceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for the given class.
    ///
    /// Replacing the handler of an already-registered class keeps its
    /// position in the table, so precedence is stable under overrides.
    pub fn insert(&mut self, class: ErrorClass, handler: ExceptionHandler) {
        match self.entries.iter_mut().find(|(c, _)| *c == class) {
            Some((_, existing)) => *existing = handler,
            None => self.entries.push((class, handler)),
        }
    }

    /// Dispatches the error to the first matching handler.
    ///
    /// Falls back to a generic server error if nothing matches; the
    /// catch-all registered at setup makes that unreachable in practice.
    pub fn dispatch(&self, err: &AppError) -> Response {
        match self.entries.iter().find(|(class, _)| class.matches(err)) {
            Some((_, handler)) => handler(err),
            None => {
                tracing::error!("no exception handler matched: {err}");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the default table: validation, typed HTTP, catch-all, in that
    /// precedence order.
    pub fn with_defaults(debug: bool) -> Self {
        let mut table = Self::new();
        table.insert(ErrorClass::Validation, Box::new(validation_response));
        table.insert(ErrorClass::Http, Box::new(http_error_response));
        table.insert(
            ErrorClass::Any,
            Box::new(move |err| catch_all_response(err, debug)),
        );
        table
    }
}

/// JSON error body in the `{"error": ..., "code": ...}` shape.
fn error_body(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": message,
        "code": status.as_u16()
    });
    (status, Json(body)).into_response()
}

/// Default handler for validation failures.
pub(crate) fn validation_response(err: &AppError) -> Response {
    error_body(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
}

/// Default handler for typed HTTP errors; echoes the intended status code.
pub(crate) fn http_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_body(status, &err.to_string())
}

/// Default catch-all handler. Logs the error and reports a generic server
/// error; the message is only included in debug mode.
pub(crate) fn catch_all_response(err: &AppError, debug: bool) -> Response {
    tracing::error!("unhandled application error: {err}");
    let message = if debug {
        err.to_string()
    } else {
        "Internal Server Error".to_string()
    };
    error_body(StatusCode::INTERNAL_SERVER_ERROR, &message)
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
///
/// Uses the default handler behavior for each class; handlers returning
/// `Result<_, ApiError>` get the same responses as table dispatch with the
/// default table.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            AppError::Validation(_) => validation_response(&self.0),
            AppError::Http { .. } => http_error_response(&self.0),
            AppError::Internal(_) => catch_all_response(&self.0, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_beats_catch_all() {
        let table = ExceptionTable::with_defaults(false);
        let response = table.dispatch(&AppError::Validation("name required".into()));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_http_error_echoes_status() {
        let table = ExceptionTable::with_defaults(false);
        let response = table.dispatch(&AppError::http(404, "not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_catch_all_backstop() {
        let table = ExceptionTable::with_defaults(false);
        let response = table.dispatch(&AppError::internal("db exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_override_keeps_precedence() {
        let mut table = ExceptionTable::with_defaults(false);
        table.insert(
            ErrorClass::Any,
            Box::new(|_| StatusCode::IM_A_TEAPOT.into_response()),
        );
        assert_eq!(table.len(), 3);

        // Validation errors still hit the more specific handler.
        let response = table.dispatch(&AppError::Validation("bad".into()));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Internal errors reach the replaced catch-all.
        let response = table.dispatch(&AppError::internal("boom"));
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[test]
    fn test_invalid_status_falls_back_to_500() {
        let table = ExceptionTable::with_defaults(false);
        let response = table.dispatch(&AppError::http(99, "bogus"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
