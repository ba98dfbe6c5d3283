use std::process::{ExitCode, Termination};

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use serde_json::json;

use kernel::prelude::validation::Violations;
use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

// Unreadable bodies are reported like any other invalid payload.
impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        let violations = Violations::new(vec![rejection.body_text()]);
        ErrorStatus(Report::new(KernelError::Validation(violations)).attach_printable(rejection))
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let context = self.0.current_context();
        match context {
            KernelError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, Json(json!({ "errors": context.to_string() })))
                    .into_response()
            }
            KernelError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": violations.as_ref() })),
            )
                .into_response(),
            KernelError::InsufficientStock { .. } | KernelError::InvalidAmount { .. } => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": context.to_string() })))
                    .into_response()
            }
            KernelError::Concurrency => StatusCode::CONFLICT.into_response(),
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT.into_response(),
            KernelError::Internal => {
                tracing::error!("{:?}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use rstest::rstest;

    use kernel::KernelError;

    use crate::error::ErrorStatus;

    #[rstest]
    #[case(KernelError::InvalidAmount { requested: 0 }, StatusCode::BAD_REQUEST)]
    #[case(KernelError::InsufficientStock { id: 1, requested: 2 }, StatusCode::BAD_REQUEST)]
    #[case(KernelError::Concurrency, StatusCode::CONFLICT)]
    #[case(KernelError::Timeout, StatusCode::REQUEST_TIMEOUT)]
    #[case(KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_follows_the_error_kind(#[case] error: KernelError, #[case] status: StatusCode) {
        let response = ErrorStatus::from(Report::new(error)).into_response();
        assert_eq!(response.status(), status);
    }
}
