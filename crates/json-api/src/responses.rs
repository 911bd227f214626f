//! JSON response envelopes.
//!
//! Successful responses are serialized as-is or wrapped under a noun key by
//! the handler; failures always render as `{"error": "<message>"}`.

use salvo::{
    oapi::{Components, Content, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Error envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// What went wrong
    pub error: String,
}

/// Result envelope for operations with nothing else to return.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ResultResponse {
    /// Always `"success"`
    pub result: String,
}

impl ResultResponse {
    pub(crate) fn success() -> Self {
        Self {
            result: "success".to_owned(),
        }
    }
}

/// Write `payload` as a JSON body with the given status.
pub(crate) fn respond_with_json<T>(res: &mut Response, status: StatusCode, payload: T)
where
    T: Serialize + Send,
{
    res.status_code(status);
    res.render(Json(payload));
}

/// Log `message` and write it as an error envelope with the given status.
pub(crate) fn respond_with_error(res: &mut Response, status: StatusCode, message: &str) {
    if status.is_server_error() {
        error!(status = status.as_u16(), "{message}");
    } else {
        warn!(status = status.as_u16(), "{message}");
    }

    respond_with_json(
        res,
        status,
        ErrorResponse {
            error: message.to_owned(),
        },
    );
}

/// A failed request, rendered through [`respond_with_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        respond_with_error(res, self.status, &self.message);
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                salvo::oapi::Response::new(description).add_content(
                    "application/json",
                    Content::new(ErrorResponse::to_schema(components)),
                ),
            );
        }
    }
}
