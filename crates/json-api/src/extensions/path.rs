//! Identifier path segments.

use salvo::oapi::extract::PathParam;

use carts_app::TypedUuid;

use crate::responses::ApiError;

pub(crate) trait PathUuidExt {
    /// Parse the segment as a UUID. A segment that is not a UUID cannot name
    /// any stored row, so it is reported as not found.
    fn into_typed_uuid_or_404<T>(self, not_found: &str) -> Result<TypedUuid<T>, ApiError>;
}

impl PathUuidExt for PathParam<String> {
    fn into_typed_uuid_or_404<T>(self, not_found: &str) -> Result<TypedUuid<T>, ApiError> {
        self.into_inner()
            .parse()
            .map_err(|_ignored: uuid::Error| ApiError::not_found(not_found))
    }
}
