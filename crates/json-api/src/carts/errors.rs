//! Errors

use carts_app::domain::carts::CartsServiceError;

use crate::responses::ApiError;

pub(crate) const CART_NOT_FOUND: &str = "Cart not found";
pub(crate) const CART_ITEM_NOT_FOUND: &str = "Cart item not found";

/// Map a service failure to an HTTP error, using `not_found` as the message
/// when the addressed row does not exist.
pub(crate) fn into_api_error(error: CartsServiceError, not_found: &str) -> ApiError {
    match &error {
        CartsServiceError::NotFound | CartsServiceError::InvalidReference => {
            ApiError::not_found(not_found)
        }
        CartsServiceError::Sql(_) => ApiError::internal(error.to_string()),
    }
}
