//! Delete Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use carts_app::domain::carts::models::CartUuid;

use crate::{
    carts::errors::{CART_NOT_FOUND, into_api_error},
    extensions::*,
    responses::{ApiError, ResultResponse},
    state::State,
};

/// Delete Cart Handler
///
/// Removes a cart and all of its items. Deleting an unknown cart succeeds,
/// including when the id is not a UUID and so cannot name any cart.
#[endpoint(tags("carts"), summary = "Delete Cart")]
#[tracing::instrument(
    name = "carts.delete",
    skip(cart, depot),
    fields(cart_uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    cart: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ResultResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Ok(cart) = cart.into_inner().parse::<CartUuid>() else {
        tracing::debug!("cart id is not a uuid, nothing to delete");

        return Ok(Json(ResultResponse::success()));
    };

    tracing::Span::current().record("cart_uuid", tracing::field::display(cart));

    state
        .app
        .carts
        .delete_cart(cart)
        .await
        .map_err(|error| into_api_error(error, CART_NOT_FOUND))?;

    tracing::info!(cart_uuid = %cart, "deleted cart");

    Ok(Json(ResultResponse::success()))
}
