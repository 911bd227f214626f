//! Create Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{
        errors::{CART_NOT_FOUND, into_api_error},
        models::CartResponse,
    },
    extensions::*,
    responses::ApiError,
    state::State,
};

/// Create Cart Handler
///
/// Creates an empty cart and returns it.
#[endpoint(
    tags("carts"),
    summary = "Create Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created"),
    ),
)]
#[tracing::instrument(name = "carts.create", skip_all)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .create_cart()
        .await
        .map_err(|error| into_api_error(error, CART_NOT_FOUND))?;

    tracing::info!(cart_uuid = %cart.uuid, "created cart");

    res.status_code(StatusCode::CREATED);

    Ok(Json(cart.into()))
}
