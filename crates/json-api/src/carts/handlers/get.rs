//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use carts_app::domain::carts::models::Cart;

use crate::{
    carts::{
        errors::{CART_NOT_FOUND, into_api_error},
        models::CartEnvelope,
    },
    extensions::*,
    responses::ApiError,
    state::State,
};

/// Get Cart Handler
///
/// Returns a cart and its items.
#[endpoint(tags("carts"), summary = "Get Cart")]
pub(crate) async fn handler(
    cart: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = cart.into_typed_uuid_or_404::<Cart>(CART_NOT_FOUND)?;

    let cart = state
        .app
        .carts
        .get_cart(cart)
        .await
        .map_err(|error| into_api_error(error, CART_NOT_FOUND))?;

    Ok(Json(CartEnvelope { cart: cart.into() }))
}
