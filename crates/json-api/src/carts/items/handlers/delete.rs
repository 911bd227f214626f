//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use carts_app::domain::carts::models::{Cart, CartItem};

use crate::{
    carts::errors::{CART_ITEM_NOT_FOUND, into_api_error},
    extensions::*,
    responses::{ApiError, ResultResponse},
    state::State,
};

/// Delete Cart Item Handler
///
/// Removes an item from a cart and lowers the cart total by its quantity.
#[endpoint(tags("carts"), summary = "Delete Cart Item")]
#[tracing::instrument(
    name = "carts.items.delete",
    skip(cart, item, depot),
    fields(
        cart_uuid = tracing::field::Empty,
        item_uuid = tracing::field::Empty
    )
)]
pub(crate) async fn handler(
    cart: PathParam<String>,
    item: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ResultResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = cart.into_typed_uuid_or_404::<Cart>(CART_ITEM_NOT_FOUND)?;
    let item = item.into_typed_uuid_or_404::<CartItem>(CART_ITEM_NOT_FOUND)?;

    let span = tracing::Span::current();

    span.record("cart_uuid", tracing::field::display(cart));
    span.record("item_uuid", tracing::field::display(item));

    state
        .app
        .carts
        .remove_item(cart, item)
        .await
        .map_err(|error| into_api_error(error, CART_ITEM_NOT_FOUND))?;

    tracing::info!(cart_uuid = %cart, item_uuid = %item, "removed item from cart");

    Ok(Json(ResultResponse::success()))
}
