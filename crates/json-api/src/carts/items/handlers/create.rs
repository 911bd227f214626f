//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use carts_app::domain::carts::{data::NewCartItem, models::Cart};

use crate::{
    carts::{
        errors::{CART_NOT_FOUND, into_api_error},
        models::CartResponse,
    },
    extensions::*,
    responses::ApiError,
    state::State,
};

const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Add Cart Item Request
///
/// Absent fields take their zero value; only malformed JSON or a wrongly typed
/// field is rejected.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct AddCartItemRequest {
    /// Stock keeping unit; lines in a cart are merged by SKU
    pub sku: String,

    /// Display name stored with the line
    pub product_name: String,

    /// Units to add to the cart
    pub quantity: i64,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            sku: request.sku,
            product_name: request.product_name,
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
///
/// Adds `quantity` of `sku` to the cart, merging with an existing line for the
/// same SKU, and returns the updated cart.
#[endpoint(tags("carts"), summary = "Add Item to Cart")]
#[tracing::instrument(
    name = "carts.items.create",
    skip(cart, req, depot),
    fields(cart_uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    cart: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = cart.into_typed_uuid_or_404::<Cart>(CART_NOT_FOUND)?;

    tracing::Span::current().record("cart_uuid", tracing::field::display(cart));

    let request = req
        .parse_json::<AddCartItemRequest>()
        .await
        .map_err(|_ignored| ApiError::bad_request(INVALID_PAYLOAD))?;

    let sku = request.sku.clone();

    let cart = state
        .app
        .carts
        .add_item(cart, request.into())
        .await
        .map_err(|error| into_api_error(error, CART_NOT_FOUND))?;

    tracing::info!(cart_uuid = %cart.uuid, sku = %sku, total = cart.total, "added item to cart");

    Ok(Json(cart.into()))
}
