//! List Carts Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use carts_app::domain::carts::data::Page;

use crate::{
    carts::{
        errors::{CART_NOT_FOUND, into_api_error},
        models::CartsEnvelope,
    },
    extensions::*,
    responses::ApiError,
    state::State,
};

/// List Carts Handler
///
/// Returns a page of carts ordered by id. A non-positive or malformed `limit`
/// falls back to 10 and a negative or malformed `offset` to 0. A page with no
/// carts is reported as not found.
#[endpoint(tags("carts"), summary = "List Carts")]
pub(crate) async fn handler(
    limit: QueryParam<String, false>,
    offset: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartsEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = Page::new(limit.into_i64_or_zero(), offset.into_i64_or_zero());

    let carts = state
        .app
        .carts
        .list_carts(page)
        .await
        .map_err(|error| into_api_error(error, CART_NOT_FOUND))?;

    if carts.is_empty() {
        return Err(ApiError::not_found(CART_NOT_FOUND));
    }

    Ok(Json(CartsEnvelope {
        carts: carts.into_iter().map(Into::into).collect(),
    }))
}
