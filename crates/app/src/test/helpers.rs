//! Test Helpers

use crate::{
    domain::carts::{
        CartsService, CartsServiceError,
        data::NewCartItem,
        models::{Cart, CartUuid},
    },
    test::TestContext,
};

pub(crate) async fn create_cart(ctx: &TestContext) -> Result<Cart, CartsServiceError> {
    ctx.carts.create_cart().await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    cart: CartUuid,
    sku: &str,
    product_name: &str,
    quantity: i64,
) -> Result<Cart, CartsServiceError> {
    ctx.carts
        .add_item(
            cart,
            NewCartItem {
                sku: sku.to_owned(),
                product_name: product_name.to_owned(),
                quantity,
            },
        )
        .await
}
