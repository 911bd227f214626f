//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carts_app::domain::carts::models::{Cart, CartItem};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub id: Uuid,

    /// Total quantity across all items
    pub total: i64,

    /// Items in the cart
    pub items: Vec<CartItemResponse>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.uuid.into_uuid(),
            total: cart.total,
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub id: Uuid,

    /// The cart the item belongs to
    pub cart_id: Uuid,

    /// The stock keeping unit of the item
    pub sku: String,

    /// The product name recorded for the item
    pub product_name: String,

    /// The number of units in the cart
    pub quantity: i64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            cart_id: item.cart_uuid.into_uuid(),
            sku: item.sku,
            product_name: item.product_name,
            quantity: item.quantity,
        }
    }
}

/// Single cart envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    /// The requested cart
    pub cart: CartResponse,
}

/// Cart listing envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsEnvelope {
    /// The carts in the requested page
    pub carts: Vec<CartResponse>,
}
