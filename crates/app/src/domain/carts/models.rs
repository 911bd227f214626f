//! Cart Models

use crate::uuids::TypedUuid;

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// Primary key.
    pub uuid: CartUuid,

    /// Sum of `quantity` across the cart's items.
    pub total: i64,

    /// Items ordered by SKU.
    pub items: Vec<CartItem>,
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Primary key.
    pub uuid: CartItemUuid,

    /// Owning cart.
    pub cart_uuid: CartUuid,

    /// Stock keeping unit, unique within a cart.
    pub sku: String,

    /// Name recorded when the SKU was first added.
    pub product_name: String,

    /// Units of this SKU in the cart.
    pub quantity: i64,
}
