//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::carts::{
    data::NewCartItem,
    models::{CartItem, CartItemUuid, CartUuid},
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Items belonging to any of `carts`, grouped by cart.
    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carts: &[CartUuid],
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        let carts: Vec<Uuid> = carts.iter().copied().map(CartUuid::into_uuid).collect();

        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(carts)
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert `item`, or add its quantity to the row already holding its SKU.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        uuid: CartItemUuid,
        item: &NewCartItem,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPSERT_CART_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(&item.sku)
            .bind(&item.product_name)
            .bind(item.quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete one item of `cart` and return the quantity the deleted row held.
    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("id")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_id")?),
            sku: row.try_get("sku")?,
            product_name: row.try_get("product_name")?,
            quantity: row.try_get("quantity")?,
        })
    }
}
