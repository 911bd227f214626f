//! Carts Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::carts::{
    data::Page,
    models::{Cart, CartUuid},
};

const LIST_CARTS_SQL: &str = include_str!("../sql/list_carts.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const ADJUST_CART_TOTAL_SQL: &str = include_str!("../sql/adjust_cart_total.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<Vec<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(LIST_CARTS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(CREATE_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Add `delta` (which may be negative) to the cart's running total.
    pub(crate) async fn adjust_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        delta: i64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ADJUST_CART_TOTAL_SQL)
            .bind(cart.into_uuid())
            .bind(delta)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("id")?),
            total: row.try_get("total")?,
            items: Vec::new(),
        })
    }
}
