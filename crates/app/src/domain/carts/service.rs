//! Carts service.

use std::slice;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::carts::{
        data::{NewCartItem, Page},
        errors::CartsServiceError,
        models::{Cart, CartItem, CartItemUuid, CartUuid},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    /// Fill in `items` for every cart with a single lookup.
    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carts: &mut [Cart],
    ) -> Result<(), sqlx::Error> {
        if carts.is_empty() {
            return Ok(());
        }

        let uuids: Vec<CartUuid> = carts.iter().map(|cart| cart.uuid).collect();

        let mut grouped: FxHashMap<CartUuid, Vec<CartItem>> = FxHashMap::default();

        for item in self.items_repository.get_cart_items(tx, &uuids).await? {
            grouped.entry(item.cart_uuid).or_default().push(item);
        }

        for cart in carts.iter_mut() {
            cart.items = grouped.remove(&cart.uuid).unwrap_or_default();
        }

        Ok(())
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CartUuid,
    ) -> Result<Cart, sqlx::Error> {
        let mut cart = self.carts_repository.get_cart(tx, uuid).await?;

        self.attach_items(tx, slice::from_mut(&mut cart)).await?;

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn list_carts(&self, page: Page) -> Result<Vec<Cart>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut carts = self.carts_repository.list_carts(&mut tx, page).await?;

        self.attach_items(&mut tx, &mut carts).await?;

        tx.commit().await?;

        Ok(carts)
    }

    async fn get_cart(&self, uuid: CartUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.load_cart(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn create_cart(&self) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .carts_repository
            .create_cart(&mut tx, CartUuid::new())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn add_item(&self, cart: CartUuid, item: NewCartItem) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Fails with RowNotFound before anything is written.
        self.carts_repository.get_cart(&mut tx, cart).await?;

        self.items_repository
            .upsert_cart_item(&mut tx, cart, CartItemUuid::new(), &item)
            .await?;

        self.carts_repository
            .adjust_total(&mut tx, cart, item.quantity)
            .await?;

        let updated = self.load_cart(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_cart(&self, uuid: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items_deleted = self.items_repository.delete_cart_items(&mut tx, uuid).await?;
        let carts_deleted = self.carts_repository.delete_cart(&mut tx, uuid).await?;

        tx.commit().await?;

        debug!(cart_uuid = %uuid, items_deleted, carts_deleted, "cart deleted");

        Ok(())
    }

    async fn remove_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Fails with RowNotFound when the item is not in this cart.
        let removed = self
            .items_repository
            .delete_cart_item(&mut tx, cart, item)
            .await?;

        self.carts_repository
            .adjust_total(&mut tx, cart, -removed)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a page of carts, each with its items.
    ///
    /// An empty page is not an error.
    async fn list_carts(&self, page: Page) -> Result<Vec<Cart>, CartsServiceError>;

    /// Retrieve a single cart with its items.
    async fn get_cart(&self, uuid: CartUuid) -> Result<Cart, CartsServiceError>;

    /// Create an empty cart with a freshly generated UUID.
    async fn create_cart(&self) -> Result<Cart, CartsServiceError>;

    /// Add `item` to the cart, merging it into an existing line with the same
    /// SKU, and return the updated cart.
    async fn add_item(&self, cart: CartUuid, item: NewCartItem) -> Result<Cart, CartsServiceError>;

    /// Delete a cart and all of its items. Deleting a missing cart succeeds.
    async fn delete_cart(&self, uuid: CartUuid) -> Result<(), CartsServiceError>;

    /// Remove a single item from the cart, reducing the cart total by its quantity.
    async fn remove_item(&self, cart: CartUuid, item: CartItemUuid)
    -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sqlx::{PgPool, query, query_scalar};
    use testresult::TestResult;
    use tokio::time::sleep;

    use crate::test::{
        TestContext,
        helpers::{add_item, create_cart},
    };

    use super::*;

    #[tokio::test]
    async fn create_cart_starts_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx.carts.create_cart().await?;

        assert_eq!(cart.total, 0);
        assert!(cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_returns_created_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let created = create_cart(&ctx).await?;
        let cart = ctx.carts.get_cart(created.uuid).await?;

        assert_eq!(cart.uuid, created.uuid);
        assert_eq!(cart.total, 0);
        assert_eq!(cart.items.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.get_cart(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn adding_distinct_skus_sums_quantities_into_total() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = create_cart(&ctx).await?;

        add_item(&ctx, cart.uuid, "A", "Apple", 2).await?;
        add_item(&ctx, cart.uuid, "B", "Banana", 7).await?;
        let updated = add_item(&ctx, cart.uuid, "C", "Cherry", 4).await?;

        assert_eq!(updated.total, 13);
        assert_eq!(updated.items.len(), 3);

        let mut skus: Vec<&str> = updated.items.iter().map(|item| item.sku.as_str()).collect();
        skus.sort_unstable();

        assert_eq!(skus, ["A", "B", "C"]);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_sku_twice_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = create_cart(&ctx).await?;

        let first = add_item(&ctx, cart.uuid, "A", "Apple", 2).await?;
        add_item(&ctx, cart.uuid, "A", "Apple", 3).await?;

        let cart = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(cart.total, 5);
        assert_eq!(cart.items.len(), 1, "expected a single row for the SKU");

        let item = cart.items.first().ok_or("missing cart item")?;

        assert_eq!(item.quantity, 5);
        assert_eq!(item.sku, "A");
        assert_eq!(
            first.items.first().map(|original| original.uuid),
            Some(item.uuid),
            "the original row must be kept"
        );

        Ok(())
    }

    #[tokio::test]
    async fn adding_item_to_unknown_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = add_item(&ctx, CartUuid::new(), "A", "Apple", 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn removing_item_reduces_total_by_its_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = create_cart(&ctx).await?;

        add_item(&ctx, cart.uuid, "A", "Apple", 2).await?;
        let cart = add_item(&ctx, cart.uuid, "B", "Banana", 5).await?;

        let banana = cart
            .items
            .iter()
            .find(|item| item.sku == "B")
            .ok_or("missing banana")?;

        ctx.carts.remove_item(cart.uuid, banana.uuid).await?;

        let cart = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(cart.total, 2);
        assert_eq!(cart.items.len(), 1);
        assert!(cart.items.iter().all(|item| item.sku == "A"));

        Ok(())
    }

    #[tokio::test]
    async fn removing_unknown_item_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = create_cart(&ctx).await?;

        let result = ctx.carts.remove_item(cart.uuid, CartItemUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn removing_item_through_another_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_cart(&ctx).await?;
        let other = create_cart(&ctx).await?;

        let owner = add_item(&ctx, owner.uuid, "A", "Apple", 3).await?;
        let item = owner.items.first().ok_or("missing cart item")?;

        let result = ctx.carts.remove_item(other.uuid, item.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let owner = ctx.carts.get_cart(owner.uuid).await?;

        assert_eq!(owner.total, 3, "owner cart must be untouched");

        Ok(())
    }

    #[tokio::test]
    async fn delete_cart_removes_cart_and_items() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = create_cart(&ctx).await?;

        add_item(&ctx, cart.uuid, "A", "Apple", 1).await?;
        add_item(&ctx, cart.uuid, "B", "Banana", 1).await?;

        ctx.carts.delete_cart(cart.uuid).await?;

        let result = ctx.carts.get_cart(cart.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let remaining: i64 = query_scalar("SELECT COUNT(*) FROM cart_items WHERE cart_id = $1")
            .bind(cart.uuid.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 0);

        Ok(())
    }

    #[tokio::test]
    async fn delete_cart_unknown_uuid_succeeds() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.carts.delete_cart(CartUuid::new()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn list_carts_includes_items() -> TestResult {
        let ctx = TestContext::new().await;
        let first = create_cart(&ctx).await?;
        let second = create_cart(&ctx).await?;

        add_item(&ctx, first.uuid, "A", "Apple", 2).await?;

        let carts = ctx.carts.list_carts(Page::default()).await?;

        assert_eq!(carts.len(), 2);

        let first = carts
            .iter()
            .find(|cart| cart.uuid == first.uuid)
            .ok_or("missing first cart")?;
        let second = carts
            .iter()
            .find(|cart| cart.uuid == second.uuid)
            .ok_or("missing second cart")?;

        assert_eq!(first.total, 2);
        assert_eq!(first.items.len(), 1);
        assert_eq!(second.total, 0);
        assert!(second.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_carts_respects_limit_and_offset() -> TestResult {
        let ctx = TestContext::new().await;

        for _ in 0..3 {
            create_cart(&ctx).await?;
        }

        let first_page = ctx.carts.list_carts(Page::new(2, 0)).await?;
        let second_page = ctx.carts.list_carts(Page::new(2, 2)).await?;
        let past_end = ctx.carts.list_carts(Page::new(2, 3)).await?;

        assert_eq!(first_page.len(), 2);
        assert_eq!(second_page.len(), 1);
        assert!(past_end.is_empty());
        assert!(
            first_page
                .iter()
                .all(|cart| second_page.iter().all(|other| other.uuid != cart.uuid)),
            "pages must not overlap"
        );

        Ok(())
    }

    /// Poll until at least `expected` sessions in the test database are
    /// blocked on a lock.
    async fn wait_for_lock_waiters(pool: &PgPool, expected: i64) -> TestResult {
        for _ in 0..500 {
            let waiting: i64 = query_scalar(
                "SELECT COUNT(*) FROM pg_stat_activity \
                 WHERE datname = current_database() AND wait_event_type = 'Lock'",
            )
            .fetch_one(pool)
            .await?;

            if waiting >= expected {
                return Ok(());
            }

            sleep(Duration::from_millis(10)).await;
        }

        Err(format!("timed out waiting for {expected} blocked sessions").into())
    }

    #[tokio::test]
    async fn removing_item_during_concurrent_increment_keeps_total_in_sync() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = create_cart(&ctx).await?;
        let cart = add_item(&ctx, cart.uuid, "A", "Apple", 2).await?;
        let item = cart.items.first().ok_or("missing cart item")?.uuid;

        // Hold the cart row so the increment stalls between its upsert and its
        // total update.
        let mut locker = ctx.db.pool().begin().await?;

        query("SELECT id FROM carts WHERE id = $1 FOR UPDATE")
            .bind(cart.uuid.into_uuid())
            .execute(&mut *locker)
            .await?;

        let carts = ctx.carts.clone();
        let adding = tokio::spawn(async move {
            carts
                .add_item(
                    cart.uuid,
                    NewCartItem {
                        sku: "A".to_owned(),
                        product_name: "Apple".to_owned(),
                        quantity: 3,
                    },
                )
                .await
        });

        wait_for_lock_waiters(ctx.db.pool(), 1).await?;

        let carts = ctx.carts.clone();
        let removing = tokio::spawn(async move { carts.remove_item(cart.uuid, item).await });

        wait_for_lock_waiters(ctx.db.pool(), 2).await?;

        locker.commit().await?;

        let added = adding.await??;
        removing.await??;

        assert_eq!(added.total, 5);

        let cart = ctx.carts.get_cart(cart.uuid).await?;
        let item_sum: i64 = cart.items.iter().map(|item| item.quantity).sum();

        assert!(cart.items.is_empty(), "the incremented row must be removed");
        assert_eq!(cart.total, item_sum, "total must equal the item quantities");
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_keys_surface_as_storage_errors() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = create_cart(&ctx).await?;

        let error = query("INSERT INTO carts (id) VALUES ($1)")
            .bind(cart.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await
            .err()
            .ok_or("expected a unique violation")?;

        let error = CartsServiceError::from(error);

        assert!(
            matches!(error, CartsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );

        Ok(())
    }
}
