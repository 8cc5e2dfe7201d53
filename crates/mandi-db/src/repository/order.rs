//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. PLACE                                                              │
//! │     └── create_with_items() → Order { status: Placed } + items         │
//! │         (order + every item inserted in ONE transaction)               │
//! │                                                                         │
//! │  2. STORE ACCEPTS                                                      │
//! │     └── update_status(Placed → Confirmed)                              │
//! │                                                                         │
//! │  3. HANDOVER                                                           │
//! │     └── update_status(Confirmed → Delivered)                           │
//! │                                                                         │
//! │  (ANY non-terminal state)                                              │
//! │     └── update_status(→ Cancelled)                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mandi_core::{Order, OrderItem, OrderStatus};

const ORDER_COLUMNS: &str = "id, tenant_id, order_number, status, customer_name, customer_phone, \
     delivery_address, subtotal_cents, total_cents, notes, created_at, updated_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order together with all its items in one transaction.
    ///
    /// ## Snapshot Pattern
    /// Item rows carry frozen copies of product data (name, localized
    /// name, unit, effective price). Later catalog edits never rewrite
    /// order history.
    ///
    /// ## Atomicity
    /// Either the order row AND every item land, or nothing does. A
    /// half-written order can never be observed.
    pub async fn create_with_items(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(id = %order.id, order_number = %order.order_number, items = items.len(), "Creating order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, tenant_id, order_number, status,
                customer_name, customer_phone, delivery_address,
                subtotal_cents, total_cents, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.id)
        .bind(&order.tenant_id)
        .bind(&order.order_number)
        .bind(order.status)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(&order.delivery_address)
        .bind(order.subtotal_cents)
        .bind(order.total_cents)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id,
                    name_snapshot, name_localized_snapshot,
                    unit_price_cents, quantity, unit_snapshot, line_total_cents,
                    created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.name_snapshot)
            .bind(&item.name_localized_snapshot)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(&item.unit_snapshot)
            .bind(item.line_total_cents)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Gets an order by ID within a tenant.
    pub async fn get_by_id(&self, tenant_id: &str, id: &str) -> DbResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ? AND tenant_id = ?");

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Gets all items for an order, oldest first.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, name_snapshot, name_localized_snapshot,
                   unit_price_cents, quantity, unit_snapshot, line_total_cents, created_at
            FROM order_items
            WHERE order_id = ?
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a tenant's orders, newest first.
    pub async fn list_for_tenant(&self, tenant_id: &str, limit: u32) -> DbResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE tenant_id = ? ORDER BY created_at DESC LIMIT ?"
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Moves an order from `current` to `next` status.
    ///
    /// The WHERE clause guards on the current status, so a concurrent
    /// transition loses cleanly instead of double-applying.
    ///
    /// ## Returns
    /// * `Ok(())` - Status updated
    /// * `Err(DbError::NotFound)` - Order missing or not in `current` status
    pub async fn update_status(
        &self,
        id: &str,
        current: OrderStatus,
        next: OrderStatus,
    ) -> DbResult<()> {
        debug!(id = %id, from = current.as_str(), to = next.as_str(), "Updating order status");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(next)
        .bind(now)
        .bind(id)
        .bind(current)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Counts a tenant's orders (for diagnostics).
    pub async fn count_for_tenant(&self, tenant_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE tenant_id = ?")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a human-readable order number.
///
/// Format: `ORD-YYYYMMDD-XXXXXX`. The date keeps receipts scannable, the
/// random suffix keeps two orders in the same instant distinct. The UNIQUE
/// constraint backstops the astronomically unlikely collision.
pub fn generate_order_number() -> String {
    let date_part = Utc::now().format("%Y%m%d");
    let suffix: String = Uuid::new_v4().simple().to_string()[..6].to_uppercase();

    format!("ORD-{}-{}", date_part, suffix)
}

/// Generates a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new order item ID.
pub fn generate_order_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use mandi_core::Tenant;

    async fn seeded_db() -> (Database, Tenant) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4().to_string(),
            slug: "green-basket".to_string(),
            name: "Green Basket".to_string(),
            name_localized: String::new(),
            logo_url: None,
            theme_color: None,
            currency_code: "SAR".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.tenants().insert(&tenant).await.unwrap();
        (db, tenant)
    }

    fn test_order(tenant_id: &str, number: &str) -> Order {
        let now = Utc::now();
        Order {
            id: generate_order_id(),
            tenant_id: tenant_id.to_string(),
            order_number: number.to_string(),
            status: OrderStatus::Placed,
            customer_name: "Amina".to_string(),
            customer_phone: "+966 50 123 4567".to_string(),
            delivery_address: Some("12 Palm Street".to_string()),
            subtotal_cents: 1030,
            total_cents: 1030,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_item(order_id: &str, product_id: &str, price: i64, qty: i64) -> OrderItem {
        OrderItem {
            id: generate_order_item_id(),
            order_id: order_id.to_string(),
            product_id: product_id.to_string(),
            name_snapshot: "Tomatoes".to_string(),
            name_localized_snapshot: "طماطم".to_string(),
            unit_price_cents: price,
            quantity: qty,
            unit_snapshot: "kg".to_string(),
            line_total_cents: price * qty,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_with_items_and_fetch() {
        let (db, tenant) = seeded_db().await;
        let order = test_order(&tenant.id, "ORD-20250101-0001");
        let items = vec![
            test_item(&order.id, "p-1", 450, 2),
            test_item(&order.id, "p-2", 130, 1),
        ];

        db.orders().create_with_items(&order, &items).await.unwrap();

        let fetched = db
            .orders()
            .get_by_id(&tenant.id, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, OrderStatus::Placed);
        assert_eq!(fetched.order_number, "ORD-20250101-0001");

        let fetched_items = db.orders().get_items(&order.id).await.unwrap();
        assert_eq!(fetched_items.len(), 2);
        assert_eq!(
            fetched_items.iter().map(|i| i.line_total_cents).sum::<i64>(),
            1030
        );
    }

    #[tokio::test]
    async fn test_status_transition_guard() {
        let (db, tenant) = seeded_db().await;
        let order = test_order(&tenant.id, "ORD-20250101-0002");
        db.orders().create_with_items(&order, &[]).await.unwrap();

        db.orders()
            .update_status(&order.id, OrderStatus::Placed, OrderStatus::Confirmed)
            .await
            .unwrap();

        // Re-applying the same transition misses its guard
        let err = db
            .orders()
            .update_status(&order.id, OrderStatus::Placed, OrderStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let fetched = db
            .orders()
            .get_by_id(&tenant.id, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_list_for_tenant_newest_first() {
        let (db, tenant) = seeded_db().await;
        for n in 1..=3 {
            let order = test_order(&tenant.id, &format!("ORD-20250101-100{n}"));
            db.orders().create_with_items(&order, &[]).await.unwrap();
        }

        let orders = db.orders().list_for_tenant(&tenant.id, 10).await.unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(db.orders().count_for_tenant(&tenant.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_order_number_rejected() {
        let (db, tenant) = seeded_db().await;
        let first = test_order(&tenant.id, "ORD-20250101-0042");
        let second = test_order(&tenant.id, "ORD-20250101-0042");

        db.orders().create_with_items(&first, &[]).await.unwrap();
        let err = db
            .orders()
            .create_with_items(&second, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[test]
    fn test_generate_order_number_format() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), "ORD-YYYYMMDD-XXXXXX".len());
        assert_ne!(number, generate_order_number());
    }
}
