//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Full-text search using FTS5
//! - CRUD operations, tenant-scoped
//!
//! ## FTS5 Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How FTS5 Search Works                                │
//! │                                                                         │
//! │  Customer types: "tom"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FTS5 searches across: sku, name, name_localized                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ products_fts (virtual table)            │                           │
//! │  │                                         │                           │
//! │  │ PRD-012 | Tomatoes      | طماطم        │ ← MATCH!                  │
//! │  │ PRD-013 | Tomato Paste  | معجون طماطم  │ ← MATCH!                  │
//! │  │ PRD-020 | Cucumbers     | خيار         │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results filtered to the requesting tenant, ordered by rank            │
//! │                                                                         │
//! │  Performance: <10ms for tens of thousands of rows (indexed search)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mandi_core::Product;

/// All columns of the products table, in declaration order.
const PRODUCT_COLUMNS: &str = "id, tenant_id, sku, name, name_localized, description, category, \
     price_cents, sale_price_cents, unit, image_url, is_active, created_at, updated_at";

/// Repository for product database operations.
///
/// Every query is scoped to a tenant: one store can never see or touch
/// another store's catalog.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search a tenant's catalog
/// let results = repo.search(tenant_id, "tomato", 20).await?;
///
/// // Get by ID within the tenant
/// let product = repo.get_by_id(tenant_id, "uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Searches a tenant's products using full-text search.
    ///
    /// ## How It Works
    /// 1. Uses the FTS5 virtual table for instant search
    /// 2. Searches across: SKU, name, localized name
    /// 3. Returns products ordered by relevance
    ///
    /// An empty query falls back to the default listing.
    ///
    /// ## Arguments
    /// * `tenant_id` - Tenant whose catalog to search
    /// * `query` - Search term (can be partial)
    /// * `limit` - Maximum results to return
    pub async fn search(&self, tenant_id: &str, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(tenant_id = %tenant_id, query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list_for_tenant(tenant_id, limit).await;
        }

        // Quote the user's term so FTS5 operators in the input can't break
        // the MATCH expression, then add * for prefix matching:
        // "tom" matches "Tomatoes", "Tomato Paste", ...
        let fts_query = format!("\"{}\"*", query.replace('"', "\"\""));

        let sql = "
            SELECT p.id, p.tenant_id, p.sku, p.name, p.name_localized, p.description,
                   p.category, p.price_cents, p.sale_price_cents, p.unit, p.image_url,
                   p.is_active, p.created_at, p.updated_at
            FROM products p
            INNER JOIN products_fts fts ON p.rowid = fts.rowid
            WHERE products_fts MATCH ?
            AND p.tenant_id = ?
            AND p.is_active = 1
            ORDER BY rank
            LIMIT ?
        ";

        let products = sqlx::query_as::<_, Product>(sql)
            .bind(&fts_query)
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists a tenant's active products sorted by name.
    ///
    /// The storefront's default browse view, and the fallback when the
    /// search query is empty.
    pub async fn list_for_tenant(&self, tenant_id: &str, limit: u32) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE tenant_id = ? AND is_active = 1 ORDER BY name LIMIT ?"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(tenant_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Lists a tenant's active products in one category.
    pub async fn list_by_category(
        &self,
        tenant_id: &str,
        category: &str,
        limit: u32,
    ) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE tenant_id = ? AND category = ? AND is_active = 1 ORDER BY name LIMIT ?"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(tenant_id)
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Gets a product by its ID within a tenant's catalog.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No such product for this tenant
    pub async fn get_by_id(&self, tenant_id: &str, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ? AND tenant_id = ?");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its SKU within a tenant's catalog.
    pub async fn get_by_sku(&self, tenant_id: &str, sku: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = ? AND tenant_id = ?");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(sku)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(())` - Product inserted
    /// * `Err(DbError::UniqueViolation)` - SKU already exists for this tenant
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(tenant_id = %product.tenant_id, sku = %product.sku, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, tenant_id, sku, name, name_localized, description, category,
                price_cents, sale_price_cents, unit, image_url,
                is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.tenant_id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.name_localized)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.sale_price_cents)
        .bind(&product.unit)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist for this tenant
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                sku = ?,
                name = ?,
                name_localized = ?,
                description = ?,
                category = ?,
                price_cents = ?,
                sale_price_cents = ?,
                unit = ?,
                image_url = ?,
                is_active = ?,
                updated_at = ?
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.name_localized)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.sale_price_cents)
        .bind(&product.unit)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(now)
        .bind(&product.id)
        .bind(&product.tenant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Soft-deletes a product by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// - Historical order items still reference this product
    /// - Can be restored if deleted by mistake
    pub async fn soft_delete(&self, tenant_id: &str, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ? WHERE id = ? AND tenant_id = ?",
        )
        .bind(now)
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts a tenant's active products.
    pub async fn count_for_tenant(&self, tenant_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE tenant_id = ? AND is_active = 1",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
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
            name_localized: "السلة الخضراء".to_string(),
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

    fn test_product(tenant_id: &str, sku: &str, name: &str, price_cents: i64) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            tenant_id: tenant_id.to_string(),
            sku: sku.to_string(),
            name: name.to_string(),
            name_localized: String::new(),
            description: None,
            category: Some("produce".to_string()),
            price_cents,
            sale_price_cents: None,
            unit: "kg".to_string(),
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (db, tenant) = seeded_db().await;
        let product = test_product(&tenant.id, "PRD-001", "Tomatoes", 450);

        db.products().insert(&product).await.unwrap();

        let found = db
            .products()
            .get_by_id(&tenant.id, &product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Tomatoes");
        assert_eq!(found.price_cents, 450);

        let by_sku = db
            .products()
            .get_by_sku(&tenant.id, "PRD-001")
            .await
            .unwrap();
        assert!(by_sku.is_some());
    }

    #[tokio::test]
    async fn test_fts_search_prefix_match() {
        let (db, tenant) = seeded_db().await;
        db.products()
            .insert(&test_product(&tenant.id, "PRD-001", "Tomatoes", 450))
            .await
            .unwrap();
        db.products()
            .insert(&test_product(&tenant.id, "PRD-002", "Tomato Paste", 700))
            .await
            .unwrap();
        db.products()
            .insert(&test_product(&tenant.id, "PRD-003", "Cucumbers", 300))
            .await
            .unwrap();

        let hits = db.products().search(&tenant.id, "tom", 10).await.unwrap();
        assert_eq!(hits.len(), 2);

        // Empty query falls back to the full listing
        let all = db.products().search(&tenant.id, "", 10).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_search_is_tenant_scoped() {
        let (db, tenant) = seeded_db().await;

        let now = Utc::now();
        let other = Tenant {
            id: Uuid::new_v4().to_string(),
            slug: "city-mart".to_string(),
            name: "City Mart".to_string(),
            name_localized: String::new(),
            logo_url: None,
            theme_color: None,
            currency_code: "SAR".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.tenants().insert(&other).await.unwrap();

        db.products()
            .insert(&test_product(&tenant.id, "PRD-001", "Tomatoes", 450))
            .await
            .unwrap();
        db.products()
            .insert(&test_product(&other.id, "PRD-001", "Tomatoes", 500))
            .await
            .unwrap();

        let hits = db
            .products()
            .search(&tenant.id, "tomatoes", 10)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tenant_id, tenant.id);
        assert_eq!(db.products().count_for_tenant(&other.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_sku_within_tenant_rejected() {
        let (db, tenant) = seeded_db().await;
        db.products()
            .insert(&test_product(&tenant.id, "PRD-001", "Tomatoes", 450))
            .await
            .unwrap();

        let err = db
            .products()
            .insert(&test_product(&tenant.id, "PRD-001", "Other", 100))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_product() {
        let (db, tenant) = seeded_db().await;
        let product = test_product(&tenant.id, "PRD-001", "Tomatoes", 450);
        db.products().insert(&product).await.unwrap();

        db.products()
            .soft_delete(&tenant.id, &product.id)
            .await
            .unwrap();

        assert!(db
            .products()
            .search(&tenant.id, "tomatoes", 10)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(db.products().count_for_tenant(&tenant.id).await.unwrap(), 0);

        // Unknown id errors
        let err = db
            .products()
            .soft_delete(&tenant.id, "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_changes_price_and_sale() {
        let (db, tenant) = seeded_db().await;
        let mut product = test_product(&tenant.id, "PRD-001", "Tomatoes", 450);
        db.products().insert(&product).await.unwrap();

        product.price_cents = 500;
        product.sale_price_cents = Some(425);
        db.products().update(&product).await.unwrap();

        let found = db
            .products()
            .get_by_id(&tenant.id, &product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.price_cents, 500);
        assert_eq!(found.sale_price_cents, Some(425));
        assert_eq!(found.effective_price_cents(), 425);
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let (db, tenant) = seeded_db().await;
        let mut dairy = test_product(&tenant.id, "PRD-010", "Labneh", 550);
        dairy.category = Some("dairy".to_string());
        db.products().insert(&dairy).await.unwrap();
        db.products()
            .insert(&test_product(&tenant.id, "PRD-001", "Tomatoes", 450))
            .await
            .unwrap();

        let produce = db
            .products()
            .list_by_category(&tenant.id, "produce", 10)
            .await
            .unwrap();
        assert_eq!(produce.len(), 1);
        assert_eq!(produce[0].name, "Tomatoes");
    }
}
