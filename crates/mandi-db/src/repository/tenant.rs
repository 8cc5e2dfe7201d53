//! # Tenant Repository
//!
//! Database operations for tenants (stores).
//!
//! ## Provisioning Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tenant Lifecycle                                     │
//! │                                                                         │
//! │  provision tool ──► insert() ──► tenant row (is_active = 1)            │
//! │                                                                         │
//! │  storefront ──────► get_by_slug() ──► resolve /{slug} URLs             │
//! │  directory ───────► list_active() ──► store listing page               │
//! │                                                                         │
//! │  admin ───────────► update() ───────► branding / currency changes      │
//! │  admin ───────────► deactivate() ───► store hidden, data retained      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mandi_core::Tenant;

/// Repository for tenant database operations.
#[derive(Debug, Clone)]
pub struct TenantRepository {
    pool: SqlitePool,
}

impl TenantRepository {
    /// Creates a new TenantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TenantRepository { pool }
    }

    /// Gets a tenant by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, slug, name, name_localized, logo_url, theme_color,
                   currency_code, is_active, created_at, updated_at
            FROM tenants
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Gets an active tenant by its slug.
    ///
    /// This is the storefront's URL resolver: `/{slug}/...` routes call it
    /// first, so deactivated stores disappear from the outside world.
    pub async fn get_by_slug(&self, slug: &str) -> DbResult<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, slug, name, name_localized, logo_url, theme_color,
                   currency_code, is_active, created_at, updated_at
            FROM tenants
            WHERE slug = ? AND is_active = 1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Lists active tenants for the store directory, sorted by name.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Tenant>> {
        let tenants = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, slug, name, name_localized, logo_url, theme_color,
                   currency_code, is_active, created_at, updated_at
            FROM tenants
            WHERE is_active = 1
            ORDER BY name
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }

    /// Inserts a new tenant.
    ///
    /// ## Returns
    /// * `Ok(())` - Tenant inserted
    /// * `Err(DbError::UniqueViolation)` - Slug already taken
    pub async fn insert(&self, tenant: &Tenant) -> DbResult<()> {
        debug!(slug = %tenant.slug, "Inserting tenant");

        sqlx::query(
            r#"
            INSERT INTO tenants (
                id, slug, name, name_localized, logo_url, theme_color,
                currency_code, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tenant.id)
        .bind(&tenant.slug)
        .bind(&tenant.name)
        .bind(&tenant.name_localized)
        .bind(&tenant.logo_url)
        .bind(&tenant.theme_color)
        .bind(&tenant.currency_code)
        .bind(tenant.is_active)
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a tenant's display fields and branding.
    pub async fn update(&self, tenant: &Tenant) -> DbResult<()> {
        debug!(id = %tenant.id, "Updating tenant");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE tenants SET
                name = ?,
                name_localized = ?,
                logo_url = ?,
                theme_color = ?,
                currency_code = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&tenant.name)
        .bind(&tenant.name_localized)
        .bind(&tenant.logo_url)
        .bind(&tenant.theme_color)
        .bind(&tenant.currency_code)
        .bind(now)
        .bind(&tenant.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Tenant", &tenant.id));
        }

        Ok(())
    }

    /// Soft-deletes a tenant by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// - Historical orders still reference this tenant
    /// - Can be restored if deactivated by mistake
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating tenant");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE tenants SET is_active = 0, updated_at = ? WHERE id = ?
            "#,
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Tenant", id));
        }

        Ok(())
    }

    /// Counts active tenants (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenants WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new tenant ID.
pub fn generate_tenant_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn test_tenant(slug: &str) -> Tenant {
        let now = Utc::now();
        Tenant {
            id: generate_tenant_id(),
            slug: slug.to_string(),
            name: format!("Store {}", slug),
            name_localized: "متجر".to_string(),
            logo_url: None,
            theme_color: Some("#2e7d32".to_string()),
            currency_code: "SAR".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_by_slug() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tenant = test_tenant("green-basket");

        db.tenants().insert(&tenant).await.unwrap();

        let found = db.tenants().get_by_slug("green-basket").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, tenant.id);

        let missing = db.tenants().get_by_slug("no-such-store").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.tenants().insert(&test_tenant("dup")).await.unwrap();
        let err = db.tenants().insert(&test_tenant("dup")).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_slug_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tenant = test_tenant("closing-down");
        db.tenants().insert(&tenant).await.unwrap();

        db.tenants().deactivate(&tenant.id).await.unwrap();

        assert!(db
            .tenants()
            .get_by_slug("closing-down")
            .await
            .unwrap()
            .is_none());
        // Still reachable by id for history
        assert!(db.tenants().get_by_id(&tenant.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_active_sorted_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut b = test_tenant("b-store");
        b.name = "Bravo Market".to_string();
        let mut a = test_tenant("a-store");
        a.name = "Alpha Market".to_string();

        db.tenants().insert(&b).await.unwrap();
        db.tenants().insert(&a).await.unwrap();

        let listed = db.tenants().list_active(10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Alpha Market");
        assert_eq!(db.tenants().count().await.unwrap(), 2);
    }
}
