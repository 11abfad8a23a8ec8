//! Postgres-backed product store.
//!
//! Products are kept as JSONB documents so that records written by older
//! versions of the catalog (grouped price strings, `stock` instead of
//! `inventory`, a single `image`) load unchanged and are normalized on read.
//!
//! ## Schema
//!
//! | Column | Type | Notes |
//! |--------|------|-------|
//! | `position` | `BIGSERIAL` | insertion order, drives `fetch_all` ordering |
//! | `id` | `UUID` | primary key, authoritative over the document's own `id` |
//! | `slug` | `TEXT UNIQUE` | `NULL` for legacy documents without a slug |
//! | `doc` | `JSONB` | the `ProductDocument` |
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | any | `Unavailable` |
//! | Decode / ColumnDecode | N/A | `Corrupt` |
//! | PoolClosed / PoolTimedOut / Io / other | N/A | `Unavailable` |

use std::sync::Arc;

use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{instrument, warn, Span};
use uuid::Uuid;

use storefront_core::ProductId;
use storefront_products::{Product, ProductDocument};

use super::r#trait::{ProductStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    position BIGSERIAL,
    id UUID PRIMARY KEY,
    slug TEXT UNIQUE,
    doc JSONB NOT NULL
)
"#;

/// Postgres-backed document store for the catalog.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; the store itself
/// holds no other state.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `products` table when it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    async fn write_document(
        &self,
        operation: &'static str,
        document: &ProductDocument,
    ) -> Result<(), StoreError> {
        let doc = encode_document(document)?;
        sqlx::query("INSERT INTO products (id, slug, doc) VALUES ($1, $2, $3)")
            .bind(*document.id.as_uuid())
            .bind(slug_column(document.slug.as_deref()))
            .bind(doc)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), fields(product_count = tracing::field::Empty), err)]
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query("SELECT id, doc FROM products ORDER BY position ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("fetch_all", e))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            match decode_row(row) {
                Ok(doc) => products.push(Product::from_document(doc)),
                Err(err) => warn!(error = %err, "skipping undecodable product document"),
            }
        }

        Span::current().record("product_count", products.len());
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT id, doc FROM products WHERE id = $1")
            .bind(*id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref()
            .map(|r| decode_row(r).map(Product::from_document))
            .transpose()
    }

    #[instrument(skip(self), err)]
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT id, doc FROM products WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_by_slug", e))?;

        row.as_ref()
            .map(|r| decode_row(r).map(Product::from_document))
            .transpose()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed(), slug = product.slug()), err)]
    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        self.write_document("insert", &product.to_document()).await?;
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed(), slug = product.slug()), err)]
    async fn replace(&self, product: Product) -> Result<Product, StoreError> {
        let document = product.to_document();
        let result = sqlx::query("UPDATE products SET slug = $2, doc = $3 WHERE id = $1")
            .bind(*product.id_typed().as_uuid())
            .bind(slug_column(document.slug.as_deref()))
            .bind(encode_document(&document)?)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("replace", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(product.id_typed().to_string()));
        }
        Ok(product)
    }

    #[instrument(skip(self), err)]
    async fn delete_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("DELETE FROM products WHERE slug = $1 RETURNING id, doc")
            .bind(slug)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_slug", e))?;

        row.as_ref()
            .map(|r| decode_row(r).map(Product::from_document))
            .transpose()
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, StoreError> {
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let result = sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(ids)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_many", e))?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self), err)]
    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT btrim(doc->>'category') AS category
            FROM products
            WHERE coalesce(btrim(doc->>'category'), '') <> ''
            ORDER BY category ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("categories", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("category")
                    .map_err(|e| map_sqlx_error("categories", e))
            })
            .collect()
    }

    #[instrument(skip(self, document), fields(product_id = %document.id), err)]
    async fn insert_document(&self, document: ProductDocument) -> Result<(), StoreError> {
        self.write_document("insert_document", &document).await
    }
}

fn slug_column(slug: Option<&str>) -> Option<&str> {
    slug.map(str::trim).filter(|s| !s.is_empty())
}

fn encode_document(document: &ProductDocument) -> Result<JsonValue, StoreError> {
    serde_json::to_value(document).map_err(|e| StoreError::Corrupt(e.to_string()))
}

/// Decode a `(id, doc)` row. The `id` column wins over whatever the document says.
fn decode_row(row: &PgRow) -> Result<ProductDocument, StoreError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode_row", e))?;
    let mut doc: JsonValue = row
        .try_get("doc")
        .map_err(|e| map_sqlx_error("decode_row", e))?;

    if let Some(object) = doc.as_object_mut() {
        object.insert("id".to_string(), JsonValue::String(id.to_string()));
    }
    serde_json::from_value(doc).map_err(|e| StoreError::Corrupt(format!("product {id}: {e}")))
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Conflict(msg),
                _ => StoreError::Unavailable(msg),
            }
        }
        sqlx::Error::RowNotFound => {
            StoreError::NotFound(format!("row not found in {}", operation))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Corrupt(format!("undecodable row in {}: {}", operation, err))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, err)),
    }
}
