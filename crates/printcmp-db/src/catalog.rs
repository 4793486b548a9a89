//! Postgres-backed catalog store: `offers` and `vendors` read paths used by
//! the comparison engine.

use chrono::{DateTime, Utc};
use printcmp_core::{CatalogStore, Offer, OfferFilter, OptionRow, StoreError, Vendor};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `offers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OfferRow {
    pub id: String,
    pub category: String,
    pub product_name: String,
    pub format: Option<String>,
    pub paper: Option<String>,
    pub weight: Option<String>,
    pub finish: Option<String>,
    pub folder_type: Option<String>,
    pub quantity: i32,
    pub vendor_slug: String,
    pub product_range: Option<String>,
    pub product_price: Option<Decimal>,
    pub shipping_price: Option<Decimal>,
    pub total_price_excl_tax: Option<Decimal>,
    pub total_price_incl_tax: Option<Decimal>,
    pub primary_price: Option<Decimal>,
    pub delivery_min_days: Option<i32>,
    pub delivery_max_days: Option<i32>,
    pub available: bool,
    pub notes: Option<String>,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            product_name: row.product_name,
            format: row.format,
            paper: row.paper,
            weight: row.weight,
            finish: row.finish,
            folder_type: row.folder_type,
            quantity: row.quantity,
            vendor_slug: row.vendor_slug,
            range: row.product_range,
            product_price: row.product_price,
            shipping_price: row.shipping_price,
            total_price_excl_tax: row.total_price_excl_tax,
            total_price_incl_tax: row.total_price_incl_tax,
            primary_price: row.primary_price,
            delivery_min_days: row.delivery_min_days,
            delivery_max_days: row.delivery_max_days,
            available: row.available,
            notes: row.notes,
        }
    }
}

/// A row from the `vendors` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VendorRow {
    pub slug: String,
    pub display_name: String,
    pub website_url: String,
    pub quality_score: Option<Decimal>,
    pub rating_value: Option<Decimal>,
    pub rating_source: Option<String>,
    pub rating_url: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<VendorRow> for Vendor {
    fn from(row: VendorRow) -> Self {
        Self {
            slug: row.slug,
            display_name: row.display_name,
            website_url: row.website_url,
            quality_score: row.quality_score,
            rating_value: row.rating_value,
            rating_source: row.rating_source,
            rating_url: row.rating_url,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct OptionRecord {
    format: Option<String>,
    quantity: i32,
    finish: Option<String>,
    folder_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// [`CatalogStore`] over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns available offers matching the filter exactly, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn list_matching_offers(
        &self,
        filter: &OfferFilter<'_>,
    ) -> Result<Vec<OfferRow>, DbError> {
        let rows = sqlx::query_as::<_, OfferRow>(
            "SELECT id, category, product_name, format, paper, weight, finish, folder_type, \
                    quantity, vendor_slug, product_range, product_price, shipping_price, \
                    total_price_excl_tax, total_price_incl_tax, primary_price, \
                    delivery_min_days, delivery_max_days, available, notes \
             FROM offers \
             WHERE available = TRUE \
               AND category = $1 \
               AND quantity = $2 \
               AND ($3::TEXT IS NULL OR format = $3) \
               AND ($4::TEXT IS NULL OR finish = $4) \
               AND ($5::TEXT IS NULL OR folder_type = $5) \
             ORDER BY id",
        )
        .bind(filter.category)
        .bind(filter.quantity)
        .bind(filter.format)
        .bind(filter.finish)
        .bind(filter.folder_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns active vendors whose slug is in `slugs`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn list_vendors_by_slug(&self, slugs: &[String]) -> Result<Vec<VendorRow>, DbError> {
        let rows = sqlx::query_as::<_, VendorRow>(
            "SELECT slug, display_name, website_url, quality_score, rating_value, \
                    rating_source, rating_url, description, is_active, updated_at \
             FROM vendors \
             WHERE slug = ANY($1) AND is_active = TRUE \
             ORDER BY slug",
        )
        .bind(slugs)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_option_records(&self, category: &str) -> Result<Vec<OptionRecord>, DbError> {
        let rows = sqlx::query_as::<_, OptionRecord>(
            "SELECT format, quantity, finish, folder_type \
             FROM offers \
             WHERE available = TRUE \
               AND LOWER(category) = LOWER($1) \
             ORDER BY id",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

impl CatalogStore for PgCatalog {
    async fn find_offers(&self, filter: &OfferFilter<'_>) -> Result<Vec<Offer>, StoreError> {
        let rows = self.list_matching_offers(filter).await?;
        Ok(rows.into_iter().map(Offer::from).collect())
    }

    async fn find_vendors(&self, slugs: &[String]) -> Result<Vec<Vendor>, StoreError> {
        let rows = self.list_vendors_by_slug(slugs).await?;
        Ok(rows.into_iter().map(Vendor::from).collect())
    }

    async fn option_rows(&self, category: &str) -> Result<Vec<OptionRow>, StoreError> {
        let rows = self.list_option_records(category).await?;
        Ok(rows
            .into_iter()
            .map(|r| OptionRow {
                format: r.format,
                quantity: r.quantity,
                finish: r.finish,
                folder_type: r.folder_type,
            })
            .collect())
    }
}
