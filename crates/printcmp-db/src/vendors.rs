use printcmp_core::VendorConfig;
use sqlx::PgPool;

use crate::{catalog::VendorRow, DbError};

/// Upserts vendors from config, keyed by slug.
///
/// Returns the number of vendors processed. All upserts share one
/// transaction; any failure rolls back the whole seed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails.
pub async fn seed_vendors(pool: &PgPool, vendors: &[VendorConfig]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for vendor in vendors {
        sqlx::query(
            "INSERT INTO vendors (slug, display_name, website_url, quality_score, rating_value, \
                                  rating_source, rating_url, description, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE) \
             ON CONFLICT (slug) DO UPDATE SET \
                 display_name = EXCLUDED.display_name, \
                 website_url = EXCLUDED.website_url, \
                 quality_score = EXCLUDED.quality_score, \
                 rating_value = EXCLUDED.rating_value, \
                 rating_source = EXCLUDED.rating_source, \
                 rating_url = EXCLUDED.rating_url, \
                 description = EXCLUDED.description, \
                 is_active = TRUE, \
                 updated_at = NOW()",
        )
        .bind(vendor.slug())
        .bind(&vendor.name)
        .bind(&vendor.website_url)
        .bind(vendor.quality_score)
        .bind(vendor.rating_value)
        .bind(&vendor.rating_source)
        .bind(&vendor.rating_url)
        .bind(&vendor.description)
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}

/// Returns every vendor row, active or not, ordered by slug.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_vendors(pool: &PgPool) -> Result<Vec<VendorRow>, DbError> {
    let rows = sqlx::query_as::<_, VendorRow>(
        "SELECT slug, display_name, website_url, quality_score, rating_value, \
                rating_source, rating_url, description, is_active, updated_at \
         FROM vendors \
         ORDER BY slug",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
