//! Write path for the `offers` table.

use printcmp_core::Offer;
use sqlx::PgPool;

use crate::DbError;

/// Offers per upsert transaction.
pub const UPSERT_BATCH_SIZE: usize = 100;

/// Upserts offers keyed by `id`, one transaction per batch of
/// [`UPSERT_BATCH_SIZE`].
///
/// Returns the number of offers written. A failing batch is rolled back and
/// the error returned; earlier batches stay committed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails.
pub async fn upsert_offers(pool: &PgPool, offers: &[Offer]) -> Result<usize, DbError> {
    let mut written = 0usize;

    for (batch_no, batch) in offers.chunks(UPSERT_BATCH_SIZE).enumerate() {
        let mut tx = pool.begin().await?;

        for offer in batch {
            sqlx::query(
                "INSERT INTO offers (id, category, product_name, format, paper, weight, finish, \
                                     folder_type, quantity, vendor_slug, product_range, \
                                     product_price, shipping_price, total_price_excl_tax, \
                                     total_price_incl_tax, primary_price, delivery_min_days, \
                                     delivery_max_days, available, notes) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                         $16, $17, $18, $19, $20) \
                 ON CONFLICT (id) DO UPDATE SET \
                     category = EXCLUDED.category, \
                     product_name = EXCLUDED.product_name, \
                     format = EXCLUDED.format, \
                     paper = EXCLUDED.paper, \
                     weight = EXCLUDED.weight, \
                     finish = EXCLUDED.finish, \
                     folder_type = EXCLUDED.folder_type, \
                     quantity = EXCLUDED.quantity, \
                     vendor_slug = EXCLUDED.vendor_slug, \
                     product_range = EXCLUDED.product_range, \
                     product_price = EXCLUDED.product_price, \
                     shipping_price = EXCLUDED.shipping_price, \
                     total_price_excl_tax = EXCLUDED.total_price_excl_tax, \
                     total_price_incl_tax = EXCLUDED.total_price_incl_tax, \
                     primary_price = EXCLUDED.primary_price, \
                     delivery_min_days = EXCLUDED.delivery_min_days, \
                     delivery_max_days = EXCLUDED.delivery_max_days, \
                     available = EXCLUDED.available, \
                     notes = EXCLUDED.notes, \
                     updated_at = NOW()",
            )
            .bind(&offer.id)
            .bind(&offer.category)
            .bind(&offer.product_name)
            .bind(&offer.format)
            .bind(&offer.paper)
            .bind(&offer.weight)
            .bind(&offer.finish)
            .bind(&offer.folder_type)
            .bind(offer.quantity)
            .bind(&offer.vendor_slug)
            .bind(&offer.range)
            .bind(offer.product_price)
            .bind(offer.shipping_price)
            .bind(offer.total_price_excl_tax)
            .bind(offer.total_price_incl_tax)
            .bind(offer.primary_price)
            .bind(offer.delivery_min_days)
            .bind(offer.delivery_max_days)
            .bind(offer.available)
            .bind(&offer.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        written += batch.len();
        tracing::debug!(batch = batch_no + 1, written, "offer batch committed");
    }

    Ok(written)
}

/// Returns the number of rows in `offers`, optionally restricted to
/// available ones.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_offers(pool: &PgPool, available_only: bool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM offers WHERE ($1 = FALSE OR available = TRUE)",
    )
    .bind(available_only)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
