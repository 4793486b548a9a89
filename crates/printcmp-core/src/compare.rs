//! Comparator: join matching offers to their vendors and rank by price.

use std::collections::{BTreeSet, HashMap};

use crate::offers::{ComparisonResult, Offer, Vendor};
use crate::query::CompareQuery;
use crate::store::{CatalogStore, OfferFilter};
use crate::EngineError;

/// Runs a comparison against `store`.
///
/// Reads matching offers, then the vendors they reference. An empty offer
/// set short-circuits before the vendor read.
///
/// # Errors
///
/// Returns [`EngineError::StoreUnavailable`] if either read fails. Offers
/// with unknown vendors or unusable prices are dropped, not reported.
pub async fn compare<S>(store: &S, query: &CompareQuery) -> Result<Vec<ComparisonResult>, EngineError>
where
    S: CatalogStore + Sync,
{
    let filter = query.filter();
    let offers = store.find_offers(&filter).await?;

    if offers.is_empty() {
        tracing::debug!(
            category = %query.category,
            quantity = query.quantity,
            "no offers match query"
        );
        return Ok(Vec::new());
    }

    let slugs: Vec<String> = offers
        .iter()
        .map(|o| o.vendor_slug.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let vendors: HashMap<String, Vendor> = store
        .find_vendors(&slugs)
        .await?
        .into_iter()
        .map(|v| (v.slug.clone(), v))
        .collect();

    let matched = offers.len();
    let results = rank_offers(&filter, offers, &vendors);
    tracing::debug!(
        category = %query.category,
        quantity = query.quantity,
        matched,
        ranked = results.len(),
        "comparison complete"
    );

    Ok(results)
}

/// Filters, joins and orders offers into comparison rows.
///
/// Ordering is by price ascending; equal prices fall back to vendor slug,
/// then offer id, so repeated calls over the same data agree.
#[must_use]
pub fn rank_offers(
    filter: &OfferFilter<'_>,
    offers: Vec<Offer>,
    vendors: &HashMap<String, Vendor>,
) -> Vec<ComparisonResult> {
    let mut unknown_vendor = 0usize;

    let mut ranked: Vec<_> = offers
        .into_iter()
        .filter(|offer| filter.matches(offer))
        .filter_map(|offer| {
            let price = offer.usable_price()?;
            let Some(vendor) = vendors.get(&offer.vendor_slug) else {
                unknown_vendor += 1;
                tracing::warn!(
                    offer_id = %offer.id,
                    vendor_slug = %offer.vendor_slug,
                    "offer references unknown vendor; dropping"
                );
                return None;
            };
            Some((price, offer, vendor))
        })
        .collect();

    if unknown_vendor > 0 {
        tracing::warn!(
            category = filter.category,
            quantity = filter.quantity,
            dropped = unknown_vendor,
            "dropped offers without a vendor record"
        );
    }

    ranked.sort_by(|(pa, oa, _), (pb, ob, _)| {
        pa.cmp(pb)
            .then_with(|| oa.vendor_slug.cmp(&ob.vendor_slug))
            .then_with(|| oa.id.cmp(&ob.id))
    });

    ranked
        .into_iter()
        .map(|(price, offer, vendor)| ComparisonResult::from_parts(&offer, vendor, price))
        .collect()
}

#[cfg(test)]
#[path = "compare_test.rs"]
mod tests;
