//! Read-only access to the offer catalog and the vendor directory.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::offers::{Offer, Vendor};
use crate::options::OptionRow;

/// Failure of the backing store. Never used for "no rows".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("store query timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn backend(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(error))
    }
}

/// Exact-match offer selection. `None` on an optional facet means the facet
/// is unconstrained, not that it must be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferFilter<'a> {
    pub category: &'a str,
    pub quantity: i32,
    pub format: Option<&'a str>,
    pub finish: Option<&'a str>,
    pub folder_type: Option<&'a str>,
}

impl OfferFilter<'_> {
    /// In-process equivalent of the selection a [`CatalogStore`] performs.
    /// Only available offers match.
    #[must_use]
    pub fn matches(&self, offer: &Offer) -> bool {
        offer.available
            && offer.category == self.category
            && offer.quantity == self.quantity
            && facet_matches(self.format, offer.format.as_deref())
            && facet_matches(self.finish, offer.finish.as_deref())
            && facet_matches(self.folder_type, offer.folder_type.as_deref())
    }
}

fn facet_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.is_none_or(|w| actual == Some(w))
}

/// Catalog Store and Vendor Directory as seen by the engine.
pub trait CatalogStore {
    /// Available offers matching `filter` exactly.
    fn find_offers(
        &self,
        filter: &OfferFilter<'_>,
    ) -> impl Future<Output = Result<Vec<Offer>, StoreError>> + Send;

    /// Active vendors whose slug is in `slugs`. Unknown slugs are simply
    /// absent from the output.
    fn find_vendors(
        &self,
        slugs: &[String],
    ) -> impl Future<Output = Result<Vec<Vendor>, StoreError>> + Send;

    /// Facet values of every available offer whose category equals
    /// `category`, ignoring case.
    fn option_rows(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<OptionRow>, StoreError>> + Send;
}
