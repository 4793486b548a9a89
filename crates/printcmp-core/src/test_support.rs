//! In-memory catalog and fixtures shared by the engine tests.

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use crate::offers::{Offer, Vendor};
use crate::options::OptionRow;
use crate::store::{CatalogStore, OfferFilter, StoreError};

/// Business-card offer (Tarjetas, 85x55, 500, Plastificado mate).
pub(crate) fn offer(id: &str, vendor_slug: &str, price: &str) -> Offer {
    Offer {
        id: id.to_string(),
        category: "Tarjetas".to_string(),
        product_name: "Tarjetas de visita".to_string(),
        format: Some("85x55".to_string()),
        paper: Some("Estucado".to_string()),
        weight: Some("350".to_string()),
        finish: Some("Plastificado mate".to_string()),
        folder_type: None,
        quantity: 500,
        vendor_slug: vendor_slug.to_string(),
        range: None,
        product_price: None,
        shipping_price: None,
        total_price_excl_tax: None,
        total_price_incl_tax: None,
        primary_price: Some(Decimal::from_str(price).expect("fixture price")),
        delivery_min_days: Some(3),
        delivery_max_days: Some(5),
        available: true,
        notes: None,
    }
}

pub(crate) fn vendor(slug: &str, name: &str) -> Vendor {
    Vendor {
        slug: slug.to_string(),
        display_name: name.to_string(),
        website_url: format!("https://{slug}.example.com"),
        quality_score: Some(Decimal::new(40, 1)),
        rating_value: None,
        rating_source: None,
        rating_url: None,
        description: Some(format!("{name} description")),
    }
}

/// Catalog backed by vectors. `failing()` errors on every read.
pub(crate) struct MemoryCatalog {
    offers: Vec<Offer>,
    vendors: Vec<Vendor>,
    fail: bool,
    pub(crate) vendor_reads: AtomicUsize,
}

impl MemoryCatalog {
    pub(crate) fn new(offers: Vec<Offer>, vendors: Vec<Vendor>) -> Self {
        Self {
            offers,
            vendors,
            fail: false,
            vendor_reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new(), Vec::new())
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::backend(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        Ok(())
    }
}

impl CatalogStore for MemoryCatalog {
    async fn find_offers(&self, filter: &OfferFilter<'_>) -> Result<Vec<Offer>, StoreError> {
        self.check()?;
        Ok(self
            .offers
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn find_vendors(&self, slugs: &[String]) -> Result<Vec<Vendor>, StoreError> {
        self.check()?;
        self.vendor_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .vendors
            .iter()
            .filter(|v| slugs.contains(&v.slug))
            .cloned()
            .collect())
    }

    async fn option_rows(&self, category: &str) -> Result<Vec<OptionRow>, StoreError> {
        self.check()?;
        Ok(self
            .offers
            .iter()
            .filter(|o| o.available && o.category.eq_ignore_ascii_case(category))
            .map(|o| OptionRow {
                format: o.format.clone(),
                quantity: o.quantity,
                finish: o.finish.clone(),
                folder_type: o.folder_type.clone(),
            })
            .collect())
    }
}
