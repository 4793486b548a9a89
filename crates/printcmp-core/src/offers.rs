use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One vendor's priced configuration of a print product, as stored in the
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Row key from the tabular source the catalog is imported from.
    pub id: String,
    pub category: String,
    pub product_name: String,
    /// Format code in millimetres, e.g. `"85x55"`.
    pub format: Option<String>,
    pub paper: Option<String>,
    /// Paper weight as written by the source, e.g. `"350"`.
    pub weight: Option<String>,
    pub finish: Option<String>,
    /// Only populated for the folders category.
    pub folder_type: Option<String>,
    pub quantity: i32,
    pub vendor_slug: String,
    /// Vendor product line, free text.
    pub range: Option<String>,
    pub product_price: Option<Decimal>,
    pub shipping_price: Option<Decimal>,
    pub total_price_excl_tax: Option<Decimal>,
    pub total_price_incl_tax: Option<Decimal>,
    /// Canonical price used for ranking and display.
    pub primary_price: Option<Decimal>,
    pub delivery_min_days: Option<i32>,
    pub delivery_max_days: Option<i32>,
    pub available: bool,
    pub notes: Option<String>,
}

impl Offer {
    /// Returns the primary price when the offer can be shown to a visitor:
    /// available, priced, and priced above zero.
    #[must_use]
    pub fn usable_price(&self) -> Option<Decimal> {
        if !self.available {
            return None;
        }
        self.primary_price.filter(|p| *p > Decimal::ZERO)
    }
}

/// A printing company from the vendor directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub slug: String,
    pub display_name: String,
    pub website_url: String,
    pub quality_score: Option<Decimal>,
    pub rating_value: Option<Decimal>,
    pub rating_source: Option<String>,
    pub rating_url: Option<String>,
    pub description: Option<String>,
}

/// Display-ready comparison row: vendor identity joined with the matched
/// offer's price, delivery estimate and configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub vendor_name: String,
    pub vendor_slug: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub delivery_days: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub quality_score: Decimal,
    pub website_url: String,
    pub description: String,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_url: Option<String>,
    pub category: String,
    pub product: String,
    pub format: Option<String>,
    pub quantity: i32,
    pub finish: Option<String>,
}

impl ComparisonResult {
    /// Builds the result row for an offer already known to be usable.
    #[must_use]
    pub fn from_parts(offer: &Offer, vendor: &Vendor, price: Decimal) -> Self {
        Self {
            vendor_name: vendor.display_name.clone(),
            vendor_slug: vendor.slug.clone(),
            price,
            delivery_days: offer.delivery_max_days.unwrap_or(0),
            quality_score: vendor.quality_score.unwrap_or(Decimal::ZERO),
            website_url: vendor.website_url.clone(),
            description: vendor.description.clone().unwrap_or_default(),
            rating: vendor.rating_value,
            rating_source: vendor.rating_source.clone(),
            rating_url: vendor.rating_url.clone(),
            category: offer.category.clone(),
            product: offer.product_name.clone(),
            format: offer.format.clone(),
            quantity: offer.quantity,
            finish: offer.finish.clone(),
        }
    }
}
