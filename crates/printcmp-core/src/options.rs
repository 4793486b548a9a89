//! Option Resolver: the valid facet values for a category.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::categories::is_folders;
use crate::store::CatalogStore;
use crate::EngineError;

/// Facet values of one available offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub format: Option<String>,
    pub quantity: i32,
    pub finish: Option<String>,
    pub folder_type: Option<String>,
}

/// Distinct facet values a client can build a query from.
///
/// Only `quantities` has a defined order (ascending). `folder_types` is
/// always empty outside the folders category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptions {
    pub formats: Vec<String>,
    pub quantities: Vec<i32>,
    pub finishes: Vec<String>,
    pub folder_types: Vec<String>,
}

/// Lists the facet values available for `category`.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] for a blank category and
/// [`EngineError::StoreUnavailable`] if the store read fails. A category
/// without offers is not an error; every list is empty.
pub async fn list_options<S>(store: &S, category: &str) -> Result<ProductOptions, EngineError>
where
    S: CatalogStore + Sync,
{
    let category = category.trim();
    if category.is_empty() {
        return Err(EngineError::Validation(
            "missing required parameter: category".to_string(),
        ));
    }

    let rows = store.option_rows(category).await?;
    tracing::debug!(category, rows = rows.len(), "resolved option rows");

    Ok(collect_options(&rows, category))
}

/// Reduces option rows to distinct, non-empty facet values.
#[must_use]
pub fn collect_options(rows: &[OptionRow], category: &str) -> ProductOptions {
    let quantities: BTreeSet<i32> = rows.iter().map(|r| r.quantity).collect();

    let folder_types = if is_folders(category) {
        distinct(rows.iter().map(|r| r.folder_type.as_deref()))
    } else {
        Vec::new()
    };

    ProductOptions {
        formats: distinct(rows.iter().map(|r| r.format.as_deref())),
        quantities: quantities.into_iter().collect(),
        finishes: distinct(rows.iter().map(|r| r.finish.as_deref())),
        folder_types,
    }
}

/// First-seen order, blanks skipped.
fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| !v.trim().is_empty())
        .filter(|v| seen.insert(*v))
        .map(ToOwned::to_owned)
        .collect()
}
