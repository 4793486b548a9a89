//! Read-only catalog queries: `options`, `compare`, `categories`.

use std::time::Duration;

use anyhow::Context;
use printcmp_core::{
    finish_label, format_label, resolve_category, CompareRequest, ComparisonResult, EngineError,
    ProductOptions, QuantityInput, StoreError, CATEGORIES,
};
use printcmp_db::PgCatalog;
use rust_decimal::Decimal;

pub(crate) fn compare_request(
    category: String,
    quantity: String,
    format: Option<String>,
    finish: Option<String>,
    folder_type: Option<String>,
) -> CompareRequest {
    CompareRequest {
        category: Some(category),
        quantity: Some(QuantityInput::Text(quantity)),
        format,
        finish,
        folder_type,
    }
}

async fn bounded<T>(
    timeout: Duration,
    call: impl std::future::Future<Output = Result<T, EngineError>>,
) -> Result<T, EngineError> {
    tokio::time::timeout(timeout, call)
        .await
        .unwrap_or(Err(EngineError::StoreUnavailable(StoreError::Timeout(
            timeout,
        ))))
}

/// Prints the facet values available for a category.
///
/// # Errors
///
/// Returns an error for a blank category or a failed store read.
pub(crate) async fn run_options(
    pool: &sqlx::PgPool,
    timeout: Duration,
    category: &str,
    json: bool,
) -> anyhow::Result<()> {
    let category = resolve_category(category);
    let catalog = PgCatalog::new(pool.clone());
    let options = bounded(timeout, printcmp_core::list_options(&catalog, &category))
        .await
        .with_context(|| format!("listing options for '{category}' failed"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print!("{}", render_options(&category, &options));
    }
    Ok(())
}

/// Prints vendors ranked by price for one configuration.
///
/// # Errors
///
/// Returns an error for an invalid request or a failed store read.
pub(crate) async fn run_compare(
    pool: &sqlx::PgPool,
    timeout: Duration,
    request: CompareRequest,
    json: bool,
) -> anyhow::Result<()> {
    let query = request.validate()?;
    let catalog = PgCatalog::new(pool.clone());
    let results = bounded(timeout, printcmp_core::compare(&catalog, &query))
        .await
        .with_context(|| {
            format!(
                "comparison failed for category '{}' quantity {}",
                query.category, query.quantity
            )
        })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!(
            "no vendor offers {} x{}; run `options --category \"{}\"` to see valid values",
            query.category, query.quantity, query.category
        );
    } else {
        print!("{}", render_results(&results));
    }
    Ok(())
}

pub(crate) fn run_categories() {
    println!("{:<14}NAME", "SLUG");
    for category in CATEGORIES {
        println!("{:<14}{}", category.slug, category.name);
    }
}

pub(crate) fn render_options(category: &str, options: &ProductOptions) -> String {
    let mut out = format!("Category: {category}\n");

    out.push_str("Formats:\n");
    for format in &options.formats {
        out.push_str(&format!("  {format:<12}{}\n", format_label(category, format)));
    }

    let quantities: Vec<String> = options.quantities.iter().map(i32::to_string).collect();
    out.push_str(&format!("Quantities: {}\n", quantities.join(", ")));
    let finishes: Vec<String> = options.finishes.iter().map(|f| finish_label(f)).collect();
    out.push_str(&format!("Finishes: {}\n", finishes.join(", ")));
    if !options.folder_types.is_empty() {
        out.push_str(&format!(
            "Folder types: {}\n",
            options.folder_types.join(", ")
        ));
    }
    out
}

pub(crate) fn render_results(results: &[ComparisonResult]) -> String {
    let mut out = format!(
        "{:<4}{:<22}{:>10}  {:<9}{:<9}{:<8}WEBSITE\n",
        "#", "VENDOR", "PRICE", "DAYS", "QUALITY", "RATING"
    );
    for (rank, result) in results.iter().enumerate() {
        let rating = result
            .rating
            .map_or_else(|| "-".to_string(), |r| r.round_dp(1).to_string());
        out.push_str(&format!(
            "{:<4}{:<22}{:>10}  {:<9}{:<9}{:<8}{}\n",
            rank + 1,
            result.vendor_name,
            fmt_price(result.price),
            result.delivery_days,
            result.quality_score.round_dp(1),
            rating,
            result.website_url
        ));
    }
    out
}

fn fmt_price(price: Decimal) -> String {
    format!("{:.2} EUR", price.round_dp(2))
}
