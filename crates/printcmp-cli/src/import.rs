//! `import offers`: parse the catalog export and upsert it.

use std::path::Path;

use anyhow::Context;

/// Parses `file` and, unless `dry_run`, upserts every offer by id.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any batch
/// fails to write.
pub(crate) async fn run_import_offers(file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read offers file {}", file.display()))?;
    let parsed = printcmp_core::parse_offers_csv(&content)
        .with_context(|| format!("failed to parse offers file {}", file.display()))?;

    let available = parsed.offers.iter().filter(|o| o.available).count();
    println!(
        "parsed {} offer(s) ({available} available), skipped {} short row(s)",
        parsed.offers.len(),
        parsed.skipped_lines.len()
    );
    if !parsed.skipped_lines.is_empty() {
        tracing::warn!(lines = ?parsed.skipped_lines, "rows skipped during import");
    }

    if dry_run {
        println!("dry run; nothing written");
        return Ok(());
    }

    let (_, pool) = crate::connect().await?;
    let written = printcmp_db::upsert_offers(&pool, &parsed.offers).await?;
    let total = printcmp_db::count_offers(&pool, false).await?;
    println!("upserted {written} offer(s); catalog now holds {total}");

    Ok(())
}
