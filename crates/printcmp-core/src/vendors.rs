use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const MAX_SCORE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Explicit slug; derived from `name` when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    pub website_url: String,
    #[serde(default)]
    pub quality_score: Option<Decimal>,
    #[serde(default)]
    pub rating_value: Option<Decimal>,
    #[serde(default)]
    pub rating_source: Option<String>,
    #[serde(default)]
    pub rating_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl VendorConfig {
    /// The explicit slug if set, otherwise a URL-safe slug of the name.
    #[must_use]
    pub fn slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => slugify(&self.name),
        }
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' || c == '.' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Deserialize)]
pub struct VendorsFile {
    pub vendors: Vec<VendorConfig>,
}

/// Load and validate the vendor directory from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_vendors(path: &Path) -> Result<VendorsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VendorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let vendors_file: VendorsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::VendorsFileParse)?;

    validate_vendors(&vendors_file)?;

    Ok(vendors_file)
}

fn validate_vendors(vendors_file: &VendorsFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for vendor in &vendors_file.vendors {
        if vendor.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "vendor name must be non-empty".to_string(),
            ));
        }

        let url = vendor.website_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' has invalid website_url '{}'; must be http(s)",
                vendor.name, vendor.website_url
            )));
        }

        for (field, value) in [
            ("quality_score", vendor.quality_score),
            ("rating_value", vendor.rating_value),
        ] {
            if let Some(v) = value {
                if v < Decimal::ZERO || v > MAX_SCORE {
                    return Err(ConfigError::Validation(format!(
                        "vendor '{}' has {field} {v}; must be between 0 and 5",
                        vendor.name
                    )));
                }
            }
        }

        let slug = vendor.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' produces an empty slug",
                vendor.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate vendor slug: '{}' (from vendor '{}')",
                slug, vendor.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "vendors_test.rs"]
mod tests;
