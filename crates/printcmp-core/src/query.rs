use serde::{Deserialize, Serialize};

use crate::categories::resolve_category;
use crate::store::OfferFilter;
use crate::EngineError;

/// Quantity as sent by clients: form widgets submit it as text, API
/// clients as a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(i64),
    Text(String),
}

/// Raw comparison request, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<QuantityInput>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default, rename = "folderType", alias = "folder_type")]
    pub folder_type: Option<String>,
}

/// A validated comparison query. Optional facets are `None` when the client
/// left them out or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareQuery {
    pub category: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(rename = "folderType", skip_serializing_if = "Option::is_none")]
    pub folder_type: Option<String>,
}

impl CompareRequest {
    /// Checks required fields and normalizes the request into a query.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when `category` or `quantity` is
    /// missing, blank, non-numeric, or not a positive integer.
    pub fn validate(self) -> Result<CompareQuery, EngineError> {
        let category = non_blank(self.category.as_deref());
        let quantity = self.quantity.as_ref().and_then(quantity_present);

        let (Some(category), Some(raw_quantity)) = (category, quantity) else {
            return Err(EngineError::Validation(
                "missing required fields: category, quantity".to_string(),
            ));
        };

        let quantity = parse_quantity(raw_quantity)?;

        Ok(CompareQuery {
            category: resolve_category(category),
            quantity,
            format: non_blank(self.format.as_deref()).map(ToOwned::to_owned),
            finish: non_blank(self.finish.as_deref()).map(ToOwned::to_owned),
            folder_type: non_blank(self.folder_type.as_deref()).map(ToOwned::to_owned),
        })
    }
}

impl CompareQuery {
    #[must_use]
    pub fn filter(&self) -> OfferFilter<'_> {
        OfferFilter {
            category: &self.category,
            quantity: self.quantity,
            format: self.format.as_deref(),
            finish: self.finish.as_deref(),
            folder_type: self.folder_type.as_deref(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Zero and blank count as "not supplied", like an unset form field.
fn quantity_present(input: &QuantityInput) -> Option<&QuantityInput> {
    match input {
        QuantityInput::Number(0) => None,
        QuantityInput::Text(s) if s.trim().is_empty() || s.trim() == "0" => None,
        _ => Some(input),
    }
}

fn parse_quantity(input: &QuantityInput) -> Result<i32, EngineError> {
    let value = match input {
        QuantityInput::Number(n) => *n,
        QuantityInput::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            EngineError::Validation(format!("quantity must be a whole number, got '{s}'"))
        })?,
    };

    if value <= 0 {
        return Err(EngineError::Validation(format!(
            "quantity must be positive, got {value}"
        )));
    }

    i32::try_from(value)
        .map_err(|_| EngineError::Validation(format!("quantity {value} is out of range")))
}
