use std::collections::BTreeMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use printcmp_core::{finish_label, format_label, list_options, resolve_category, ProductOptions};
use printcmp_db::PgCatalog;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_engine_error, with_timeout, ApiError, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct OptionsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductOptionsResponse {
    category: String,
    #[serde(flatten)]
    options: ProductOptions,
    /// Display label per format code.
    format_labels: BTreeMap<String, String>,
    finish_labels: BTreeMap<String, String>,
    meta: ResponseMeta,
}

pub(super) async fn get_product_options(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<OptionsQuery>, QueryRejection>,
) -> Result<Json<ProductOptionsResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected options query");
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;
    let category = resolve_category(query.category.as_deref().unwrap_or_default());
    let catalog = PgCatalog::new(state.pool.clone());

    let options = with_timeout(state.query_timeout, list_options(&catalog, &category))
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, category = %category, "product options failed");
            map_engine_error(req_id.0.clone(), &e)
        })?;

    let format_labels = options
        .formats
        .iter()
        .map(|f| (f.clone(), format_label(&category, f)))
        .collect();
    let finish_labels = options
        .finishes
        .iter()
        .map(|f| (f.clone(), finish_label(f)))
        .collect();

    Ok(Json(ProductOptionsResponse {
        category,
        options,
        format_labels,
        finish_labels,
        meta: ResponseMeta::new(req_id.0),
    }))
}
