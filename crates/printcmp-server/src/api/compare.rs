use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use printcmp_core::{compare, CompareQuery, CompareRequest, ComparisonResult, EngineError};
use printcmp_db::PgCatalog;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_engine_error, with_timeout, ApiError, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CompareResponse {
    results: Vec<ComparisonResult>,
    query: CompareQuery,
    meta: ResponseMeta,
}

pub(super) async fn compare_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<CompareResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected compare body");
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    let query = request
        .validate()
        .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    let catalog = PgCatalog::new(state.pool.clone());
    let results = with_timeout(state.query_timeout, compare(&catalog, &query))
        .await
        .map_err(|e| {
            log_failure(&e, &query);
            map_engine_error(req_id.0.clone(), &e)
        })?;

    tracing::info!(
        category = %query.category,
        quantity = query.quantity,
        results = results.len(),
        "comparison served"
    );

    Ok(Json(CompareResponse {
        results,
        query,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn log_failure(error: &EngineError, query: &CompareQuery) {
    let cause = match error {
        EngineError::StoreUnavailable(source) => source.to_string(),
        EngineError::Validation(message) => message.clone(),
    };
    tracing::error!(
        error = %cause,
        category = %query.category,
        quantity = query.quantity,
        format = ?query.format,
        finish = ?query.finish,
        folder_type = ?query.folder_type,
        "comparison failed"
    );
}
