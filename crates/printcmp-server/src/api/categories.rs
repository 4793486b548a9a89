use axum::{Extension, Json};
use printcmp_core::{Category, CATEGORIES};

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

pub(super) async fn list_categories(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Category>>> {
    Json(ApiResponse {
        data: CATEGORIES.to_vec(),
        meta: ResponseMeta::new(req_id.0),
    })
}
