//! Handler for host and network search.

use axum::extract::{Query, State};
use axum::Json;
use hostwatch_core::search::parse_kinds;
use hostwatch_db::models::search::{SearchParams, SearchResponse};
use hostwatch_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/search?q=&kinds=host,network&limit=&offset=
///
/// Every term in `q` must start a word of a result's name or description,
/// or start one of a host's addresses.
pub async fn search(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<SearchResponse>>> {
    let kinds = parse_kinds(params.kinds.as_deref())?;
    let response = SearchRepo::search(
        &state.pool,
        auth.user_id,
        params.q.as_deref().unwrap_or(""),
        &kinds,
        params.limit,
        params.offset,
    )
    .await?;

    tracing::debug!(
        user_id = auth.user_id,
        total = response.total_count,
        "Search executed"
    );
    Ok(Json(DataResponse { data: response }))
}
