use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::SearchResult;
use crate::error::SearchError;
use crate::query_engine::QueryEngine;

use super::models::SearchParams;

pub async fn search_handler(
    State(query_engine): State<Arc<QueryEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, (StatusCode, String)> {
    let start = Instant::now();

    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Err(error_response(SearchError::EmptyQuery));
    }

    // the walk does blocking file I/O
    let results = tokio::task::spawn_blocking(move || query_engine.query(&query))
        .await
        .map_err(|e| error_response(SearchError::Internal(e.to_string())))?
        .map_err(error_response)?;

    log::debug!(
        "search returned {} results in {}ms",
        results.len(),
        start.elapsed().as_millis()
    );
    Ok(Json(results))
}

fn error_response(err: SearchError) -> (StatusCode, String) {
    let status = match &err {
        SearchError::EmptyQuery => StatusCode::BAD_REQUEST,
        SearchError::WalkStart { .. } | SearchError::Internal(_) => {
            log::error!("search failed: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}
