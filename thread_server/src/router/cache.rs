use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use thread_core::ItemType;

use crate::{error::Result, state::AppState};

pub fn cache_router() -> Router<AppState> {
    Router::new()
        .route("/get_cache", get(get_cache))
        .route("/cache/:item_type/clear", post(clear_cache))
}

async fn get_cache(State(app_state): State<AppState>) -> Result<impl IntoResponse> {
    let archive = app_state.context.cache().export()?;
    tracing::info!("Exported cache archive of {} bytes", archive.len());
    Ok((
        [
            (header::CONTENT_TYPE, "application/gzip"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"cache.tar.gz\""),
        ],
        archive,
    ))
}

/// `POST /cache/user/clear` makes author names and avatars refresh on the next page.
async fn clear_cache(State(app_state): State<AppState>, Path(item_type): Path<String>) -> Result<StatusCode> {
    let item_type: ItemType = item_type.parse()?;
    app_state.context.clear_cache(item_type)?;
    Ok(StatusCode::NO_CONTENT)
}
