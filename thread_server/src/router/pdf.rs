use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use thread_resolver::ChainKind;
use thread_util::parse_numeric_id;

use crate::{error::Result, router::page::chain_page, state::AppState};

pub fn pdf_router() -> Router<AppState> {
    Router::new()
        .route("/pdf/thread/:id", get(thread_pdf))
        .route("/pdf/retweet/:id", get(quote_pdf))
}

async fn thread_pdf(State(app_state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse> {
    chain_pdf(&app_state, ChainKind::Thread, parse_numeric_id(&id)?).await
}

async fn quote_pdf(State(app_state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse> {
    chain_pdf(&app_state, ChainKind::Quote, parse_numeric_id(&id)?).await
}

async fn chain_pdf(app_state: &AppState, kind: ChainKind, status_id: u64) -> Result<impl IntoResponse> {
    let page = chain_page(app_state, kind, status_id, true).await?;
    let pdf = app_state.pdf.render(&page.into_string()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, attachment(status_id)),
        ],
        pdf,
    ))
}

fn attachment(status_id: u64) -> String {
    format!("attachment; filename=\"{}.pdf\"", status_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app_state, ROOT, USER};

    use axum::http::StatusCode;

    #[test]
    fn test_attachment_is_named_by_status_id() {
        assert_eq!(attachment(20), "attachment; filename=\"20.pdf\"");
    }

    #[tokio::test]
    async fn test_non_numeric_id_never_reaches_headers() {
        let state = app_state(&[USER, ROOT]);
        for id in ["abc", "0", "x\"; evil=\"1 https://twitter.com/a/status/10"] {
            let response = thread_pdf(State(state.clone()), Path(id.to_string()))
                .await
                .into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", id);
            assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
        }
    }

    #[tokio::test]
    async fn test_renderer_failure_is_server_error() {
        let state = app_state(&[USER, ROOT]);
        let response = quote_pdf(State(state), Path("10".to_string())).await.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
