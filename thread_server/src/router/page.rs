use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::Deserialize;

use thread_resolver::{ChainKind, RenderedThread};
use thread_util::{parse_numeric_id, parse_status_id};

use crate::{error::Result, state::AppState, view};

pub fn page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/about", get(about))
        .route("/action", post(action))
        .route("/thread/:id", get(thread_page))
        .route("/retweet/:id", get(quote_page))
}

async fn homepage() -> Html<String> {
    Html(view::homepage().into_string())
}

async fn about() -> Html<String> {
    Html(view::about().into_string())
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    let page = view::error_page(StatusCode::NOT_FOUND, "No such page");
    (StatusCode::NOT_FOUND, Html(page.into_string()))
}

/// Form posted by the homepage.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionForm {
    #[serde(rename = "type", default = "default_action_type")]
    pub kind: String,
    #[serde(default)]
    pub status: String,
}

fn default_action_type() -> String {
    ChainKind::Thread.to_string()
}

async fn action(Form(form): Form<ActionForm>) -> Result<Redirect> {
    Ok(Redirect::to(&action_target(&form)?))
}

/// The page an action form leads to. The status is validated before the action type.
fn action_target(form: &ActionForm) -> Result<String> {
    let status_id = parse_status_id(&form.status)?;
    let kind: ChainKind = form.kind.parse()?;
    Ok(format!("/{}/{}", kind, status_id))
}

async fn thread_page(State(app_state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let page = chain_page(&app_state, ChainKind::Thread, parse_numeric_id(&id)?, false).await?;
    Ok(Html(page.into_string()))
}

async fn quote_page(State(app_state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let page = chain_page(&app_state, ChainKind::Quote, parse_numeric_id(&id)?, false).await?;
    Ok(Html(page.into_string()))
}

/// Resolve a chain and render its page. A missing status anywhere in the chain is reported
/// as the requested status not being found.
pub async fn chain_page(app_state: &AppState, kind: ChainKind, status_id: u64, pdf: bool) -> Result<Markup> {
    let thread = app_state
        .context
        .resolve(kind, status_id)
        .await
        .map_err(|e| match e {
            thread_core::Error::ObjectNotFound(_) => thread_core::Error::ObjectNotFound(format!("status {}", status_id)),
            e => e,
        })?;
    let thread = RenderedThread::from(thread);
    Ok(view::status_page(&thread, status_id, pdf))
}
