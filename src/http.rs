//! The HTTP surface (spec.md §6): a thin shell dispatching to the
//! [`Facade`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Deserialize;

use crate::error::AppError;
use crate::service::Facade;

const HOMEPAGE: &str = "<!doctype html>\
<html><head><title>typeahead</title></head><body>\
<h1>typeahead</h1>\
<p>GET /v1?q=&lt;query&gt;&amp;d=&lt;domain&gt; for autocomplete results.</p>\
<p>POST /v1 with an <code>Auth-Key</code> header to index a document.</p>\
</body></html>";

pub fn router(facade: Arc<Facade>) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/v1", get(search).post(submit).delete(remove))
        .fallback(not_found)
        .with_state(facade)
}

async fn homepage() -> Html<&'static str> {
    Html(HOMEPAGE)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

fn auth_key(headers: &HeaderMap) -> Option<&str> {
    headers.get("Auth-Key").and_then(|v| v.to_str().ok())
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    d: Option<String>,
    n: Option<String>,
    g: Option<String>,
}

async fn search(
    State(facade): State<Arc<Facade>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let q = params.q.unwrap_or_default();
    let resp = facade.search(&q, params.d.as_deref(), params.n.as_deref(), params.g.as_deref())?;
    Ok(Json(resp))
}

async fn submit(
    State(facade): State<Arc<Facade>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let key = auth_key(&headers).map(|s| s.to_string());
    let url = form.get("url").cloned().unwrap_or_default();
    let title = form.get("title").cloned().unwrap_or_default();
    let popularity = form.get("popularity").cloned();
    let groups = form.get("groups").cloned();

    facade.submit(
        key.as_deref(),
        &url,
        &title,
        popularity.as_deref(),
        groups.as_deref(),
    )?;
    Ok(StatusCode::CREATED)
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    url: Option<String>,
}

async fn remove(
    State(facade): State<Arc<Facade>>,
    headers: HeaderMap,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    let key = auth_key(&headers).map(|s| s.to_string());
    let url = params.url.unwrap_or_default();
    facade.remove(key.as_deref(), &url)?;
    Ok(StatusCode::NO_CONTENT)
}
