//! End-to-end HTTP tests driving the service through its axum router,
//! mirroring the scenarios in spec.md §8.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use typeahead::auth::AuthTable;
use typeahead::http::router;
use typeahead::query::LARGE;
use typeahead::service::Facade;
use typeahead::store::memory::MemoryStore;
use typeahead::tokenizer::MAX_WORD_LEN;

fn app() -> axum::Router {
    let store = Arc::new(MemoryStore::new());
    let auth = Arc::new(AuthTable::new());
    auth.insert("xyz123", "peterbecom");
    router(Arc::new(Facade::new(store, auth, LARGE, MAX_WORD_LEN)))
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn homepage_returns_200() {
    let resp = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/gobblygook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

async fn post_doc(app: &axum::Router, auth: &str, body: &str) -> StatusCode {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1")
                .header("Auth-Key", auth)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    resp.status()
}

#[tokio::test]
async fn s1_basic_insert_and_search() {
    let app = app();
    let status = post_doc(
        &app,
        "xyz123",
        "url=%20%2Fplog%2Fsomething%20%20%20&popularity=12&title=This+is+a+blog+about+something",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1?q=blo&d=peterbecom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["terms"], serde_json::json!(["blo"]));
    assert_eq!(
        body["results"],
        serde_json::json!([["/plog/something", "This is a blog about something"]])
    );
}

#[tokio::test]
async fn s2_unicode_folding_round_trips() {
    let app = app();
    post_doc(
        &app,
        "xyz123",
        "url=%2Fa&title=Bl%C3%B6gged+about+something+else",
    )
    .await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1?q=blog&d=peterbecom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["terms"], serde_json::json!(["blog"]));
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/v1?q=bl%C3%B6g&d=peterbecom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["terms"], serde_json::json!(["blög", "blog"]));
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn s4_pagination_clamping() {
    let app = app();
    for i in 1..=19 {
        post_doc(
            &app,
            "xyz123",
            &format!("url=%2Fpage%2F{i}&title=Page+{i}"),
        )
        .await;
    }

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1?q=pag&d=peterbecom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 10);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1?q=pag&d=peterbecom&n=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1?q=pag&d=peterbecom&n=-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 10);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/v1?q=pag&d=peterbecom&n=x")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn s6_delete_is_precise() {
    let app = app();
    post_doc(&app, "xyz123", "url=%2Fa&title=abalone").await;
    post_doc(&app, "xyz123", "url=%2Fb&title=abacus").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1?url=%2Fa")
                .header("Auth-Key", "xyz123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/v1?q=ab&d=peterbecom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(
        body["results"],
        serde_json::json!([["/b", "abacus"]])
    );
}

#[tokio::test]
async fn s7_group_filter() {
    let app = app();
    post_doc(&app, "xyz123", "url=%2Fpage%2Fpublic&title=This+is+public").await;
    post_doc(
        &app,
        "xyz123",
        "url=%2Fpage%2Fprivate&title=This+is+private&groups=private",
    )
    .await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1?q=thi&d=peterbecom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/v1?q=thi&d=peterbecom&g=private")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn bad_auth_key_is_forbidden() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("url=%2Fa&title=Title"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn tenant_isolation() {
    let store = Arc::new(MemoryStore::new());
    let auth = Arc::new(AuthTable::new());
    auth.insert("xyz123", "peterbecom");
    auth.insert("abc987", "air.mozilla.org");
    let app = router(Arc::new(Facade::new(store, auth, LARGE, MAX_WORD_LEN)));

    post_doc(&app, "xyz123", "url=%2Fa&title=About+blog").await;
    post_doc(&app, "abc987", "url=%2Fb&title=Also+about+the+word+blog").await;

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/v1?q=blo&d=peterbecom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0][0], "/a");
}
