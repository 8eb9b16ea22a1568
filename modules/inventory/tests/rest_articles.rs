//! Router-level tests: envelope shape and status codes through the axum stack.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use inventory::api::rest::routes::{self, ConcreteArticlesService};
use inventory::infra::storage::articles_sea_repo::SeaOrmArticlesRepository;
use inventory::infra::storage::migrations::Migrator;

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let service = Arc::new(ConcreteArticlesService::new(
        Arc::new(db),
        Arc::new(SeaOrmArticlesRepository::new()),
    ));
    Router::new().nest("/v1", routes::router(service))
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn store_articles_returns_201_and_success_envelope() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        post_json(
            "/v1/storeArticle",
            json!({ "articles": [
                { "libelle": "riz", "quantite": 10, "prix": "12.50", "reference": "R-1" },
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("success"));
    assert_eq!(body["message"], json!("Articles ajoutés avec succès."));
    assert_eq!(body["data"]["added_articles"][0]["libelle"], json!("riz"));
}

#[tokio::test]
async fn store_articles_partial_failure_returns_400_with_both_lists() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        post_json(
            "/v1/storeArticle",
            json!({ "articles": [
                { "libelle": "riz", "quantite": 10, "prix": "12.50", "reference": "R-1" },
                { "libelle": "riz", "quantite": 3, "prix": "9.00", "reference": "R-2" },
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!(400));
    assert_eq!(body["data"]["added_articles"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["failures"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_article_yields_404_envelope() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        Request::builder()
            .uri("/v1/articles/123")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], json!(404));
}

#[tokio::test]
async fn stock_update_always_answers_200() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        post_json(
            "/v1/stock",
            json!({ "articles": [
                { "id": 777, "libelle": "fantome", "quantite": 4 },
            ]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Stock mis à jour avec succès."));
    assert_eq!(body["data"]["applied"], json!(0));
}

#[tokio::test]
async fn patch_with_negative_result_answers_400() {
    let router = test_router().await;

    let (_, body) = send(
        &router,
        post_json(
            "/v1/storeArticle",
            json!({ "articles": [
                { "libelle": "sucre", "quantite": 2, "prix": "3.00", "reference": "S-1" },
            ]}),
        ),
    )
    .await;
    let id = body["data"]["added_articles"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &router,
        Request::builder()
            .method("PATCH")
            .uri(format!("/v1/articles/{id}"))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "quantite": -5 }).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!(400));
}
