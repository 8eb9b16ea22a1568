//! Router-level tests: the auth gate and envelope shape through the axum stack.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

use clientele::api::rest::routes::{self, ClienteleServices};
use clientele::infra::security::argon_hasher::ArgonPasswordHasher;
use clientele::infra::security::loyalty::LoggingLoyaltyNotifier;
use clientele::infra::storage::clients_sea_repo::SeaOrmClientsRepository;
use clientele::infra::storage::migrations::Migrator;
use clientele::infra::storage::tokens_sea_repo::SeaOrmTokensRepository;
use clientele::infra::storage::users_sea_repo::SeaOrmUsersRepository;

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let db = Arc::new(db);

    let clients_repo = Arc::new(SeaOrmClientsRepository::new());
    let users_repo = Arc::new(SeaOrmUsersRepository::new());
    let tokens_repo = Arc::new(SeaOrmTokensRepository::new());
    let hasher = Arc::new(ArgonPasswordHasher::new());

    let services = ClienteleServices {
        clients: Arc::new(routes::ConcreteClientsService::new(
            Arc::clone(&db),
            clients_repo,
            Arc::clone(&users_repo),
            hasher.clone(),
            Arc::new(LoggingLoyaltyNotifier::new()),
        )),
        users: Arc::new(routes::ConcreteUsersService::new(
            Arc::clone(&db),
            Arc::clone(&users_repo),
            hasher.clone(),
        )),
        auth: Arc::new(routes::ConcreteAuthService::new(
            db,
            users_repo,
            tokens_repo,
            hasher,
        )),
    };
    Router::new().nest("/v1", routes::router(services))
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

fn post_json_bearer(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn seeded_router_with_admin() -> (Router, String) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let db = Arc::new(db);

    let clients_repo = Arc::new(SeaOrmClientsRepository::new());
    let users_repo = Arc::new(SeaOrmUsersRepository::new());
    let tokens_repo = Arc::new(SeaOrmTokensRepository::new());
    let hasher = Arc::new(ArgonPasswordHasher::new());

    let users_svc = routes::ConcreteUsersService::new(
        Arc::clone(&db),
        Arc::clone(&users_repo),
        hasher.clone(),
    );
    users_svc
        .store_user(clientele::domain::model::NewUser {
            nom: "Sow".to_owned(),
            prenom: "Moussa".to_owned(),
            login: "admin".to_owned(),
            password: "secret123".to_owned(),
            photo: None,
            role_id: clientele::domain::model::ROLE_ADMIN,
            active: "OUI".to_owned(),
        })
        .await
        .unwrap();

    let services = ClienteleServices {
        clients: Arc::new(routes::ConcreteClientsService::new(
            Arc::clone(&db),
            clients_repo,
            Arc::clone(&users_repo),
            hasher.clone(),
            Arc::new(LoggingLoyaltyNotifier::new()),
        )),
        users: Arc::new(users_svc),
        auth: Arc::new(routes::ConcreteAuthService::new(
            db,
            users_repo,
            tokens_repo,
            hasher,
        )),
    };
    let router = Router::new().nest("/v1", routes::router(services));

    let (status, body) = send(
        &router,
        post_json("/v1/login", json!({ "login": "admin", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_owned();
    (router, token)
}

#[tokio::test]
async fn protected_routes_answer_401_without_a_token() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        Request::builder()
            .uri("/v1/clients")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], json!(401));
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_401_envelope() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        post_json("/v1/login", json!({ "login": "ghost", "password": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], json!(401));
    assert_eq!(body["message"], json!("Login ou mot de passe incorrect"));
}

#[tokio::test]
async fn store_client_with_token_returns_201_envelope() {
    let (router, token) = seeded_router_with_admin().await;

    let (status, body) = send(
        &router,
        post_json_bearer(
            "/v1/storeClient",
            &token,
            json!({
                "surname": "Diallo",
                "adresse": "Dakar",
                "telephone": "770000001",
                "email": "diallo@example.test",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("success"));
    assert_eq!(body["message"], json!("Client ajouté avec succès."));
    assert_eq!(body["data"]["telephone"], json!("770000001"));
    assert!(body["data"]["user"].is_null());
}

#[tokio::test]
async fn unknown_telephone_yields_404_envelope() {
    let (router, token) = seeded_router_with_admin().await;

    let (status, body) = send(&router, get_bearer("/v1/clients/779999999", &token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], json!(404));
}

#[tokio::test]
async fn users_listing_requires_admin_role() {
    let (router, admin_token) = seeded_router_with_admin().await;

    // an admin passes
    let (status, _) = send(&router, get_bearer("/v1/users", &admin_token)).await;
    assert_eq!(status, StatusCode::OK);

    // a boutiquier account is refused
    let (status, _) = send(
        &router,
        post_json_bearer(
            "/v1/store",
            &admin_token,
            json!({
                "nom": "Ba",
                "prenom": "Awa",
                "login": "shop",
                "password": "secret123",
                "role_id": 2,
                "active": "OUI",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(
        &router,
        post_json("/v1/login", json!({ "login": "shop", "password": "secret123" })),
    )
    .await;
    let shop_token = body["data"]["token"].as_str().unwrap();

    let (status, body) = send(&router, get_bearer("/v1/users", shop_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], json!(403));
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let (router, token) = seeded_router_with_admin().await;

    let (status, body) = send(
        &router,
        post_json_bearer("/v1/logout", &token, json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Déconnexion réussie."));

    let (status, _) = send(&router, get_bearer("/v1/clients", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
