use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router, middleware};

use crate::domain::service::{AuthService, ClientsService, UsersService};
use crate::infra::storage::clients_sea_repo::SeaOrmClientsRepository;
use crate::infra::storage::tokens_sea_repo::SeaOrmTokensRepository;
use crate::infra::storage::users_sea_repo::SeaOrmUsersRepository;

use super::auth::require_auth;
use super::handlers;

/// Concrete service types wired by the server binary.
pub type ConcreteClientsService = ClientsService<SeaOrmClientsRepository, SeaOrmUsersRepository>;
pub type ConcreteUsersService = UsersService<SeaOrmUsersRepository>;
pub type ConcreteAuthService = AuthService<SeaOrmUsersRepository, SeaOrmTokensRepository>;

/// The wired services this module mounts.
#[derive(Clone)]
pub struct ClienteleServices {
    pub clients: Arc<ConcreteClientsService>,
    pub users: Arc<ConcreteUsersService>,
    pub auth: Arc<ConcreteAuthService>,
}

/// Clientele routes, mounted under `/v1` by the server.
///
/// `/login`, `/logout` and `/register` are public; everything else sits
/// behind the bearer-token gate.
pub fn router(services: ClienteleServices) -> Router {
    let protected = Router::new()
        .route("/clients", get(handlers::list_clients).post(handlers::store_client))
        .route("/storeClient", post(handlers::store_client))
        .route("/clients/{telephone}", get(handlers::get_by_telephone))
        .route("/clients/{id}/user", get(handlers::client_for_user))
        .route("/users", get(handlers::list_users))
        .route("/users/{id}", get(handlers::get_user))
        .route("/store", post(handlers::store_user))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&services.auth),
            require_auth,
        ));

    let public = Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/register", post(handlers::register));

    public
        .merge(protected)
        .layer(Extension(services.clients))
        .layer(Extension(services.users))
        .layer(Extension(services.auth))
}
