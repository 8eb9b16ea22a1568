use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::domain::service::ArticlesService;
use crate::infra::storage::articles_sea_repo::SeaOrmArticlesRepository;

use super::handlers;

/// Concrete service type wired by the server binary.
pub type ConcreteArticlesService = ArticlesService<SeaOrmArticlesRepository>;

/// Article routes, mounted under `/v1` by the server.
pub fn router(service: Arc<ConcreteArticlesService>) -> Router {
    Router::new()
        .route("/article", get(handlers::list_articles))
        .route(
            "/articles/{id}",
            get(handlers::get_article).patch(handlers::update_quantity),
        )
        .route("/articles/libelle", post(handlers::find_by_libelle))
        .route("/storeArticle", post(handlers::store_articles))
        .route("/stock", post(handlers::update_stock))
        .layer(Extension(service))
}
