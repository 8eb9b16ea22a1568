use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use rest_envelope::{ApiError, ApiResponse, ApiResult, EnvelopedResponse, Page};
use tracing::field::Empty;

use crate::domain::model::Availability;

use super::dto::{
    ArticleDto, BulkResultDto, FindByLibelleReq, ListArticlesQuery, StockUpdateReq,
    StockUpdateResultDto, StoreArticlesReq, UpdateQuantiteReq,
};
use super::routes::ConcreteArticlesService;

/// GET /v1/article — paginated listing with the `disponible` filter.
#[utoipa::path(
    get,
    path = "/v1/article",
    params(
        ("disponible" = Option<String>, Query, description = "oui | non"),
        ("per_page" = Option<u64>, Query, description = "Page size, defaults to 10"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
    ),
    responses((status = 200, description = "Paginated article list")),
    tag = "articles",
)]
#[tracing::instrument(skip(svc, query), fields(request_id = Empty))]
pub(crate) async fn list_articles(
    Extension(svc): Extension<Arc<ConcreteArticlesService>>,
    Query(query): Query<ListArticlesQuery>,
) -> ApiResult<EnvelopedResponse<Page<ArticleDto>>> {
    let availability = Availability::from_param(query.disponible.as_deref());
    let page = svc
        .list_articles(availability, query.page, query.per_page)
        .await?;

    Ok(ApiResponse::ok(
        page.map(ArticleDto::from),
        "Liste des articles.",
    ))
}

/// GET /v1/articles/{id}
#[utoipa::path(
    get,
    path = "/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article found", body = ArticleDto),
        (status = 404, description = "Article not found"),
    ),
    tag = "articles",
)]
#[tracing::instrument(skip(svc), fields(article_id = id, request_id = Empty))]
pub(crate) async fn get_article(
    Extension(svc): Extension<Arc<ConcreteArticlesService>>,
    Path(id): Path<i64>,
) -> ApiResult<EnvelopedResponse<ArticleDto>> {
    let article = svc.get_article(id).await?;
    Ok(ApiResponse::ok(article.into(), "Article trouvé."))
}

/// POST /v1/articles/libelle — lookup by exact libelle.
#[utoipa::path(
    post,
    path = "/v1/articles/libelle",
    request_body = FindByLibelleReq,
    responses(
        (status = 200, description = "Article found", body = ArticleDto),
        (status = 404, description = "No article with this libelle"),
    ),
    tag = "articles",
)]
#[tracing::instrument(skip(svc, req), fields(request_id = Empty))]
pub(crate) async fn find_by_libelle(
    Extension(svc): Extension<Arc<ConcreteArticlesService>>,
    Json(req): Json<FindByLibelleReq>,
) -> ApiResult<EnvelopedResponse<ArticleDto>> {
    let article = svc.find_by_libelle(&req.libelle).await?;
    Ok(ApiResponse::ok(article.into(), "Article trouvé."))
}

/// PATCH /v1/articles/{id} — additive quantity update.
#[utoipa::path(
    patch,
    path = "/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateQuantiteReq,
    responses(
        (status = 200, description = "Updated article", body = ArticleDto),
        (status = 400, description = "Resulting quantity would be negative"),
        (status = 404, description = "Article not found"),
    ),
    tag = "articles",
)]
#[tracing::instrument(skip(svc, req), fields(article_id = id, request_id = Empty))]
pub(crate) async fn update_quantity(
    Extension(svc): Extension<Arc<ConcreteArticlesService>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateQuantiteReq>,
) -> ApiResult<EnvelopedResponse<ArticleDto>> {
    let article = svc.update_quantity(id, req.quantite).await?;
    Ok(ApiResponse::ok(article.into(), "Quantité mise à jour."))
}

/// POST /v1/storeArticle — bulk import with per-item outcomes.
#[utoipa::path(
    post,
    path = "/v1/storeArticle",
    request_body = StoreArticlesReq,
    responses(
        (status = 201, description = "All articles created", body = BulkResultDto),
        (status = 400, description = "Some items failed; both lists enumerated"),
    ),
    tag = "articles",
)]
#[tracing::instrument(skip(svc, req), fields(count = req.articles.len(), request_id = Empty))]
pub(crate) async fn store_articles(
    Extension(svc): Extension<Arc<ConcreteArticlesService>>,
    Json(req): Json<StoreArticlesReq>,
) -> ApiResult<EnvelopedResponse<BulkResultDto>> {
    let outcome = svc
        .bulk_create(req.articles.into_iter().map(Into::into).collect())
        .await?;

    let result = BulkResultDto::from(outcome);
    if result.failures.is_empty() {
        Ok(ApiResponse::created(result, "Articles ajoutés avec succès."))
    } else {
        Err(
            ApiError::validation("Certains articles n'ont pas pu être ajoutés.")
                .with_detail(result),
        )
    }
}

/// POST /v1/stock — best-effort additive stock update, always 200.
#[utoipa::path(
    post,
    path = "/v1/stock",
    request_body = StockUpdateReq,
    responses((status = 200, description = "Stock updated", body = StockUpdateResultDto)),
    tag = "articles",
)]
#[tracing::instrument(skip(svc, req), fields(count = req.articles.len(), request_id = Empty))]
pub(crate) async fn update_stock(
    Extension(svc): Extension<Arc<ConcreteArticlesService>>,
    Json(req): Json<StockUpdateReq>,
) -> ApiResult<EnvelopedResponse<StockUpdateResultDto>> {
    let applied = svc
        .apply_stock_deltas(req.articles.into_iter().map(Into::into).collect())
        .await?;

    Ok(ApiResponse::ok(
        StockUpdateResultDto { applied },
        "Stock mis à jour avec succès.",
    ))
}
