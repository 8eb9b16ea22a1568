use async_trait::async_trait;
use rest_envelope::Page;
use sea_orm::ConnectionTrait;

use super::error::DomainError;
use super::model::{Article, Availability, NewArticle};

/// Persistence port for articles. Methods are generic over the connection so
/// callers can pass either the pooled connection or an open transaction.
#[async_trait]
pub trait ArticlesRepository: Send + Sync {
    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        availability: Option<Availability>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Article>, DomainError>;

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Article>, DomainError>;

    async fn find_by_libelle<C: ConnectionTrait>(
        &self,
        conn: &C,
        libelle: &str,
    ) -> Result<Option<Article>, DomainError>;

    async fn libelle_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        libelle: &str,
    ) -> Result<bool, DomainError>;

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        article: NewArticle,
    ) -> Result<Article, DomainError>;

    /// Persist an already-validated absolute quantity for the given article.
    async fn update_quantity<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        quantite: i64,
    ) -> Result<Article, DomainError>;
}
