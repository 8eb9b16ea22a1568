use async_trait::async_trait;
use chrono::Utc;
use rest_envelope::Page;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::model::{Article, Availability, NewArticle};
use crate::domain::repo::ArticlesRepository;

use super::entity::article::{self, Entity as ArticleEntity};

pub struct SeaOrmArticlesRepository;

impl SeaOrmArticlesRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeaOrmArticlesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl From<article::Model> for Article {
    fn from(m: article::Model) -> Self {
        Self {
            id: m.id,
            reference: m.reference,
            libelle: m.libelle,
            prix: m.prix,
            quantite: m.quantite,
        }
    }
}

#[async_trait]
impl ArticlesRepository for SeaOrmArticlesRepository {
    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        availability: Option<Availability>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Article>, DomainError> {
        let mut query = ArticleEntity::find().order_by_asc(article::Column::Id);

        if let Some(availability) = availability {
            query = match availability {
                Availability::Available => query.filter(article::Column::Quantite.gt(0)),
                Availability::Unavailable => query.filter(article::Column::Quantite.eq(0)),
            };
        }

        let paginator = query.paginate(conn, per_page);
        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page - 1)
            .await?
            .into_iter()
            .map(Article::from)
            .collect();

        Ok(Page::new(items, total, page, per_page))
    }

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Article>, DomainError> {
        let found = ArticleEntity::find_by_id(id).one(conn).await?;
        Ok(found.map(Article::from))
    }

    async fn find_by_libelle<C: ConnectionTrait>(
        &self,
        conn: &C,
        libelle: &str,
    ) -> Result<Option<Article>, DomainError> {
        let found = ArticleEntity::find()
            .filter(article::Column::Libelle.eq(libelle))
            .one(conn)
            .await?;
        Ok(found.map(Article::from))
    }

    async fn libelle_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        libelle: &str,
    ) -> Result<bool, DomainError> {
        let count = ArticleEntity::find()
            .filter(article::Column::Libelle.eq(libelle))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        new_article: NewArticle,
    ) -> Result<Article, DomainError> {
        let now = Utc::now();
        let model = article::ActiveModel {
            reference: Set(new_article.reference),
            libelle: Set(new_article.libelle),
            prix: Set(new_article.prix),
            quantite: Set(new_article.quantite),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(model.into())
    }

    async fn update_quantity<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        quantite: i64,
    ) -> Result<Article, DomainError> {
        let model = ArticleEntity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| DomainError::article_not_found(id))?;

        let mut active: article::ActiveModel = model.into();
        active.quantite = Set(quantite);
        active.updated_at = Set(Utc::now());

        let updated = active.update(conn).await?;
        Ok(updated.into())
    }
}
