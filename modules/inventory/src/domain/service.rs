use std::sync::Arc;

use rest_envelope::Page;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::instrument;

use super::error::DomainError;
use super::model::{Article, Availability, BulkFailure, BulkOutcome, NewArticle, StockDelta};
use super::repo::ArticlesRepository;

/// Page size applied when `per_page` is not supplied.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Article stock manager.
///
/// Handlers call service methods with business parameters only; the service
/// acquires the connection and centralizes validation and error mapping.
pub struct ArticlesService<R: ArticlesRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
}

impl<R: ArticlesRepository> ArticlesService<R> {
    pub fn new(db: Arc<DatabaseConnection>, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    #[instrument(skip(self))]
    pub async fn list_articles(
        &self,
        availability: Option<Availability>,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<Page<Article>, DomainError> {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);

        let page = self
            .repo
            .list(self.db.as_ref(), availability, page, per_page)
            .await?;

        tracing::debug!(total = page.total, "Listed articles");
        Ok(page)
    }

    #[instrument(skip(self), fields(article_id = id))]
    pub async fn get_article(&self, id: i64) -> Result<Article, DomainError> {
        self.repo
            .get(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| DomainError::article_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn find_by_libelle(&self, libelle: &str) -> Result<Article, DomainError> {
        if libelle.trim().is_empty() {
            return Err(DomainError::validation("libelle", "ne doit pas être vide"));
        }
        self.repo
            .find_by_libelle(self.db.as_ref(), libelle)
            .await?
            .ok_or_else(|| DomainError::libelle_not_found(libelle))
    }

    /// Bulk import. Each item is validated and inserted independently; a
    /// failing item produces a failure entry and never aborts the batch.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn bulk_create(&self, items: Vec<NewArticle>) -> Result<BulkOutcome, DomainError> {
        let mut outcome = BulkOutcome::default();

        for (index, item) in items.into_iter().enumerate() {
            match self.create_one(&outcome, &item).await {
                Ok(article) => outcome.created.push(article),
                Err(e) => {
                    tracing::debug!(index, libelle = %item.libelle, error = %e, "Article rejected");
                    outcome.failures.push(BulkFailure {
                        index,
                        libelle: item.libelle,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            created = outcome.created.len(),
            failed = outcome.failures.len(),
            "Bulk article import finished"
        );
        Ok(outcome)
    }

    async fn create_one(
        &self,
        outcome: &BulkOutcome,
        item: &NewArticle,
    ) -> Result<Article, DomainError> {
        if item.libelle.trim().is_empty() {
            return Err(DomainError::validation("libelle", "ne doit pas être vide"));
        }
        if item.quantite < 0 {
            return Err(DomainError::validation(
                "quantite",
                "doit être supérieure ou égale à 0",
            ));
        }
        if item.prix < Decimal::ZERO {
            return Err(DomainError::validation(
                "prix",
                "doit être supérieur ou égal à 0",
            ));
        }

        // Uniqueness is checked against the table and against items already
        // created earlier in this batch.
        let duplicate_in_batch = outcome.created.iter().any(|a| a.libelle == item.libelle);
        if duplicate_in_batch || self.repo.libelle_exists(self.db.as_ref(), &item.libelle).await? {
            return Err(DomainError::validation("libelle", "existe déjà"));
        }

        self.repo.insert(self.db.as_ref(), item.clone()).await
    }

    /// Best-effort additive stock update. Lines whose id does not resolve,
    /// whose libelle does not match the stored one, or whose delta would drive
    /// the quantity negative are skipped without error. Returns the number of
    /// rows actually updated.
    #[instrument(skip(self, deltas), fields(count = deltas.len()))]
    pub async fn apply_stock_deltas(&self, deltas: Vec<StockDelta>) -> Result<u64, DomainError> {
        let mut applied = 0u64;

        for delta in deltas {
            let Some(article) = self.repo.get(self.db.as_ref(), delta.id).await? else {
                tracing::debug!(id = delta.id, "Stock line skipped: unknown article");
                continue;
            };
            if article.libelle != delta.libelle {
                tracing::debug!(
                    id = delta.id,
                    supplied = %delta.libelle,
                    stored = %article.libelle,
                    "Stock line skipped: libelle mismatch"
                );
                continue;
            }
            let new_quantity = article.quantite + delta.quantite;
            if new_quantity < 0 {
                tracing::debug!(id = delta.id, "Stock line skipped: would go negative");
                continue;
            }

            self.repo
                .update_quantity(self.db.as_ref(), delta.id, new_quantity)
                .await?;
            applied += 1;
        }

        tracing::info!(applied, "Stock update applied");
        Ok(applied)
    }

    /// Additive quantity update for a single article. The delta is validated
    /// against the stored value before any mutation.
    #[instrument(skip(self), fields(article_id = id))]
    pub async fn update_quantity(&self, id: i64, delta: i64) -> Result<Article, DomainError> {
        let article = self
            .repo
            .get(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| DomainError::article_not_found(id))?;

        let new_quantity = article.quantite + delta;
        if new_quantity < 0 {
            return Err(DomainError::validation(
                "quantite",
                "la quantité résultante ne peut pas être négative",
            ));
        }

        self.repo
            .update_quantity(self.db.as_ref(), id, new_quantity)
            .await
    }
}
