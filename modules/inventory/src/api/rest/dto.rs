use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{Article, BulkFailure, BulkOutcome, NewArticle, StockDelta};

/// Wire shape of an article, matching the original resource fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub reference: String,
    pub libelle: String,
    pub prix: Decimal,
    pub quantite: i64,
}

impl From<Article> for ArticleDto {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            reference: a.reference,
            libelle: a.libelle,
            prix: a.prix,
            quantite: a.quantite,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListArticlesQuery {
    pub disponible: Option<String>,
    pub per_page: Option<u64>,
    pub page: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FindByLibelleReq {
    pub libelle: String,
}

/// `quantite` is a signed delta added to the stored value, not a replacement.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantiteReq {
    pub quantite: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StoreArticlesReq {
    pub articles: Vec<NewArticleReq>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewArticleReq {
    pub libelle: String,
    pub quantite: i64,
    pub prix: Decimal,
    pub reference: String,
}

impl From<NewArticleReq> for NewArticle {
    fn from(r: NewArticleReq) -> Self {
        Self {
            libelle: r.libelle,
            quantite: r.quantite,
            prix: r.prix,
            reference: r.reference,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockUpdateReq {
    pub articles: Vec<StockDeltaReq>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockDeltaReq {
    pub id: i64,
    pub libelle: String,
    pub quantite: i64,
}

impl From<StockDeltaReq> for StockDelta {
    fn from(r: StockDeltaReq) -> Self {
        Self {
            id: r.id,
            libelle: r.libelle,
            quantite: r.quantite,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkFailureDto {
    pub index: usize,
    pub libelle: String,
    pub reason: String,
}

impl From<BulkFailure> for BulkFailureDto {
    fn from(f: BulkFailure) -> Self {
        Self {
            index: f.index,
            libelle: f.libelle,
            reason: f.reason,
        }
    }
}

/// Both lists are always enumerated, whatever the HTTP status.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkResultDto {
    pub added_articles: Vec<ArticleDto>,
    pub failures: Vec<BulkFailureDto>,
}

impl From<BulkOutcome> for BulkResultDto {
    fn from(o: BulkOutcome) -> Self {
        Self {
            added_articles: o.created.into_iter().map(ArticleDto::from).collect(),
            failures: o.failures.into_iter().map(BulkFailureDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockUpdateResultDto {
    pub applied: u64,
}
