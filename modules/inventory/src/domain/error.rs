use sea_orm::DbErr;
use thiserror::Error;

/// Domain-specific errors for the inventory module.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Article non trouvé: {id}")]
    ArticleNotFound { id: i64 },

    #[error("Objet non trouvé: {libelle}")]
    LibelleNotFound { libelle: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    #[must_use]
    pub fn article_not_found(id: i64) -> Self {
        Self::ArticleNotFound { id }
    }

    pub fn libelle_not_found(libelle: impl Into<String>) -> Self {
        Self::LibelleNotFound {
            libelle: libelle.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        Self::database(e.to_string())
    }
}
