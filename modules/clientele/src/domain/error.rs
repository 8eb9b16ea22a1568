use sea_orm::DbErr;
use thiserror::Error;

/// Domain-specific errors for the clientele module.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Client non trouvé: {id}")]
    ClientNotFound { id: i64 },

    #[error("Aucun client trouvé avec ce numéro de téléphone")]
    TelephoneNotFound { telephone: String },

    #[error("Utilisateur non trouvé: {id}")]
    UserNotFound { id: i64 },

    #[error("Role non trouvé: {id}")]
    RoleNotFound { id: i64 },

    #[error("Le login '{login}' existe déjà")]
    LoginAlreadyExists { login: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Login ou mot de passe incorrect")]
    Unauthorized,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    #[must_use]
    pub fn client_not_found(id: i64) -> Self {
        Self::ClientNotFound { id }
    }

    pub fn telephone_not_found(telephone: impl Into<String>) -> Self {
        Self::TelephoneNotFound {
            telephone: telephone.into(),
        }
    }

    #[must_use]
    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    #[must_use]
    pub fn role_not_found(id: i64) -> Self {
        Self::RoleNotFound { id }
    }

    pub fn login_already_exists(login: impl Into<String>) -> Self {
        Self::LoginAlreadyExists {
            login: login.into(),
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

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        Self::database(e.to_string())
    }
}
