use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::error::DomainError;
use super::model::{Client, ClientWithUser, ClientFilter, User, UserFilter};

/// Row-level input for client insertion (the embedded account is handled by
/// the service inside the same transaction).
#[derive(Debug, Clone)]
pub struct ClientRow {
    pub surname: String,
    pub adresse: String,
    pub telephone: String,
    pub email: Option<String>,
}

/// Row-level input for user insertion; `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub password_hash: String,
    pub role_id: i64,
    pub active: String,
    pub photo: Option<String>,
}

/// A user paired with its stored password hash, for credential checks only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait ClientsRepository: Send + Sync {
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        row: ClientRow,
    ) -> Result<Client, DomainError>;

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Client>, DomainError>;

    async fn find_by_telephone<C: ConnectionTrait>(
        &self,
        conn: &C,
        telephone: &str,
    ) -> Result<Option<Client>, DomainError>;

    async fn find_by_user_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Option<Client>, DomainError>;

    /// Point the client at its newly created account.
    async fn set_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        client_id: i64,
        user_id: i64,
    ) -> Result<Client, DomainError>;

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: ClientFilter,
    ) -> Result<Vec<ClientWithUser>, DomainError>;
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        row: UserRow,
    ) -> Result<User, DomainError>;

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<User>, DomainError>;

    async fn find_credentials<C: ConnectionTrait>(
        &self,
        conn: &C,
        login: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;

    async fn login_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        login: &str,
    ) -> Result<bool, DomainError>;

    async fn role_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        role_id: i64,
    ) -> Result<bool, DomainError>;

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: UserFilter,
    ) -> Result<Vec<User>, DomainError>;
}

#[async_trait]
pub trait TokensRepository: Send + Sync {
    /// Store the digest of a freshly issued token.
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        token_hash: &str,
    ) -> Result<(), DomainError>;

    /// Resolve a token digest to its user, if the session exists.
    async fn find_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Delete the session. Returns whether a row was removed.
    async fn revoke<C: ConnectionTrait>(
        &self,
        conn: &C,
        token_hash: &str,
    ) -> Result<bool, DomainError>;
}
