use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::model::{ACTIVE_NON, ACTIVE_OUI, NewUser, User, UserFilter};
use crate::domain::ports::PasswordHasher;
use crate::domain::repo::{UserRow, UsersRepository};

/// User listing and administrative account creation.
pub struct UsersService<R: UsersRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R: UsersRepository> UsersService<R> {
    pub fn new(db: Arc<DatabaseConnection>, repo: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { db, repo, hasher }
    }

    /// The `active` filter value is case-normalized to uppercase before the
    /// exact match.
    #[instrument(skip(self))]
    pub async fn list_users(&self, mut filter: UserFilter) -> Result<Vec<User>, DomainError> {
        filter.active = filter.active.map(|v| v.to_uppercase());
        let users = self.repo.list(self.db.as_ref(), filter).await?;
        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    #[instrument(skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .get(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(skip(self, new_user), fields(login = %new_user.login))]
    pub async fn store_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        if new_user.login.trim().is_empty() {
            return Err(DomainError::validation("login", "ne doit pas être vide"));
        }
        let active = new_user.active.to_uppercase();
        if active != ACTIVE_OUI && active != ACTIVE_NON {
            return Err(DomainError::validation("active", "doit valoir OUI ou NON"));
        }
        if !self.repo.role_exists(self.db.as_ref(), new_user.role_id).await? {
            return Err(DomainError::role_not_found(new_user.role_id));
        }
        if self.repo.login_exists(self.db.as_ref(), &new_user.login).await? {
            return Err(DomainError::login_already_exists(new_user.login));
        }

        let password_hash = self.hasher.hash(&new_user.password)?;
        let user = self
            .repo
            .insert(
                self.db.as_ref(),
                UserRow {
                    nom: new_user.nom,
                    prenom: new_user.prenom,
                    login: new_user.login,
                    password_hash,
                    role_id: new_user.role_id,
                    active,
                    photo: new_user.photo,
                },
            )
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }
}
