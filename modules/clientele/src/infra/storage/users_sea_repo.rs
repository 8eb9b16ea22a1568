use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::model::{User, UserFilter};
use crate::domain::repo::{UserCredentials, UserRow, UsersRepository};

use super::entity::role::{self, Entity as RoleEntity};
use super::entity::user::{self, Entity as UserEntity};

pub struct SeaOrmUsersRepository;

impl SeaOrmUsersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeaOrmUsersRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// The password hash stays behind; only [`UserCredentials`] carries it out.
pub(crate) fn user_from_model(m: user::Model) -> User {
    User {
        id: m.id,
        nom: m.nom,
        prenom: m.prenom,
        login: m.login,
        role_id: m.role_id,
        active: m.active,
        photo: m.photo,
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        row: UserRow,
    ) -> Result<User, DomainError> {
        let now = Utc::now();
        let model = user::ActiveModel {
            nom: Set(row.nom),
            prenom: Set(row.prenom),
            login: Set(row.login),
            password: Set(row.password_hash),
            role_id: Set(row.role_id),
            active: Set(row.active),
            photo: Set(row.photo),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(user_from_model(model))
    }

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find_by_id(id).one(conn).await?;
        Ok(found.map(user_from_model))
    }

    async fn find_credentials<C: ConnectionTrait>(
        &self,
        conn: &C,
        login: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let found = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(conn)
            .await?;

        Ok(found.map(|m| UserCredentials {
            password_hash: m.password.clone(),
            user: user_from_model(m),
        }))
    }

    async fn login_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        login: &str,
    ) -> Result<bool, DomainError> {
        let count = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    async fn role_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        role_id: i64,
    ) -> Result<bool, DomainError> {
        let count = RoleEntity::find()
            .filter(role::Column::Id.eq(role_id))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: UserFilter,
    ) -> Result<Vec<User>, DomainError> {
        let mut query = UserEntity::find().order_by_asc(user::Column::Id);

        if let Some(active) = filter.active {
            query = query.filter(user::Column::Active.eq(active));
        }
        if let Some(role_id) = filter.role_id {
            query = query.filter(user::Column::RoleId.eq(role_id));
        }

        let rows = query.all(conn).await?;
        Ok(rows.into_iter().map(user_from_model).collect())
    }
}
