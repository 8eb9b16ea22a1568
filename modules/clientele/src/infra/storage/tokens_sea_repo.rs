use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait,
    QueryFilter,
};

use crate::domain::error::DomainError;
use crate::domain::model::User;
use crate::domain::repo::TokensRepository;

use super::entity::access_token::{self, Entity as TokenEntity};
use super::entity::user;
use super::users_sea_repo::user_from_model;

pub struct SeaOrmTokensRepository;

impl SeaOrmTokensRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeaOrmTokensRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokensRepository for SeaOrmTokensRepository {
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        token_hash: &str,
    ) -> Result<(), DomainError> {
        access_token::ActiveModel {
            user_id: Set(user_id),
            token_hash: Set(token_hash.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        Ok(())
    }

    async fn find_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(token) = TokenEntity::find()
            .filter(access_token::Column::TokenHash.eq(token_hash))
            .one(conn)
            .await?
        else {
            return Ok(None);
        };

        let found = token.find_related(user::Entity).one(conn).await?;
        Ok(found.map(user_from_model))
    }

    async fn revoke<C: ConnectionTrait>(
        &self,
        conn: &C,
        token_hash: &str,
    ) -> Result<bool, DomainError> {
        let result = TokenEntity::delete_many()
            .filter(access_token::Column::TokenHash.eq(token_hash))
            .exec(conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
