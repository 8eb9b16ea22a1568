use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::model::{ACTIVE_NON, ACTIVE_OUI, Client, ClientFilter, ClientWithUser};
use crate::domain::repo::{ClientRow, ClientsRepository};

use super::entity::client::{self, Entity as ClientEntity};
use super::entity::user;
use super::users_sea_repo::user_from_model;

pub struct SeaOrmClientsRepository;

impl SeaOrmClientsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeaOrmClientsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl From<client::Model> for Client {
    fn from(m: client::Model) -> Self {
        Self {
            id: m.id,
            surname: m.surname,
            adresse: m.adresse,
            telephone: m.telephone,
            email: m.email,
            user_id: m.user_id,
        }
    }
}

#[async_trait]
impl ClientsRepository for SeaOrmClientsRepository {
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        row: ClientRow,
    ) -> Result<Client, DomainError> {
        let now = Utc::now();
        let model = client::ActiveModel {
            surname: Set(row.surname),
            adresse: Set(row.adresse),
            telephone: Set(row.telephone),
            email: Set(row.email),
            user_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(model.into())
    }

    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Client>, DomainError> {
        let found = ClientEntity::find_by_id(id).one(conn).await?;
        Ok(found.map(Client::from))
    }

    async fn find_by_telephone<C: ConnectionTrait>(
        &self,
        conn: &C,
        telephone: &str,
    ) -> Result<Option<Client>, DomainError> {
        let found = ClientEntity::find()
            .filter(client::Column::Telephone.eq(telephone))
            .one(conn)
            .await?;
        Ok(found.map(Client::from))
    }

    async fn find_by_user_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Option<Client>, DomainError> {
        let found = ClientEntity::find()
            .filter(client::Column::UserId.eq(user_id))
            .one(conn)
            .await?;
        Ok(found.map(Client::from))
    }

    async fn set_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        client_id: i64,
        user_id: i64,
    ) -> Result<Client, DomainError> {
        let model = ClientEntity::find_by_id(client_id)
            .one(conn)
            .await?
            .ok_or_else(|| DomainError::client_not_found(client_id))?;

        let mut active: client::ActiveModel = model.into();
        active.user_id = Set(Some(user_id));
        active.updated_at = Set(Utc::now());

        let updated = active.update(conn).await?;
        Ok(updated.into())
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: ClientFilter,
    ) -> Result<Vec<ClientWithUser>, DomainError> {
        let mut query = ClientEntity::find()
            .find_also_related(user::Entity)
            .order_by_asc(client::Column::Id);

        if let Some(has_account) = filter.has_account {
            query = if has_account {
                query.filter(client::Column::UserId.is_not_null())
            } else {
                query.filter(client::Column::UserId.is_null())
            };
        }
        if let Some(active) = filter.account_active {
            let flag = if active { ACTIVE_OUI } else { ACTIVE_NON };
            query = query.filter(user::Column::Active.eq(flag));
        }

        let rows = query.all(conn).await?;
        Ok(rows
            .into_iter()
            .map(|(c, u)| ClientWithUser {
                client: c.into(),
                user: u.map(user_from_model),
            })
            .collect())
    }
}
