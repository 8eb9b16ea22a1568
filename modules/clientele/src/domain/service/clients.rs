use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::model::{
    ACTIVE_OUI, Client, ClientFilter, ClientWithUser, NewClient, RegisterAccount,
    ROLE_BOUTIQUIER, TELEPHONE_LEN,
};
use crate::domain::ports::{LoyaltyNotifier, PasswordHasher};
use crate::domain::repo::{ClientRow, ClientsRepository, UserRow, UsersRepository};

/// Client-account linker.
///
/// Joint Client+User creation runs inside a single transaction: either both
/// rows exist afterwards or neither does. The loyalty notification is
/// dispatched after commit on a detached task and never affects the result.
pub struct ClientsService<CR: ClientsRepository, UR: UsersRepository> {
    db: Arc<DatabaseConnection>,
    clients: Arc<CR>,
    users: Arc<UR>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn LoyaltyNotifier>,
}

impl<CR: ClientsRepository, UR: UsersRepository> ClientsService<CR, UR> {
    pub fn new(
        db: Arc<DatabaseConnection>,
        clients: Arc<CR>,
        users: Arc<UR>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn LoyaltyNotifier>,
    ) -> Self {
        Self {
            db,
            clients,
            users,
            hasher,
            notifier,
        }
    }

    #[instrument(skip(self, new_client), fields(telephone = %new_client.telephone))]
    pub async fn create_client(
        &self,
        new_client: NewClient,
    ) -> Result<ClientWithUser, DomainError> {
        validate_telephone(&new_client.telephone)?;
        if new_client.surname.trim().is_empty() {
            return Err(DomainError::validation("surname", "ne doit pas être vide"));
        }

        let txn = self.db.begin().await?;
        match self.create_client_in_txn(&txn, new_client).await {
            Ok(created) => {
                txn.commit().await?;
                tracing::info!(client_id = created.client.id, "Client created");
                self.dispatch_loyalty_card(&created.client);
                Ok(created)
            }
            Err(e) => {
                if let Err(rb) = txn.rollback().await {
                    tracing::error!(error = %rb, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn create_client_in_txn(
        &self,
        txn: &DatabaseTransaction,
        new_client: NewClient,
    ) -> Result<ClientWithUser, DomainError> {
        let client = self
            .clients
            .insert(
                txn,
                ClientRow {
                    surname: new_client.surname,
                    adresse: new_client.adresse,
                    telephone: new_client.telephone,
                    email: new_client.email,
                },
            )
            .await?;

        let Some(account) = new_client.user else {
            return Ok(ClientWithUser {
                client,
                user: None,
            });
        };

        if !self.users.role_exists(txn, account.role_id).await? {
            return Err(DomainError::role_not_found(account.role_id));
        }
        if self.users.login_exists(txn, &account.login).await? {
            return Err(DomainError::login_already_exists(account.login));
        }

        let password_hash = self.hasher.hash(&account.password)?;
        let user = self
            .users
            .insert(
                txn,
                UserRow {
                    nom: account.nom,
                    prenom: account.prenom,
                    login: account.login,
                    password_hash,
                    role_id: account.role_id,
                    active: ACTIVE_OUI.to_owned(),
                    photo: account.photo,
                },
            )
            .await?;

        let client = self.clients.set_user(txn, client.id, user.id).await?;
        Ok(ClientWithUser {
            client,
            user: Some(user),
        })
    }

    /// Create an account for an existing client. The role is always
    /// BOUTIQUIER; full rollback on any step failure.
    #[instrument(skip(self, reg), fields(client_id = reg.client_id))]
    pub async fn register_account(
        &self,
        reg: RegisterAccount,
    ) -> Result<ClientWithUser, DomainError> {
        let client = self
            .clients
            .get(self.db.as_ref(), reg.client_id)
            .await?
            .ok_or_else(|| DomainError::client_not_found(reg.client_id))?;

        let txn = self.db.begin().await?;
        match self.register_in_txn(&txn, client, reg).await {
            Ok(created) => {
                txn.commit().await?;
                tracing::info!(client_id = created.client.id, "Account registered");
                Ok(created)
            }
            Err(e) => {
                if let Err(rb) = txn.rollback().await {
                    tracing::error!(error = %rb, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn register_in_txn(
        &self,
        txn: &DatabaseTransaction,
        client: Client,
        reg: RegisterAccount,
    ) -> Result<ClientWithUser, DomainError> {
        if self.users.login_exists(txn, &reg.login).await? {
            return Err(DomainError::login_already_exists(reg.login));
        }

        let password_hash = self.hasher.hash(&reg.password)?;
        let user = self
            .users
            .insert(
                txn,
                UserRow {
                    nom: reg.nom,
                    prenom: reg.prenom,
                    login: reg.login,
                    password_hash,
                    role_id: ROLE_BOUTIQUIER,
                    active: ACTIVE_OUI.to_owned(),
                    photo: reg.photo,
                },
            )
            .await?;

        let client = self.clients.set_user(txn, client.id, user.id).await?;
        Ok(ClientWithUser {
            client,
            user: Some(user),
        })
    }

    #[instrument(skip(self))]
    pub async fn find_by_telephone(&self, telephone: &str) -> Result<Client, DomainError> {
        validate_telephone(telephone)?;
        self.clients
            .find_by_telephone(self.db.as_ref(), telephone)
            .await?
            .ok_or_else(|| DomainError::telephone_not_found(telephone))
    }

    /// Resolve the client owning the given account. The user is resolved
    /// first, matching the original lookup order.
    #[instrument(skip(self), fields(user_id))]
    pub async fn client_for_user(&self, user_id: i64) -> Result<ClientWithUser, DomainError> {
        let user = self
            .users
            .get(self.db.as_ref(), user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        let client = self
            .clients
            .find_by_user_id(self.db.as_ref(), user_id)
            .await?
            .ok_or_else(|| DomainError::client_not_found(user_id))?;

        Ok(ClientWithUser {
            client,
            user: Some(user),
        })
    }

    #[instrument(skip(self))]
    pub async fn list_clients(
        &self,
        filter: ClientFilter,
    ) -> Result<Vec<ClientWithUser>, DomainError> {
        let clients = self.clients.list(self.db.as_ref(), filter).await?;
        tracing::debug!(count = clients.len(), "Listed clients");
        Ok(clients)
    }

    /// Best-effort, fire-and-forget. Requires an email; a failure is logged
    /// and never surfaced to the caller.
    fn dispatch_loyalty_card(&self, client: &Client) {
        let Some(email) = client.email.clone() else {
            return;
        };
        let notifier = Arc::clone(&self.notifier);
        let client = client.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_loyalty_card(&client, &email).await {
                tracing::warn!(
                    client_id = client.id,
                    error = %e,
                    "Loyalty card notification failed"
                );
            }
        });
    }
}

fn validate_telephone(telephone: &str) -> Result<(), DomainError> {
    if telephone.chars().count() != TELEPHONE_LEN {
        return Err(DomainError::validation(
            "telephone",
            format!("doit contenir exactement {TELEPHONE_LEN} caractères"),
        ));
    }
    Ok(())
}
