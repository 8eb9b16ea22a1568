use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{
    Client, ClientWithUser, NewAccount, NewClient, NewUser, RegisterAccount, User,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub role_id: i64,
    pub active: String,
    pub photo: Option<String>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            nom: u.nom,
            prenom: u.prenom,
            login: u.login,
            role_id: u.role_id,
            active: u.active,
            photo: u.photo,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientDto {
    pub id: i64,
    pub surname: String,
    pub adresse: String,
    pub telephone: String,
    pub email: Option<String>,
    pub user: Option<UserDto>,
}

impl ClientDto {
    pub fn from_parts(client: Client, user: Option<User>) -> Self {
        Self {
            id: client.id,
            surname: client.surname,
            adresse: client.adresse,
            telephone: client.telephone,
            email: client.email,
            user: user.map(UserDto::from),
        }
    }
}

impl From<ClientWithUser> for ClientDto {
    fn from(c: ClientWithUser) -> Self {
        Self::from_parts(c.client, c.user)
    }
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self::from_parts(c, None)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleRefDto {
    pub id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmbeddedUserReq {
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub password: String,
    pub photo: Option<String>,
    pub role: RoleRefDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StoreClientReq {
    pub surname: String,
    pub adresse: String,
    pub telephone: String,
    pub email: Option<String>,
    pub user: Option<EmbeddedUserReq>,
}

impl From<StoreClientReq> for NewClient {
    fn from(r: StoreClientReq) -> Self {
        Self {
            surname: r.surname,
            adresse: r.adresse,
            telephone: r.telephone,
            email: r.email,
            user: r.user.map(|u| NewAccount {
                nom: u.nom,
                prenom: u.prenom,
                login: u.login,
                password: u.password,
                photo: u.photo,
                role_id: u.role.id,
            }),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClientRefDto {
    pub id: i64,
}

/// Self-registration of an account for an existing client.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterReq {
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub password: String,
    pub photo: Option<String>,
    pub client: ClientRefDto,
}

impl From<RegisterReq> for RegisterAccount {
    fn from(r: RegisterReq) -> Self {
        Self {
            client_id: r.client.id,
            nom: r.nom,
            prenom: r.prenom,
            login: r.login,
            password: r.password,
            photo: r.photo,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StoreUserReq {
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub password: String,
    pub photo: Option<String>,
    pub role_id: i64,
    pub active: String,
}

impl From<StoreUserReq> for NewUser {
    fn from(r: StoreUserReq) -> Self {
        Self {
            nom: r.nom,
            prenom: r.prenom,
            login: r.login,
            password: r.password,
            photo: r.photo,
            role_id: r.role_id,
            active: r.active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginReq {
    pub login: String,
    pub password: String,
}

/// Login payload: the opaque bearer token plus the authenticated account.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginDto {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListClientsQuery {
    pub comptes: Option<String>,
    pub active: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListUsersQuery {
    pub active: Option<String>,
    pub role_id: Option<i64>,
}
