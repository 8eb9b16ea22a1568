use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::HeaderMap;
use axum::{Extension, Json};
use rest_envelope::{ApiError, ApiResponse, ApiResult, EnvelopedResponse};
use tracing::field::Empty;

use crate::domain::model::{ClientFilter, ROLE_ADMIN, UserFilter, parse_oui_non};

use super::auth::{CurrentUser, bearer_token};
use super::dto::{
    ClientDto, ListClientsQuery, ListUsersQuery, LoginDto, LoginReq, RegisterReq, StoreClientReq,
    StoreUserReq, UserDto,
};
use super::routes::{ConcreteAuthService, ConcreteClientsService, ConcreteUsersService};

/// POST /v1/clients — create a client, optionally with an embedded account.
#[utoipa::path(
    post,
    path = "/v1/clients",
    request_body = StoreClientReq,
    responses(
        (status = 201, description = "Client created", body = ClientDto),
        (status = 400, description = "Validation failed or login already taken"),
        (status = 404, description = "Referenced role does not exist"),
    ),
    tag = "clients",
)]
#[tracing::instrument(skip(svc, req), fields(request_id = Empty))]
pub(crate) async fn store_client(
    Extension(svc): Extension<Arc<ConcreteClientsService>>,
    Json(req): Json<StoreClientReq>,
) -> ApiResult<EnvelopedResponse<ClientDto>> {
    let created = svc.create_client(req.into()).await?;
    Ok(ApiResponse::created(
        created.into(),
        "Client ajouté avec succès.",
    ))
}

/// GET /v1/clients — listing with the `comptes` / `active` filters.
#[utoipa::path(
    get,
    path = "/v1/clients",
    params(
        ("comptes" = Option<String>, Query, description = "oui = with account, non = without"),
        ("active" = Option<String>, Query, description = "oui = active account, non = inactive"),
    ),
    responses((status = 200, description = "Client list")),
    tag = "clients",
)]
#[tracing::instrument(skip(svc, query), fields(request_id = Empty))]
pub(crate) async fn list_clients(
    Extension(svc): Extension<Arc<ConcreteClientsService>>,
    Query(query): Query<ListClientsQuery>,
) -> ApiResult<EnvelopedResponse<Vec<ClientDto>>> {
    let filter = ClientFilter {
        has_account: parse_oui_non(query.comptes.as_deref()),
        account_active: parse_oui_non(query.active.as_deref()),
    };
    let clients = svc.list_clients(filter).await?;
    Ok(ApiResponse::ok(
        clients.into_iter().map(ClientDto::from).collect(),
        "Liste des clients.",
    ))
}

/// GET /v1/clients/{telephone} — lookup by the natural key.
#[utoipa::path(
    get,
    path = "/v1/clients/{telephone}",
    params(("telephone" = String, Path, description = "9-character telephone number")),
    responses(
        (status = 200, description = "Client found", body = ClientDto),
        (status = 400, description = "Telephone number is not 9 characters"),
        (status = 404, description = "No client with this telephone"),
    ),
    tag = "clients",
)]
#[tracing::instrument(skip(svc), fields(request_id = Empty))]
pub(crate) async fn get_by_telephone(
    Extension(svc): Extension<Arc<ConcreteClientsService>>,
    Path(telephone): Path<String>,
) -> ApiResult<EnvelopedResponse<ClientDto>> {
    let client = svc.find_by_telephone(&telephone).await?;
    Ok(ApiResponse::ok(client.into(), "Client trouvé."))
}

/// GET /v1/clients/{id}/user — resolve the client owning an account.
#[utoipa::path(
    get,
    path = "/v1/clients/{id}/user",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Client with its account", body = ClientDto),
        (status = 404, description = "Unknown user or user without client"),
    ),
    tag = "clients",
)]
#[tracing::instrument(skip(svc), fields(user_id = id, request_id = Empty))]
pub(crate) async fn client_for_user(
    Extension(svc): Extension<Arc<ConcreteClientsService>>,
    Path(id): Path<i64>,
) -> ApiResult<EnvelopedResponse<ClientDto>> {
    let found = svc.client_for_user(id).await?;
    Ok(ApiResponse::ok(found.into(), "Client trouvé."))
}

/// POST /v1/register — self-registration of an account for an existing client.
#[utoipa::path(
    post,
    path = "/v1/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created", body = ClientDto),
        (status = 400, description = "Login already taken"),
        (status = 404, description = "Unknown client"),
    ),
    tag = "auth",
)]
#[tracing::instrument(skip(svc, req), fields(client_id = req.client.id, request_id = Empty))]
pub(crate) async fn register(
    Extension(svc): Extension<Arc<ConcreteClientsService>>,
    Json(req): Json<RegisterReq>,
) -> ApiResult<EnvelopedResponse<ClientDto>> {
    let created = svc.register_account(req.into()).await?;
    Ok(ApiResponse::created(
        created.into(),
        "Compte créer avec succès.",
    ))
}

/// POST /v1/login — issue an opaque bearer token.
#[utoipa::path(
    post,
    path = "/v1/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Token issued", body = LoginDto),
        (status = 401, description = "Bad credentials or inactive account"),
    ),
    tag = "auth",
)]
#[tracing::instrument(skip(svc, req), fields(request_id = Empty))]
pub(crate) async fn login(
    Extension(svc): Extension<Arc<ConcreteAuthService>>,
    Json(req): Json<LoginReq>,
) -> ApiResult<EnvelopedResponse<LoginDto>> {
    let (token, user) = svc.login(&req.login, &req.password).await?;
    Ok(ApiResponse::ok(
        LoginDto {
            token,
            user: user.into(),
        },
        "Connexion réussie.",
    ))
}

/// POST /v1/logout — revoke the bearer token carried by the request.
#[utoipa::path(
    post,
    path = "/v1/logout",
    responses(
        (status = 200, description = "Session revoked"),
        (status = 401, description = "Missing or unknown token"),
    ),
    tag = "auth",
)]
#[tracing::instrument(skip(svc, headers), fields(request_id = Empty))]
pub(crate) async fn logout(
    Extension(svc): Extension<Arc<ConcreteAuthService>>,
    headers: HeaderMap,
) -> ApiResult<EnvelopedResponse<()>> {
    let token =
        bearer_token(&headers).ok_or_else(|| ApiError::unauthorized("Authentification requise"))?;
    svc.logout(token).await?;
    Ok(ApiResponse::empty("Déconnexion réussie."))
}

/// GET /v1/users — listing, restricted to ADMIN accounts.
#[utoipa::path(
    get,
    path = "/v1/users",
    params(
        ("active" = Option<String>, Query, description = "OUI | NON, case-insensitive"),
        ("role_id" = Option<i64>, Query, description = "Exact role filter"),
    ),
    responses(
        (status = 200, description = "User list"),
        (status = 403, description = "Caller is not an ADMIN"),
    ),
    tag = "users",
)]
#[tracing::instrument(skip(svc, current, query), fields(request_id = Empty))]
pub(crate) async fn list_users(
    Extension(svc): Extension<Arc<ConcreteUsersService>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<EnvelopedResponse<Vec<UserDto>>> {
    if current.0.role_id != ROLE_ADMIN {
        return Err(ApiError::forbidden("Accès réservé aux administrateurs"));
    }
    let filter = UserFilter {
        active: query.active,
        role_id: query.role_id,
    };
    let users = svc.list_users(filter).await?;
    Ok(ApiResponse::ok(
        users.into_iter().map(UserDto::from).collect(),
        "Liste des utilisateurs.",
    ))
}

/// GET /v1/users/{id}
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Unknown user"),
    ),
    tag = "users",
)]
#[tracing::instrument(skip(svc), fields(user_id = id, request_id = Empty))]
pub(crate) async fn get_user(
    Extension(svc): Extension<Arc<ConcreteUsersService>>,
    Path(id): Path<i64>,
) -> ApiResult<EnvelopedResponse<UserDto>> {
    let user = svc.get_user(id).await?;
    Ok(ApiResponse::ok(user.into(), "Utilisateur trouvé."))
}

/// POST /v1/store — administrative user creation.
#[utoipa::path(
    post,
    path = "/v1/store",
    request_body = StoreUserReq,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failed or login already taken"),
        (status = 404, description = "Referenced role does not exist"),
    ),
    tag = "users",
)]
#[tracing::instrument(skip(svc, req), fields(login = %req.login, request_id = Empty))]
pub(crate) async fn store_user(
    Extension(svc): Extension<Arc<ConcreteUsersService>>,
    Json(req): Json<StoreUserReq>,
) -> ApiResult<EnvelopedResponse<UserDto>> {
    let user = svc.store_user(req.into()).await?;
    Ok(ApiResponse::created(
        user.into(),
        "Utilisateur créé avec succès.",
    ))
}
