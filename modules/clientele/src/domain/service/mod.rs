mod auth;
mod clients;
mod users;

pub use auth::AuthService;
pub use clients::ClientsService;
pub use users::UsersService;
