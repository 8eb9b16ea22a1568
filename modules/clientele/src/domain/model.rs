use serde::{Deserialize, Serialize};

/// Role reference data, seeded by migration.
pub const ROLE_ADMIN: i64 = 1;
pub const ROLE_BOUTIQUIER: i64 = 2;

/// Textual states of the `active` flag.
pub const ACTIVE_OUI: &str = "OUI";
pub const ACTIVE_NON: &str = "NON";

/// Required length of a client telephone number, the natural lookup key.
pub const TELEPHONE_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub surname: String,
    pub adresse: String,
    pub telephone: String,
    pub email: Option<String>,
    /// `None` means "no account yet".
    pub user_id: Option<i64>,
}

/// A user account. The password hash never leaves the repository layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub role_id: i64,
    pub active: String,
    pub photo: Option<String>,
}

/// A client together with its (possibly absent) account.
#[derive(Debug, Clone, Serialize)]
pub struct ClientWithUser {
    pub client: Client,
    pub user: Option<User>,
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub surname: String,
    pub adresse: String,
    pub telephone: String,
    pub email: Option<String>,
    /// Embedded account specification for atomic joint creation.
    pub user: Option<NewAccount>,
}

/// Account details supplied inline with a client creation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub password: String,
    pub photo: Option<String>,
    pub role_id: i64,
}

/// Account registration for an existing client; the role is fixed to
/// BOUTIQUIER by the service.
#[derive(Debug, Clone)]
pub struct RegisterAccount {
    pub client_id: i64,
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub password: String,
    pub photo: Option<String>,
}

/// Administrative user creation (role and active flag chosen by the caller).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nom: String,
    pub prenom: String,
    pub login: String,
    pub password: String,
    pub photo: Option<String>,
    pub role_id: i64,
    pub active: String,
}

/// Filters for the client listing, compiled from `comptes` / `active`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientFilter {
    /// `Some(true)` = has an account, `Some(false)` = has none.
    pub has_account: Option<bool>,
    /// `Some(true)` = account flag is `"OUI"`, `Some(false)` = `"NON"`.
    pub account_active: Option<bool>,
}

/// Filters for the user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Exact match, case-normalized to uppercase by the service.
    pub active: Option<String>,
    pub role_id: Option<i64>,
}

/// `"oui"` / `"non"` query parameters compile to a boolean predicate;
/// anything else means "no filter", never an error.
#[must_use]
pub fn parse_oui_non(value: Option<&str>) -> Option<bool> {
    match value {
        Some("oui") => Some(true),
        Some("non") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oui_non_parses() {
        assert_eq!(parse_oui_non(Some("oui")), Some(true));
        assert_eq!(parse_oui_non(Some("non")), Some(false));
    }

    #[test]
    fn unknown_values_mean_no_filter() {
        assert_eq!(parse_oui_non(None), None);
        assert_eq!(parse_oui_non(Some("OUI")), None);
        assert_eq!(parse_oui_non(Some("yes")), None);
        assert_eq!(parse_oui_non(Some("")), None);
    }
}
