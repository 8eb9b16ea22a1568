use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock item. `quantite` is invariant-bound to stay >= 0; it is only ever
/// mutated by applying a signed delta to the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub reference: String,
    pub libelle: String,
    pub prix: Decimal,
    pub quantite: i64,
}

/// Input for bulk article creation.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub libelle: String,
    pub quantite: i64,
    pub prix: Decimal,
    pub reference: String,
}

/// One line of a best-effort stock update: the delta is applied only when the
/// id resolves and the supplied libelle matches the stored one.
#[derive(Debug, Clone)]
pub struct StockDelta {
    pub id: i64,
    pub libelle: String,
    pub quantite: i64,
}

/// Availability predicate compiled from the `disponible` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// `quantite > 0`
    Available,
    /// `quantite == 0`
    Unavailable,
}

impl Availability {
    /// `"oui"` and `"non"` select a predicate; anything else (including an
    /// absent parameter) means no filter, never an error.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        match value {
            Some("oui") => Some(Self::Available),
            Some("non") => Some(Self::Unavailable),
            _ => None,
        }
    }
}

/// Per-item failure of a bulk creation.
#[derive(Debug, Clone, Serialize)]
pub struct BulkFailure {
    pub index: usize,
    pub libelle: String,
    pub reason: String,
}

/// Outcome of a bulk creation: partial success, never a whole-batch abort.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub created: Vec<Article>,
    pub failures: Vec<BulkFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_parses_oui_non() {
        assert_eq!(
            Availability::from_param(Some("oui")),
            Some(Availability::Available)
        );
        assert_eq!(
            Availability::from_param(Some("non")),
            Some(Availability::Unavailable)
        );
    }

    #[test]
    fn availability_ignores_unknown_values() {
        assert_eq!(Availability::from_param(None), None);
        assert_eq!(Availability::from_param(Some("")), None);
        assert_eq!(Availability::from_param(Some("OUI")), None);
        assert_eq!(Availability::from_param(Some("peut-etre")), None);
    }
}
