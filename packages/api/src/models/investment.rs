use serde::{Deserialize, Serialize};
use store::Keyed;

use super::{de_id, de_opt_id};

/// A holding: an investor's fractions in one property. Everything except
/// `current_value` and `fractions_owned` is server-computed and read-only;
/// those two change only through their dedicated admin endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub property_id: Option<String>,
    /// Denormalized for admin tables; absent on some endpoints.
    #[serde(default)]
    pub property_title: Option<String>,
    #[serde(default)]
    pub investor_email: Option<String>,
    #[serde(default)]
    pub fractions_owned: u32,
    #[serde(default)]
    pub initial_value: f64,
    #[serde(default)]
    pub current_value: f64,
    #[serde(default)]
    pub ownership_percentage: f64,
    #[serde(default)]
    pub growth_percentage: f64,
    #[serde(default)]
    pub growth_amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Investment {
    pub fn is_growing(&self) -> bool {
        self.growth_amount > 0.0
    }
}

impl Keyed for Investment {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_and_missing_growth_decode() {
        let json = r#"{"id": 5, "user_id": 2, "property_id": "p7", "fractions_owned": 10, "initial_value": 50000.0, "current_value": 61000.0}"#;
        let investment: Investment = serde_json::from_str(json).unwrap();
        assert_eq!(investment.id, "5");
        assert_eq!(investment.user_id.as_deref(), Some("2"));
        assert_eq!(investment.growth_amount, 0.0);
        assert!(!investment.is_growing());
    }
}
