use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::collection::repo_types::Condition;

/// Namespace for catalogue ids, so the same coin keeps its id across refreshes.
const COIN_NAMESPACE: Uuid = Uuid::from_u128(0x3f1c_9a47_2b6e_4d08_a5c3_7e90_1d2b_6f84);

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CoinRecord {
    pub id: Uuid,
    pub country: String,
    pub year: i32,
    pub description: String,
    pub mintage: i64,
    pub image_url: String,
    pub value_fdc: f64,
    pub value_bu: f64,
    pub value_be: f64,
}

impl CoinRecord {
    /// Deterministic id for a `(country, year, description)` triple.
    pub fn stable_id(country: &str, year: i32, description: &str) -> Uuid {
        let key = format!("{}|{}|{}", country.trim(), year, description.trim());
        Uuid::new_v5(&COIN_NAMESPACE, key.as_bytes())
    }

    /// Estimated value for the given grading condition.
    pub fn value_for(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Fdc => self.value_fdc,
            Condition::Bu => self.value_bu,
            Condition::Be => self.value_be,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.country.trim().is_empty() {
            return Err("country is empty".into());
        }
        if self.description.trim().is_empty() {
            return Err("description is empty".into());
        }
        if self.mintage < 0 {
            return Err(format!("negative mintage {}", self.mintage));
        }
        for (name, v) in [
            ("value_fdc", self.value_fdc),
            ("value_bu", self.value_bu),
            ("value_be", self.value_be),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {v}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::CoinRecord;

    pub fn coin(country: &str, year: i32, description: &str, fdc: f64, bu: f64, be: f64) -> CoinRecord {
        CoinRecord {
            id: CoinRecord::stable_id(country, year, description),
            country: country.into(),
            year,
            description: description.into(),
            mintage: 1_000_000,
            image_url: format!("https://img.example/{year}.jpg"),
            value_fdc: fdc,
            value_bu: bu,
            value_be: be,
        }
    }
}
