use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Grading condition of an owned coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Fleur de coin (mint).
    #[serde(rename = "FDC")]
    Fdc,
    /// Brilliant uncirculated.
    #[serde(rename = "BU")]
    Bu,
    /// Belle épreuve (proof).
    #[serde(rename = "BE")]
    Be,
}

impl Condition {
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Fdc => "FDC",
            Condition::Bu => "BU",
            Condition::Be => "BE",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FDC" => Ok(Condition::Fdc),
            "BU" => Ok(Condition::Bu),
            "BE" => Ok(Condition::Be),
            _ => Err(format!("Invalid condition '{s}', expected one of FDC, BU, BE")),
        }
    }
}

/// A coin owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub coin_id: Uuid,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub added_date: OffsetDateTime,
}

impl CollectionItem {
    pub fn new(user_id: Uuid, coin_id: Uuid, condition: Condition, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            coin_id,
            condition,
            notes,
            added_date: OffsetDateTime::now_utc(),
        }
    }
}

/// Raw `collection_items` row; condition is stored as text.
#[derive(Debug, FromRow)]
pub struct CollectionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub coin_id: Uuid,
    pub condition: String,
    pub notes: Option<String>,
    pub added_date: OffsetDateTime,
}

impl TryFrom<CollectionRow> for CollectionItem {
    type Error = anyhow::Error;

    fn try_from(r: CollectionRow) -> Result<Self, Self::Error> {
        let condition = r
            .condition
            .parse::<Condition>()
            .map_err(|e| anyhow::anyhow!("row {}: {}", r.id, e))?;
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            coin_id: r.coin_id,
            condition,
            notes: r.notes,
            added_date: r.added_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_conditions_case_insensitively() {
        assert_eq!("fdc".parse::<Condition>().unwrap(), Condition::Fdc);
        assert_eq!(" Bu ".parse::<Condition>().unwrap(), Condition::Bu);
        assert_eq!("BE".parse::<Condition>().unwrap(), Condition::Be);
        assert!("UNC".parse::<Condition>().is_err());
        assert!("".parse::<Condition>().is_err());
    }

    #[test]
    fn serializes_condition_as_uppercase_code() {
        let item = CollectionItem::new(Uuid::new_v4(), Uuid::new_v4(), Condition::Bu, None);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["condition"], "BU");
        assert!(json.get("notes").is_none());
        assert!(json["added_date"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn row_with_unknown_condition_is_rejected() {
        let row = CollectionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            coin_id: Uuid::new_v4(),
            condition: "mint".into(),
            notes: None,
            added_date: OffsetDateTime::now_utc(),
        };
        assert!(CollectionItem::try_from(row).is_err());
    }
}
