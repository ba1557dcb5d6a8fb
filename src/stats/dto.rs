use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_coins: u64,
    /// Distinct catalogue coins owned.
    pub owned_coins: u64,
    /// Whole percent, halves rounded up.
    pub completion_percentage: u32,
    /// Estimated value of the owned items, by their condition.
    pub total_value: f64,
    pub by_country: BTreeMap<String, u64>,
}
