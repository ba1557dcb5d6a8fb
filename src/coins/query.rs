use std::cmp::Reverse;

use crate::coins::repo_types::CoinRecord;

/// Catalogue listing filter. Every present field must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinFilter {
    /// Case-insensitive substring of the description or the country.
    pub text: Option<String>,
    pub country: Option<String>,
    pub year: Option<i32>,
}

impl CoinFilter {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.country.is_none() && self.year.is_none()
    }

    pub fn matches(&self, coin: &CoinRecord) -> bool {
        if let Some(country) = &self.country {
            if coin.country != *country {
                return false;
            }
        }
        if let Some(year) = self.year {
            if coin.year != year {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !coin.description.to_lowercase().contains(&needle)
                && !coin.country.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Listing order: newest year first, then country, then description.
pub fn sort_catalogue(coins: &mut [CoinRecord]) {
    coins.sort_by(|a, b| {
        (Reverse(a.year), &a.country, &a.description, a.id)
            .cmp(&(Reverse(b.year), &b.country, &b.description, b.id))
    });
}
