use serde::Deserialize;

use crate::{coins::query::CoinFilter, error::AppError};

/// `GET /coins` query string. Blank values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct CoinQuery {
    pub country: Option<String>,
    pub year: Option<String>,
    pub search: Option<String>,
}

impl TryFrom<CoinQuery> for CoinFilter {
    type Error = AppError;

    fn try_from(q: CoinQuery) -> Result<Self, Self::Error> {
        let year = match non_blank(q.year) {
            Some(y) => Some(
                y.parse::<i32>()
                    .map_err(|_| AppError::InvalidArgument(format!("Invalid year: {y}")))?,
            ),
            None => None,
        };
        Ok(CoinFilter {
            text: non_blank(q.search),
            country: non_blank(q.country),
            year,
        })
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
