//! Stock lookups.

use crate::services::query::QueryError;
use crate::types::{Record, RelatedStock, Relation, Stock};

/// Default number of related stocks returned.
pub const DEFAULT_RELATED_COUNT: usize = 5;

fn relation(target: &Stock, other: &Stock) -> Option<Relation> {
    match (other.sector == target.sector, other.industry == target.industry) {
        (true, true) => Some(Relation::SameSectorAndIndustry),
        (true, false) => Some(Relation::SameSector),
        (false, true) => Some(Relation::SameIndustry),
        (false, false) => None,
    }
}

/// Stocks sharing a sector or industry with `symbol`, in listing order,
/// at most `count` of them. The stock itself is excluded.
pub fn related_stocks(
    stocks: &[Stock],
    symbol: &str,
    count: usize,
) -> Result<Vec<RelatedStock>, QueryError> {
    let target = stocks
        .iter()
        .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| QueryError::NotFound {
            entity: Stock::ENTITY,
            id: symbol.to_string(),
        })?;

    Ok(stocks
        .iter()
        .filter(|s| s.symbol != target.symbol)
        .filter_map(|s| {
            relation(target, s).map(|relation| RelatedStock {
                symbol: s.symbol.clone(),
                name: s.name.clone(),
                sector: s.sector.clone(),
                industry: s.industry.clone(),
                current_price: s.current_price,
                day_change_percent: s.day_change_percent,
                market_cap: s.market_cap,
                relation,
            })
        })
        .take(count)
        .collect())
}
