//! Position Aggregator
//!
//! Rolls a set of holdings up into a portfolio overview.

use std::cmp::Ordering;

use chrono::Utc;
use tracing::debug;

use crate::types::{percent_of, PortfolioOverview, Position, SectorAllocation};

/// Number of entries in the top and worst performer lists.
pub const PERFORMER_COUNT: usize = 3;

/// Aggregate positions, grouping the allocation by each position's sector.
pub fn aggregate(positions: &[Position]) -> PortfolioOverview {
    aggregate_by(positions, |p| p.sector.clone())
}

/// Aggregate positions, grouping the allocation by a caller-supplied key.
pub fn aggregate_by<F>(positions: &[Position], group_key: F) -> PortfolioOverview
where
    F: Fn(&Position) -> String,
{
    let total_value: f64 = positions.iter().map(|p| p.market_value).sum();
    let total_cost: f64 = positions.iter().map(|p| p.cost_basis).sum();
    let total_gain_loss: f64 = positions.iter().map(|p| p.total_gain_loss).sum();
    let day_gain_loss: f64 = positions.iter().map(Position::day_gain_loss).sum();

    let (top_performers, worst_performers) = rank_performers(positions);
    let sector_allocation = allocate(positions, total_value, group_key);

    debug!(
        "Aggregated {} positions: value={:.2} cost={:.2} groups={}",
        positions.len(),
        total_value,
        total_cost,
        sector_allocation.len()
    );

    PortfolioOverview {
        total_value,
        total_cost,
        total_gain_loss,
        total_gain_loss_percent: percent_of(total_gain_loss, total_cost),
        day_gain_loss,
        day_gain_loss_percent: percent_of(day_gain_loss, total_value),
        positions: positions.to_vec(),
        top_performers,
        worst_performers,
        sector_allocation,
        last_updated: Utc::now(),
    }
}

/// Best and worst performers by total gain/loss percent.
///
/// Positions with an undefined percent rank below every defined one. The
/// worst list is reversed so the single worst position comes first.
fn rank_performers(positions: &[Position]) -> (Vec<Position>, Vec<Position>) {
    let mut sorted: Vec<&Position> = positions.iter().collect();
    sorted.sort_by(|a, b| compare_performance_desc(a, b));

    let top = sorted
        .iter()
        .take(PERFORMER_COUNT)
        .map(|p| (*p).clone())
        .collect();
    let worst = sorted
        .iter()
        .rev()
        .take(PERFORMER_COUNT)
        .map(|p| (*p).clone())
        .collect();

    (top, worst)
}

fn compare_performance_desc(a: &Position, b: &Position) -> Ordering {
    match (a.total_gain_loss_percent, b.total_gain_loss_percent) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sum market value per group, keeping groups in first-seen order.
fn allocate<F>(positions: &[Position], total_value: f64, group_key: F) -> Vec<SectorAllocation>
where
    F: Fn(&Position) -> String,
{
    let mut groups: Vec<(String, f64)> = Vec::new();
    for position in positions {
        let key = group_key(position);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, value)) => *value += position.market_value,
            None => groups.push((key, position.market_value)),
        }
    }

    groups
        .into_iter()
        .map(|(sector, value)| SectorAllocation {
            sector,
            value,
            percentage: percent_of(value, total_value),
        })
        .collect()
}
