pub mod market;
pub mod portfolio;
pub mod query;
pub mod risk;
pub mod seed;
pub mod session;
pub mod store;
pub mod strategy;

pub use market::{related_stocks, DEFAULT_RELATED_COUNT};
pub use portfolio::{aggregate, aggregate_by};
pub use query::{find_by_id, query, query_fields, QueryError};
pub use risk::{
    analyze, analyze_strategy, analyze_with_overrides, classify, raw_var_fraction, summarize,
    validate_params, RiskError,
};
pub use seed::{generate, SeedCounts, SeedData, Seeder};
pub use session::{RiskSession, RiskSessionStore, SessionError, SessionSnapshot, SessionTotals};
pub use store::RecordStore;
pub use strategy::{decode_strategy_payload, encode_strategy_payload, parse_legacy_symbols};
