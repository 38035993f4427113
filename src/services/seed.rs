/**
 * Seed Data Generator
 *
 * Deterministic stand-in for a backend. The same seed always produces the
 * same records, so listings and tests are reproducible.
 */

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::types::{
    percent_of, AccountStatus, AnalystRatings, Customer, FundamentalMetrics, Notification,
    NotificationKind, Position, Product, ProductStatus, Stock, StockMetrics, TechnicalIndicators,
    User, UserRole,
};

/// 2024-01-01T00:00:00Z. Generated timestamps fall in the year before.
const ANCHOR_SECS: i64 = 1_704_067_200;
const WINDOW_DAYS: i64 = 365;

fn anchor() -> DateTime<Utc> {
    DateTime::from_timestamp(ANCHOR_SECS, 0).unwrap_or_default()
}

/// Listed securities: symbol, name, sector, industry.
pub const STOCK_TABLE: &[(&str, &str, &str, &str)] = &[
    ("AAPL", "Apple Inc.", "Technology", "Consumer Electronics"),
    ("MSFT", "Microsoft Corporation", "Technology", "Software"),
    ("GOOGL", "Alphabet Inc.", "Technology", "Internet"),
    ("AMZN", "Amazon.com Inc.", "Consumer Discretionary", "E-commerce"),
    ("TSLA", "Tesla Inc.", "Consumer Discretionary", "Electric Vehicles"),
    ("META", "Meta Platforms Inc.", "Technology", "Social Media"),
    ("NVDA", "NVIDIA Corporation", "Technology", "Semiconductors"),
    ("BRK.B", "Berkshire Hathaway Inc.", "Financials", "Insurance"),
    ("JPM", "JPMorgan Chase & Co.", "Financials", "Banking"),
    ("JNJ", "Johnson & Johnson", "Healthcare", "Pharmaceuticals"),
];

const EXCHANGES: &[&str] = &["NASDAQ", "NYSE", "AMEX"];

const PEOPLE: &[&str] = &[
    "Alice Chen", "Bob Martin", "Carol Wu", "David Li", "Eve Zhang", "Frank Zhou",
    "Grace Sun", "Henry Wang", "Ivy Zhao", "Jack Qian", "Karen Feng", "Leo Chu",
    "Mia Wei", "Noah Jiang", "Olivia Shen", "Peter Han",
];

const COMPANIES: &[&str] = &[
    "Northwind Traders", "Contoso", "Fabrikam", "Globex", "Initech", "Umbrella",
    "Stark Industries", "Wayne Enterprises", "Acme Corp", "Hooli",
];

const CITIES: &[&str] = &[
    "Beijing", "Shanghai", "Guangzhou", "Shenzhen", "Hangzhou", "Nanjing", "Wuhan",
    "Chengdu", "Xi'an", "Chongqing",
];

const CUSTOMER_TAGS: &[&str] = &["VIP", "New", "Returning", "Key account", "Prospect"];

const PRODUCT_NAMES: &[&str] = &[
    "Smartphone", "Laptop", "Tablet", "Smartwatch", "Wireless Earbuds", "Running Shoes",
    "T-Shirt", "Jeans", "Down Jacket", "Coffee Maker", "Air Purifier", "Robot Vacuum",
    "Smart Speaker", "Electric Toothbrush", "Green Tea Set", "Honey",
];

const PRODUCT_CATEGORIES: &[&str] = &[
    "Electronics", "Apparel", "Home", "Food & Beverage", "Books", "Outdoors", "Beauty",
    "Baby", "Automotive", "Office",
];

const NOTIFICATION_TITLES: &[&str] = &[
    "New user registered", "Order shipped", "Low inventory", "Scheduled maintenance",
    "Payment received", "Password reset", "Backup completed", "New message",
];

/// Seeded record producer.
pub struct Seeder {
    rng: StdRng,
}

impl Seeder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    fn date(&mut self) -> DateTime<Utc> {
        let offset = self.rng.gen_range(0..WINDOW_DAYS * 86_400);
        anchor() - Duration::seconds(offset)
    }

    pub fn users(&mut self, count: usize) -> Vec<User> {
        let roles = [UserRole::Admin, UserRole::User, UserRole::Manager];
        let statuses = [AccountStatus::Active, AccountStatus::Inactive, AccountStatus::Pending];

        (1..=count)
            .map(|n| {
                let created_at = self.date();
                let status = *self.pick(&statuses);
                let last_login_at = (status == AccountStatus::Active)
                    .then(|| created_at + Duration::days(self.rng.gen_range(0..30)));
                User {
                    id: format!("user_{}", n),
                    username: format!("user{}", n),
                    email: format!("user{}@example.com", n),
                    name: self.pick(PEOPLE).to_string(),
                    role: *self.pick(&roles),
                    status,
                    created_at,
                    updated_at: created_at,
                    last_login_at,
                }
            })
            .collect()
    }

    pub fn customers(&mut self, count: usize) -> Vec<Customer> {
        let statuses = [AccountStatus::Active, AccountStatus::Inactive, AccountStatus::Pending];

        (1..=count)
            .map(|n| {
                let name = self.pick(PEOPLE).to_string();
                let company = self.pick(COMPANIES).to_string();
                let status = *self.pick(&statuses);
                let registration_date = self.date();
                let domain: String = company.to_lowercase().split_whitespace().collect();
                let local: String = name.to_lowercase().replace(' ', ".");
                Customer {
                    id: format!("customer_{}", n),
                    email: format!("{}@{}.com", local, domain),
                    phone: format!(
                        "138-{}-{}",
                        self.rng.gen_range(1000..=9999),
                        self.rng.gen_range(1000..=9999)
                    ),
                    name,
                    company,
                    status,
                    location: self.pick(CITIES).to_string(),
                    registration_date,
                    last_contact: registration_date + Duration::days(self.rng.gen_range(0..90)),
                    notes: Some(match status {
                        AccountStatus::Active => "Active buyer".to_string(),
                        _ => "Needs follow-up".to_string(),
                    }),
                    tags: vec![self.pick(CUSTOMER_TAGS).to_string()],
                }
            })
            .collect()
    }

    pub fn products(&mut self, count: usize) -> Vec<Product> {
        let statuses = [ProductStatus::Active, ProductStatus::Inactive, ProductStatus::Discontinued];

        (1..=count)
            .map(|n| {
                let base = self.pick(PRODUCT_NAMES);
                let created_at = self.date();
                Product {
                    id: format!("product_{}", n),
                    name: format!("{} {}", base, n),
                    description: format!("High quality {} for everyday use", base.to_lowercase()),
                    price: self.rng.gen_range(10..=9999) as f64,
                    category: self.pick(PRODUCT_CATEGORIES).to_string(),
                    status: *self.pick(&statuses),
                    stock: self.rng.gen_range(0..=1000),
                    created_at,
                    updated_at: created_at,
                }
            })
            .collect()
    }

    pub fn notifications(&mut self, count: usize) -> Vec<Notification> {
        let kinds = [
            NotificationKind::Info,
            NotificationKind::Success,
            NotificationKind::Warning,
            NotificationKind::Error,
        ];

        (1..=count)
            .map(|n| {
                let title = self.pick(NOTIFICATION_TITLES);
                Notification {
                    id: format!("notification_{}", n),
                    title: title.to_string(),
                    message: format!("{}: details inside.", title),
                    kind: *self.pick(&kinds),
                    read: self.rng.gen_bool(0.5),
                    created_at: self.date(),
                }
            })
            .collect()
    }

    /// One stock per table entry, up to `count`. Symbols are unique.
    pub fn stocks(&mut self, count: usize) -> Vec<Stock> {
        STOCK_TABLE
            .iter()
            .take(count)
            .map(|&(symbol, name, sector, industry)| {
                let current_price = self.rng.gen_range(10..=500) as f64;
                let previous_close = current_price + self.rng.gen_range(-20..=20) as f64;
                let day_change = current_price - previous_close;
                Stock {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    exchange: self.pick(EXCHANGES).to_string(),
                    sector: sector.to_string(),
                    industry: industry.to_string(),
                    market_cap: self.rng.gen_range(1_000_000_000u64..=3_000_000_000_000) as f64,
                    current_price,
                    previous_close,
                    day_change,
                    day_change_percent: percent_of(day_change, previous_close),
                    volume: self.rng.gen_range(1_000_000..=100_000_000),
                    avg_volume: self.rng.gen_range(5_000_000..=50_000_000),
                    pe: self.rng.gen_range(10..=50) as f64,
                    eps: self.rng.gen_range(1..=20) as f64,
                    dividend: self.rng.gen_range(0..=5) as f64,
                    dividend_yield: self.rng.gen_range(0.0..5.0),
                    beta: self.rng.gen_range(0.5..2.5),
                    high_52_week: current_price + self.rng.gen_range(10..=100) as f64,
                    low_52_week: (current_price - self.rng.gen_range(10..=100) as f64).max(1.0),
                    description: format!("{} is a leading {} company", name, industry.to_lowercase()),
                    website: format!("https://www.{}.com", symbol.to_lowercase()),
                }
            })
            .collect()
    }

    /// Holdings drawn from `stocks`. Empty when there are no stocks.
    pub fn positions(&mut self, stocks: &[Stock], count: usize) -> Vec<Position> {
        if stocks.is_empty() {
            return Vec::new();
        }

        (1..=count)
            .map(|n| {
                let stock = self.pick(stocks);
                let shares = self.rng.gen_range(10..=1000) as f64;
                let average_price = stock.current_price * self.rng.gen_range(0.8..1.2);
                Position::new(
                    format!("position_{}", n),
                    stock.symbol.clone(),
                    stock.name.clone(),
                    stock.sector.clone(),
                    shares,
                    average_price,
                    stock.current_price,
                )
                .with_realized_gain_loss(self.rng.gen_range(-1000..=2000) as f64)
                .with_institutional_holding(self.rng.gen_range(0.0..100.0))
                .with_purchase_date(self.date())
                .with_last_updated(anchor())
            })
            .collect()
    }

    /// One indicator snapshot per stock, priced off its current price.
    pub fn stock_metrics(&mut self, stocks: &[Stock]) -> Vec<StockMetrics> {
        stocks
            .iter()
            .map(|stock| {
                let price = stock.current_price;
                let price_target = price * self.rng.gen_range(0.8..1.2);
                StockMetrics {
                    symbol: stock.symbol.clone(),
                    technical_indicators: TechnicalIndicators {
                        rsi: self.rng.gen_range(20..=80) as f64,
                        macd: self.rng.gen_range(-5..=5) as f64,
                        bollinger_upper: price * 1.1,
                        bollinger_middle: price,
                        bollinger_lower: price * 0.9,
                        sma20: price * self.rng.gen_range(0.95..1.05),
                        sma50: price * self.rng.gen_range(0.9..1.1),
                        sma200: price * self.rng.gen_range(0.8..1.2),
                    },
                    fundamental_metrics: FundamentalMetrics {
                        pe: stock.pe,
                        peg: self.rng.gen_range(0.0..3.0),
                        pb: self.rng.gen_range(0.0..5.0),
                        ps: self.rng.gen_range(0.0..10.0),
                        ev_ebitda: self.rng.gen_range(5..=30) as f64,
                        roe: self.rng.gen_range(5..=25) as f64,
                        roa: self.rng.gen_range(2..=15) as f64,
                        debt_to_equity: self.rng.gen_range(0.0..2.0),
                        current_ratio: self.rng.gen_range(1.0..4.0),
                        quick_ratio: self.rng.gen_range(0.5..2.5),
                    },
                    analyst_ratings: AnalystRatings {
                        buy: self.rng.gen_range(5..=15),
                        hold: self.rng.gen_range(3..=10),
                        sell: self.rng.gen_range(1..=5),
                        average_rating: self.rng.gen_range(3.0..5.0),
                        price_target,
                        price_target_upside: percent_of(price_target - price, price),
                    },
                    last_updated: anchor(),
                }
            })
            .collect()
    }
}

/// Counts for a full seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub users: usize,
    pub customers: usize,
    pub products: usize,
    pub notifications: usize,
    pub stocks: usize,
    pub positions: usize,
}

/// Every generated collection.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub notifications: Vec<Notification>,
    pub stocks: Vec<Stock>,
    pub positions: Vec<Position>,
    pub stock_metrics: Vec<StockMetrics>,
}

/// Generate all collections from one seed.
pub fn generate(seed: u64, counts: SeedCounts) -> SeedData {
    let mut seeder = Seeder::new(seed);
    let users = seeder.users(counts.users);
    let customers = seeder.customers(counts.customers);
    let products = seeder.products(counts.products);
    let notifications = seeder.notifications(counts.notifications);
    let stocks = seeder.stocks(counts.stocks);
    let positions = seeder.positions(&stocks, counts.positions);
    let stock_metrics = seeder.stock_metrics(&stocks);

    info!(
        "Seeded {} users, {} customers, {} products, {} notifications, {} stocks, {} positions",
        users.len(),
        customers.len(),
        products.len(),
        notifications.len(),
        stocks.len(),
        positions.len()
    );

    SeedData {
        users,
        customers,
        products,
        notifications,
        stocks,
        positions,
        stock_metrics,
    }
}
