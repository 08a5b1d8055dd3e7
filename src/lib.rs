//! Trending-coin scanner: scores token market data against a fixed rule set,
//! ranks the results and renders chat-sized report text.

pub mod aggregator;
pub mod chunker;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scanner;
pub mod strategy;

pub use aggregator::scan;
pub use error::ScanError;
pub use models::{Advice, CoinAnalysis, RiskLevel, ScanResult, TokenRecord};
pub use scanner::{FixtureProvider, MarketDataProvider, ZoraClient};
