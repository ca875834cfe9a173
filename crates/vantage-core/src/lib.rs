//! Vantage Core Library
//!
//! Shared functionality for the Vantage AI portfolio tracker:
//! - Domain records for projects, KPIs, budgets, and risks
//! - SQLite storage port with connection pooling and migrations
//! - Pure analytics engine: ROI, health scoring, trend classification,
//!   budget variance, risk matrix
//! - Report generator over one document model with markdown and HTML renderers
//! - YAML seeding of sample portfolio data

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod report;
pub mod seed;

pub use analytics::{PortfolioSnapshot, PortfolioStats};
pub use config::{AnalyticsConfig, HealthWeights, MetricDirection, NoDataPolicy};
pub use db::Database;
pub use error::{Error, Result};
pub use report::ReportKind;
pub use seed::{seed_from_yaml, SeedStats};
