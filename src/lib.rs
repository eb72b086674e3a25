//! dashboard_metrics
//!
//! The analytics core behind a business dashboard: pure transformations from
//! raw operational records (sales transactions, purchase orders, vendors,
//! banks, POS terminals, finished goods, raw materials) to the figures the
//! screens show. Pairs with the `dashmetrics` CLI.
//!
//! ### Pipeline
//! - [`normalize`]: coerce fetched JSON into typed collections, never failing
//! - [`filter`]: inclusive date window plus categorical equality filters
//! - [`aggregate`]: group-by into ordered buckets
//! - [`kpi`] and [`growth`]: totals, averages, margins, shares, half-over-half growth
//! - [`rank`]: top-N with a stable tie-break
//! - [`classify`]: stock status, price bands, raw-material status
//! - [`dashboard`]: the stages composed per screen
//!
//! ### Example
//! ```
//! use dashboard_metrics::{AnalyticsConfig, DashboardReport, Filters, Snapshot};
//! use serde_json::json;
//!
//! let snapshot = Snapshot::from_value(&json!({
//!     "transactions": [
//!         {"date": "2024-01-01", "paymentMethod": "Cash", "total": 100},
//!         {"date": "2024-01-02", "paymentMethod": "Card", "total": 50}
//!     ]
//! }));
//! let report = DashboardReport::build(&snapshot, &Filters::new(), &AnalyticsConfig::default());
//! assert_eq!(report.sales.total_sales.value, 150.0);
//! assert_eq!(report.sales.average_transaction_value.value, 75.0);
//! ```

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod growth;
pub mod kpi;
pub mod models;
pub mod normalize;
pub mod rank;
pub mod storage;

pub use aggregate::Bucket;
pub use config::AnalyticsConfig;
pub use dashboard::{DashboardReport, Section};
pub use error::{Error, Result};
pub use filter::{Filters, Selection};
pub use kpi::Kpi;
pub use models::{DateRange, Snapshot};
pub use rank::RankedEntry;
