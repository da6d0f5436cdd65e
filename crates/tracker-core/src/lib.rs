//! tracker-core
//!
//! Analytics and services for the expense tracker.
//! Depends on tracker-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod aggregation;
pub mod assistant;
pub mod budget_service;
pub mod classifier;
pub mod error;
pub mod forecast;
pub mod format;
pub mod goal_service;
pub mod interchange;
pub mod profile_service;
pub mod query;
pub mod recurrence;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use aggregation::*;
pub use assistant::*;
pub use budget_service::*;
pub use classifier::*;
pub use error::CoreError;
pub use forecast::*;
pub use format::{format_money, format_money_in, NumberStyle};
pub use goal_service::*;
pub use interchange::*;
pub use profile_service::*;
pub use query::*;
pub use recurrence::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;
pub use transaction_service::*;
