//! tracker-domain
//!
//! Pure domain models (Transaction, Profile, AppDocument, MonthKey, etc.).
//! No I/O, no CLI, no storage. Only data types and calendar helpers.

pub mod calendar;
pub mod month;
pub mod planning;
pub mod profile;
pub mod transaction;

pub use calendar::Calendar;
pub use month::*;
pub use planning::*;
pub use profile::*;
pub use transaction::*;
