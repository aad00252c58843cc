//! tally-domain
//!
//! Pure domain models (Transaction, RecurringBillDefinition, Activity, DateRange, etc.).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod activity;
pub mod context;
pub mod goal;
pub mod period;
pub mod planning;
pub mod range;
pub mod recurring;
pub mod transaction;

pub use activity::*;
pub use context::*;
pub use goal::*;
pub use period::*;
pub use planning::*;
pub use range::*;
pub use recurring::*;
pub use transaction::*;

/// Snapshot schema version written by storage backends.
pub const CURRENT_SCHEMA_VERSION: u8 = 1;
