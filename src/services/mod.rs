//! Business logic layer

pub mod finance;

pub use finance::{FinanceService, Report, ReportEntry, TRANSFERS_CATEGORY};
