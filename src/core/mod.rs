pub mod adder;
pub mod number;
pub mod properties;
pub mod report;
pub mod runner;

pub use crate::domain::model::{CaseOutcome, Suite, SuiteReport, SumCase};
pub use crate::domain::ports::{Clock, SuiteSource};
pub use crate::utils::error::Result;
