pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::clock::{SystemClock, VirtualClock};
pub use config::{cases::CsvCaseSource, toml_config::TomlSuiteSource};
pub use crate::core::{adder::sum, number::Number, runner::SuiteRunner};
pub use domain::model::{Suite, SuiteReport, SumCase};
pub use domain::ports::{Clock, SuiteSource};
pub use utils::error::{AdderError, Result};
