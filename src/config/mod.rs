pub mod cases;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, RunArgs};

#[cfg(feature = "cli")]
mod cli {
    use crate::core::number::Number;
    use crate::core::properties::DEFAULT_TOLERANCE;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "adder")]
    #[command(about = "Add numbers and run paced sum case suites")]
    pub struct CliConfig {
        #[command(subcommand)]
        pub command: Command,

        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Print the sum of two numbers
        #[command(allow_negative_numbers = true)]
        Sum { a: Number, b: Number },

        /// Run a suite of sum cases
        Run(RunArgs),

        /// Check commutativity, identity and associativity over sample values
        Verify {
            #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
            tolerance: f64,
        },
    }

    #[derive(Debug, Clone, Args)]
    pub struct RunArgs {
        /// TOML suite file
        #[arg(long, conflicts_with = "cases")]
        pub suite: Option<String>,

        /// CSV case table (name,a,b,expected[,delay_ms])
        #[arg(long)]
        pub cases: Option<String>,

        /// Default delay before each case, in milliseconds
        #[arg(long)]
        pub pacing_ms: Option<u64>,

        /// Advance a virtual clock instead of sleeping
        #[arg(long)]
        pub virtual_time: bool,

        #[arg(long)]
        pub no_color: bool,

        /// Write a JSON report to this path
        #[arg(long)]
        pub report: Option<String>,

        #[arg(long)]
        pub fail_fast: bool,
    }

    impl Validate for RunArgs {
        fn validate(&self) -> Result<()> {
            if let Some(suite) = &self.suite {
                validation::validate_path("--suite", suite)?;
                validation::validate_file_extension("--suite", suite, &["toml"])?;
            }
            if let Some(cases) = &self.cases {
                validation::validate_path("--cases", cases)?;
                validation::validate_file_extension("--cases", cases, &["csv"])?;
            }
            if let Some(report) = &self.report {
                validation::validate_path("--report", report)?;
            }
            Ok(())
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            match &self.command {
                Command::Run(args) => args.validate(),
                Command::Verify { tolerance } => {
                    validation::validate_range("--tolerance", *tolerance, 0.0, 1.0)
                }
                Command::Sum { .. } => Ok(()),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_sum_with_negative_numbers() {
            let config = CliConfig::try_parse_from(["adder", "sum", "-3", "1.5"]).unwrap();
            match config.command {
                Command::Sum { a, b } => {
                    assert_eq!(a, Number::Int(-3));
                    assert_eq!(b, Number::Float(1.5));
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn test_parse_sum_rejects_non_numeric() {
            assert!(CliConfig::try_parse_from(["adder", "sum", "one", "2"]).is_err());
        }

        #[test]
        fn test_suite_and_cases_conflict() {
            let result = CliConfig::try_parse_from([
                "adder", "run", "--suite", "a.toml", "--cases", "b.csv",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_run_args_validation() {
            let config =
                CliConfig::try_parse_from(["adder", "run", "--cases", "cases.txt"]).unwrap();
            assert!(config.validate().is_err());

            let config = CliConfig::try_parse_from([
                "adder", "--verbose", "run", "--cases", "cases.csv", "--virtual-time",
            ])
            .unwrap();
            assert!(config.verbose);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_verify_tolerance_range() {
            let config =
                CliConfig::try_parse_from(["adder", "verify", "--tolerance", "2"]).unwrap();
            assert!(config.validate().is_err());
        }
    }
}
