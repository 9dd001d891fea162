use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdderError {
    #[error("Invalid number: '{input}'")]
    InvalidNumber { input: String },

    #[error("Integer overflow: {a} + {b}")]
    Overflow { a: i64, b: i64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {message}")]
    TomlError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{failed} failed and {skipped} skipped of {total} cases")]
    CaseFailures {
        failed: usize,
        skipped: usize,
        total: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Arithmetic,
    Configuration,
    Io,
    Verification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdderError::InvalidNumber { .. } => ErrorCategory::Input,
            AdderError::Overflow { .. } => ErrorCategory::Arithmetic,
            AdderError::IoError(_) | AdderError::SerializationError(_) => ErrorCategory::Io,
            AdderError::TomlError { .. }
            | AdderError::CsvError(_)
            | AdderError::InvalidConfigValueError { .. }
            | AdderError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AdderError::CaseFailures { .. } => ErrorCategory::Verification,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Arithmetic => ErrorSeverity::Medium,
            ErrorCategory::Verification => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 程序結束碼，依錯誤類別決定
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Arithmetic | ErrorCategory::Verification => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Io => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdderError::InvalidNumber { input } => {
                format!("'{}' is not a number", input)
            }
            AdderError::Overflow { a, b } => {
                format!("{} + {} does not fit in a 64-bit integer", a, b)
            }
            AdderError::IoError(e) => format!("Could not read or write a file: {}", e),
            AdderError::TomlError { message } => format!("Suite file is not valid TOML: {}", message),
            AdderError::CsvError(e) => format!("Case table could not be read: {}", e),
            AdderError::SerializationError(e) => format!("Report could not be written: {}", e),
            AdderError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            AdderError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            AdderError::CaseFailures {
                failed,
                skipped,
                total,
            } => format!("{} failed and {} skipped of {} cases", failed, skipped, total),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdderError::InvalidNumber { .. } => "Use integers like 42 or decimals like 1.5",
            AdderError::Overflow { .. } => "Write one of the operands as a decimal to use float addition",
            AdderError::IoError(_) => "Check that the path exists and is readable",
            AdderError::TomlError { .. } => "Check the suite file against the documented layout",
            AdderError::CsvError(_) => "The case table needs a header: name,a,b,expected[,delay_ms]",
            AdderError::SerializationError(_) => "Check that the report path is writable",
            AdderError::InvalidConfigValueError { .. } => "Fix the value and run again",
            AdderError::MissingConfigError { .. } => "Add the missing field to the suite file",
            AdderError::CaseFailures { .. } => "Inspect the failed cases above",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdderError>;
