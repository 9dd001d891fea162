use crate::core::number::Number;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumCase {
    pub name: String,
    pub a: Number,
    pub b: Number,
    pub expected: Number,
    /// 覆蓋套件預設的 pacing 延遲
    pub delay_ms: Option<u64>,
}

impl SumCase {
    pub fn new(name: impl Into<String>, a: impl Into<Number>, b: impl Into<Number>, expected: impl Into<Number>) -> Self {
        Self {
            name: name.into(),
            a: a.into(),
            b: b.into(),
            expected: expected.into(),
            delay_ms: None,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    pub name: String,
    pub pacing_ms: u64,
    pub tolerance: f64,
    pub fail_fast: bool,
    pub cases: Vec<SumCase>,
    pub output: OutputOptions,
}

/// 套件檔中的輸出偏好，命令列參數可覆蓋
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputOptions {
    pub color: Option<bool>,
    pub report: Option<String>,
}

impl Suite {
    /// 沒有指定檔案時使用的內建案例
    pub fn builtin() -> Self {
        Self {
            name: "sum namespace".to_string(),
            pacing_ms: 0,
            tolerance: crate::core::properties::DEFAULT_TOLERANCE,
            fail_fast: false,
            cases: vec![SumCase::new("sum(1, 2)", 1, 2, 3), SumCase::new("sum(4, 5)", 4, 5, 9)],
            output: OutputOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub a: Number,
    pub b: Number,
    pub expected: Number,
    pub actual: Option<Number>,
    pub passed: bool,
    pub error: Option<String>,
    /// 案例完成時的時鐘讀數 (毫秒)
    pub virtual_elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// fail_fast 中止後未執行的案例
    pub skipped: usize,
    pub elapsed_ms: u64,
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.skipped == 0 && self.passed == self.total
    }
}
