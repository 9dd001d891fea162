use crate::core::adder::sum;
use crate::utils::error::{AdderError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 執行期數值：從命令列、TOML 或 CSV 讀入的運算元
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawNumber")]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// JSON 沒有 NaN / 無限大，這些值以字串 ("NaN", "inf", "-inf") 表示
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl TryFrom<RawNumber> for Number {
    type Error = AdderError;

    fn try_from(raw: RawNumber) -> Result<Self> {
        match raw {
            RawNumber::Int(v) => Ok(Number::Int(v)),
            RawNumber::Float(v) => Ok(Number::Float(v)),
            RawNumber::Text(text) => match text.parse::<Number>()? {
                Number::Float(v) if !v.is_finite() => Ok(Number::Float(v)),
                _ => Err(AdderError::InvalidNumber { input: text }),
            },
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Number::Int(v) => serializer.serialize_i64(*v),
            Number::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Number::Float(_) => serializer.collect_str(self),
        }
    }
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// 整數相加溢位時回傳錯誤；任一邊為浮點則以 f64 相加
    pub fn sum(self, other: Number) -> Result<Number> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a
                .checked_add(b)
                .map(Number::Int)
                .ok_or(AdderError::Overflow { a, b }),
            (a, b) => Ok(Number::Float(sum(a.as_f64(), b.as_f64()))),
        }
    }

    /// 比對期望值。整數對整數必須完全相同，其餘以相對容差比較
    pub fn approx_eq(&self, other: &Number, tolerance: f64) -> bool {
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            return a == b;
        }

        let (x, y) = (self.as_f64(), other.as_f64());
        if x.is_nan() || y.is_nan() {
            return x.is_nan() && y.is_nan();
        }
        if x == y {
            return true;
        }
        if x.is_infinite() || y.is_infinite() {
            return false;
        }

        let scale = x.abs().max(y.abs()).max(1.0);
        (x - y).abs() <= tolerance * scale
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl FromStr for Number {
    type Err = AdderError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(Number::Int(v));
        }
        trimmed
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| AdderError::InvalidNumber {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            // Debug 格式保留小數點 (3.0)，與整數區分
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}
