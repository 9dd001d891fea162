use crate::core::number::Number;
use crate::utils::error::Result;
use serde::Serialize;

pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// `verify_all` 預設使用的樣本：整數、非整數小數與大小量級差距大的值
pub fn default_samples() -> Vec<Number> {
    vec![
        Number::Int(0),
        Number::Int(1),
        Number::Int(2),
        Number::Int(-3),
        Number::Int(1_000_000_007),
        Number::Float(0.1),
        Number::Float(0.2),
        Number::Float(0.3),
        Number::Float(-1.5),
        Number::Float(1e10),
        Number::Float(1e-10),
    ]
}

pub fn is_commutative(a: Number, b: Number) -> Result<bool> {
    Ok(a.sum(b)?.approx_eq(&b.sum(a)?, 0.0))
}

pub fn has_identity(a: Number) -> Result<bool> {
    Ok(a.sum(Number::Int(0))?.approx_eq(&a, 0.0))
}

pub fn is_associative(a: Number, b: Number, c: Number, tolerance: f64) -> Result<bool> {
    let left = a.sum(b)?.sum(c)?;
    let right = a.sum(b.sum(c)?)?;
    if left.approx_eq(&right, tolerance) {
        return Ok(true);
    }

    // 相消時誤差與運算元量級相關，而非結果
    let scale = [a, b, c]
        .iter()
        .map(|n| n.as_f64().abs())
        .fold(1.0, f64::max);
    let (x, y) = (left.as_f64(), right.as_f64());
    Ok(x.is_finite() && y.is_finite() && (x - y).abs() <= tolerance * scale)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Commutativity,
    Identity,
    Associativity,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyViolation {
    pub property: Property,
    pub operands: Vec<Number>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyReport {
    pub checks: usize,
    /// 因整數溢位而無法檢查的組合
    pub skipped: usize,
    pub violations: Vec<PropertyViolation>,
}

impl PropertyReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn record(&mut self, property: Property, operands: Vec<Number>, outcome: Result<bool>) {
        match outcome {
            Ok(true) => self.checks += 1,
            Ok(false) => {
                self.checks += 1;
                tracing::debug!("{:?} violated for {:?}", property, operands);
                self.violations.push(PropertyViolation { property, operands });
            }
            Err(e) => {
                tracing::debug!("Skipping {:?} for {:?}: {}", property, operands, e);
                self.skipped += 1;
            }
        }
    }
}

/// 對樣本的所有組合檢查交換律、單位元與結合律
pub fn verify_all(samples: &[Number], tolerance: f64) -> PropertyReport {
    let mut report = PropertyReport::default();

    for &a in samples {
        report.record(Property::Identity, vec![a], has_identity(a));

        for &b in samples {
            report.record(Property::Commutativity, vec![a, b], is_commutative(a, b));

            for &c in samples {
                report.record(
                    Property::Associativity,
                    vec![a, b, c],
                    is_associative(a, b, c, tolerance),
                );
            }
        }
    }

    tracing::info!(
        "Property checks: {} run, {} skipped, {} violations",
        report.checks,
        report.skipped,
        report.violations.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_samples_hold_every_property() {
        let report = verify_all(&default_samples(), DEFAULT_TOLERANCE);
        assert!(report.is_clean(), "{:?}", report.violations);
        let n = default_samples().len();
        assert_eq!(report.checks + report.skipped, n + n * n + n * n * n);
    }

    #[test]
    fn test_float_associativity_needs_tolerance() {
        let (a, b, c) = (Number::Float(0.1), Number::Float(0.2), Number::Float(0.3));
        assert!(!is_associative(a, b, c, 0.0).unwrap());
        assert!(is_associative(a, b, c, DEFAULT_TOLERANCE).unwrap());
    }

    #[test]
    fn test_overflow_is_skipped() {
        let report = verify_all(&[Number::Int(i64::MAX), Number::Int(1)], DEFAULT_TOLERANCE);
        assert!(report.skipped > 0);
        assert!(report.is_clean());
    }
}
