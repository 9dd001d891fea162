use crate::domain::model::{CaseOutcome, Suite, SuiteReport, SumCase};
use crate::domain::ports::Clock;
use crate::utils::color::Palette;
use chrono::Utc;
use std::time::Duration;

pub struct SuiteRunner<C: Clock> {
    clock: C,
    palette: Palette,
    echo: bool,
}

impl<C: Clock> SuiteRunner<C> {
    pub fn new(clock: C, palette: Palette) -> Self {
        Self {
            clock,
            palette,
            echo: true,
        }
    }

    /// 不輸出到 stdout，只記錄日誌 (測試用)
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub async fn run(&self, suite: &Suite) -> SuiteReport {
        let started_at = Utc::now();
        let start = self.clock.now();

        tracing::info!("🚀 Running suite '{}' ({} cases)", suite.name, suite.cases.len());
        self.print(&self.palette.paint(crate::utils::color::Color::Bright, &suite.name));

        let mut outcomes = Vec::with_capacity(suite.cases.len());
        for case in &suite.cases {
            let delay = Duration::from_millis(case.delay_ms.unwrap_or(suite.pacing_ms));
            if !delay.is_zero() {
                tracing::debug!("⏳ Pacing '{}' by {:?}", case.name, delay);
                self.clock.sleep(delay).await;
            }

            let outcome = self.evaluate(case, suite.tolerance);
            self.print(&render_outcome(&outcome, &self.palette));

            let stop = suite.fail_fast && !outcome.passed;
            outcomes.push(outcome);
            if stop {
                tracing::warn!("🛑 Stopping after first failure (fail_fast)");
                break;
            }
        }

        let passed = outcomes.iter().filter(|o| o.passed).count();
        let report = SuiteReport {
            suite: suite.name.clone(),
            started_at,
            total: suite.cases.len(),
            passed,
            failed: outcomes.len() - passed,
            skipped: suite.cases.len() - outcomes.len(),
            elapsed_ms: millis(self.clock.now().saturating_sub(start)),
            outcomes,
        };

        let summary = format!(
            "{} passed, {} failed, {} skipped, {} total ({} ms)",
            report.passed, report.failed, report.skipped, report.total, report.elapsed_ms
        );
        if report.all_passed() {
            tracing::info!("✅ {}", summary);
            self.print(&self.palette.pass(&summary));
        } else {
            tracing::warn!("❌ {}", summary);
            self.print(&self.palette.fail(&summary));
        }

        report
    }

    fn evaluate(&self, case: &SumCase, tolerance: f64) -> CaseOutcome {
        let (actual, passed, error) = match case.a.sum(case.b) {
            Ok(actual) => {
                let passed = actual.approx_eq(&case.expected, tolerance);
                if !passed {
                    tracing::warn!(
                        "Case '{}': sum({}, {}) = {}, want {}",
                        case.name,
                        case.a,
                        case.b,
                        actual,
                        case.expected
                    );
                }
                (Some(actual), passed, None)
            }
            Err(e) => {
                tracing::warn!("Case '{}' errored: {}", case.name, e);
                (None, false, Some(e.to_string()))
            }
        };

        CaseOutcome {
            name: case.name.clone(),
            a: case.a,
            b: case.b,
            expected: case.expected,
            actual,
            passed,
            error,
            virtual_elapsed_ms: millis(self.clock.now()),
        }
    }

    fn print(&self, line: &str) {
        if self.echo {
            println!("{}", line);
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// 單一案例的輸出行，例如 `✓ 111  sum(1, 2) = 3`
pub fn render_outcome(outcome: &CaseOutcome, palette: &Palette) -> String {
    let call = format!("sum({}, {})", outcome.a, outcome.b);
    match (&outcome.actual, &outcome.error) {
        (_, Some(error)) => palette.fail(&format!("✗ {}  {}: {}", outcome.name, call, error)),
        (Some(actual), None) if outcome.passed => {
            format!(
                "{} {}",
                palette.pass(&format!("✓ {}", outcome.name)),
                palette.muted(&format!(" {} = {}", call, actual))
            )
        }
        (Some(actual), None) => palette.fail(&format!(
            "✗ {}  {} = {}, want {}",
            outcome.name, call, actual, outcome.expected
        )),
        (None, None) => palette.fail(&format!("✗ {}  {}", outcome.name, call)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::VirtualClock;
    use crate::core::number::Number;

    fn runner() -> SuiteRunner<VirtualClock> {
        SuiteRunner::new(VirtualClock::new(), Palette::new(false)).quiet()
    }

    #[tokio::test]
    async fn test_builtin_suite_passes() {
        let report = runner().run(&Suite::builtin()).await;
        assert!(report.all_passed());
        assert_eq!(report.total, 2);
        assert_eq!(report.outcomes[0].actual, Some(Number::Int(3)));
        assert_eq!(report.outcomes[1].actual, Some(Number::Int(9)));
    }

    #[tokio::test]
    async fn test_pacing_uses_virtual_time() {
        let mut suite = Suite::builtin();
        suite.pacing_ms = 1000;
        suite.cases[1].delay_ms = Some(100);

        let runner = runner();
        let report = runner.run(&suite).await;

        assert_eq!(report.elapsed_ms, 1100);
        assert_eq!(report.outcomes[0].virtual_elapsed_ms, 1000);
        assert_eq!(report.outcomes[1].virtual_elapsed_ms, 1100);
        assert_eq!(runner.clock().now(), Duration::from_millis(1100));
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_run() {
        let mut suite = Suite::builtin();
        suite.cases.insert(0, SumCase::new("wrong", 1, 2, 4));

        let report = runner().run(&suite).await;
        assert_eq!(report.failed, 1);
        assert_eq!(report.passed, 2);
        assert!(!report.all_passed());
    }

    #[tokio::test]
    async fn test_fail_fast_stops_after_first_failure() {
        let mut suite = Suite::builtin();
        suite.fail_fast = true;
        suite.cases.insert(0, SumCase::new("wrong", 1, 2, 4));

        let report = runner().run(&suite).await;
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.total, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.passed + report.failed + report.skipped, report.total);
    }

    #[tokio::test]
    async fn test_overflow_is_reported_as_failure() {
        let mut suite = Suite::builtin();
        suite.cases = vec![SumCase::new("overflow", i64::MAX, 1, 0)];

        let report = runner().run(&suite).await;
        assert_eq!(report.failed, 1);
        assert!(report.outcomes[0].actual.is_none());
        assert!(report.outcomes[0].error.is_some());
    }

    #[test]
    fn test_render_outcome() {
        let outcome = CaseOutcome {
            name: "111".to_string(),
            a: Number::Int(1),
            b: Number::Int(2),
            expected: Number::Int(4),
            actual: Some(Number::Int(3)),
            passed: false,
            error: None,
            virtual_elapsed_ms: 0,
        };
        assert_eq!(
            render_outcome(&outcome, &Palette::new(false)),
            "✗ 111  sum(1, 2) = 3, want 4"
        );
    }
}
