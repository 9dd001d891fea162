use adder::config::{Command, RunArgs};
use adder::core::properties::{self, Property};
use adder::utils::color::Palette;
use adder::utils::error::ErrorSeverity;
use adder::utils::{logger, validation::Validate};
use adder::{
    AdderError, CliConfig, Clock, CsvCaseSource, Result, Suite, SuiteRunner, SuiteSource,
    SystemClock, TomlSuiteSource, VirtualClock,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        if e.severity() >= ErrorSeverity::High {
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        }

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: CliConfig) -> Result<()> {
    config.validate()?;

    match config.command {
        Command::Sum { a, b } => {
            let total = a.sum(b)?;
            tracing::debug!("sum({}, {}) = {}", a, b, total);
            println!("{}", total);
            Ok(())
        }
        Command::Run(args) => run_suite(args).await,
        Command::Verify { tolerance } => verify(tolerance),
    }
}

async fn run_suite(args: RunArgs) -> Result<()> {
    let source: Option<Box<dyn SuiteSource>> = match (&args.suite, &args.cases) {
        (Some(path), _) => Some(Box::new(TomlSuiteSource::new(path))),
        (None, Some(path)) => Some(Box::new(CsvCaseSource::new(path))),
        (None, None) => None,
    };

    let mut suite = match source {
        Some(source) => {
            tracing::info!("📁 Loading {}", source.describe());
            source.load()?
        }
        None => {
            tracing::info!("Using built-in suite");
            Suite::builtin()
        }
    };

    // 命令列設定優先
    if let Some(pacing_ms) = args.pacing_ms {
        suite.pacing_ms = pacing_ms;
    }
    if args.fail_fast {
        suite.fail_fast = true;
    }

    let color = !args.no_color && suite.output.color != Some(false);
    let report_path = args.report.clone().or_else(|| suite.output.report.clone());

    let palette = if color { Palette::default() } else { Palette::new(false) };

    let report = if args.virtual_time {
        tracing::info!("🕒 Using virtual time");
        execute(VirtualClock::new(), palette, &suite).await
    } else {
        execute(SystemClock::new(), palette, &suite).await
    };

    if let Some(path) = report_path {
        report.write_json(path)?;
    }

    report.ensure_passed()
}

async fn execute<C: Clock>(clock: C, palette: Palette, suite: &Suite) -> adder::SuiteReport {
    SuiteRunner::new(clock, palette).run(suite).await
}

fn verify(tolerance: f64) -> Result<()> {
    let report = properties::verify_all(&properties::default_samples(), tolerance);

    for violation in &report.violations {
        let operands: Vec<String> = violation.operands.iter().map(|n| n.to_string()).collect();
        let name = match violation.property {
            Property::Commutativity => "commutativity",
            Property::Identity => "identity",
            Property::Associativity => "associativity",
        };
        println!("✗ {} ({})", name, operands.join(", "));
    }

    println!(
        "{} checks, {} skipped, {} violations",
        report.checks,
        report.skipped,
        report.violations.len()
    );

    if report.is_clean() {
        Ok(())
    } else {
        Err(AdderError::CaseFailures {
            failed: report.violations.len(),
            skipped: report.skipped,
            total: report.checks + report.skipped,
        })
    }
}
