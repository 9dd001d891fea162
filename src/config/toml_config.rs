use crate::core::properties::DEFAULT_TOLERANCE;
use crate::domain::model::{OutputOptions, Suite, SumCase};
use crate::domain::ports::SuiteSource;
use crate::utils::error::{AdderError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteFile {
    pub suite: SuiteSettings,
    #[serde(default)]
    pub cases: Vec<SumCase>,
    pub output: Option<OutputOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSettings {
    pub name: String,
    pub pacing_ms: Option<u64>,
    pub tolerance: Option<f64>,
    pub fail_fast: Option<bool>,
}

impl SuiteFile {
    /// 從 TOML 檔案載入套件
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析套件
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdderError::TomlError {
            message: e.to_string(),
        })
    }

    /// 替換環境變數 (例如 ${SUM_ARG})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdderError::TomlError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn report_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.report.as_deref())
    }

    pub fn into_suite(self) -> Suite {
        Suite {
            name: self.suite.name,
            pacing_ms: self.suite.pacing_ms.unwrap_or(0),
            tolerance: self.suite.tolerance.unwrap_or(DEFAULT_TOLERANCE),
            fail_fast: self.suite.fail_fast.unwrap_or(false),
            cases: self.cases,
            output: self.output.unwrap_or_default(),
        }
    }
}

impl Validate for SuiteFile {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("suite.name", &self.suite.name)?;

        if let Some(tolerance) = self.suite.tolerance {
            validation::validate_range("suite.tolerance", tolerance, 0.0, 1.0)?;
        }

        if self.cases.is_empty() {
            return Err(AdderError::MissingConfigError {
                field: "cases".to_string(),
            });
        }

        for case in &self.cases {
            validation::validate_non_empty_string("cases.name", &case.name)?;
        }
        validation::validate_unique_names("cases.name", self.cases.iter().map(|c| c.name.as_str()))?;

        if let Some(report) = self.report_path() {
            validation::validate_path("output.report", report)?;
        }

        Ok(())
    }
}

/// 以 TOML 套件檔為來源
#[derive(Debug, Clone)]
pub struct TomlSuiteSource {
    path: PathBuf,
}

impl TomlSuiteSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl SuiteSource for TomlSuiteSource {
    fn describe(&self) -> String {
        format!("suite file {}", self.path.display())
    }

    fn load(&self) -> Result<Suite> {
        let file = SuiteFile::from_file(&self.path)?;
        file.validate()?;
        Ok(file.into_suite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::number::Number;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[suite]
name = "sum namespace"
pacing_ms = 1000

[[cases]]
name = "111"
a = 1
b = 2
expected = 3

[[cases]]
name = "222"
a = 0.5
b = 0.25
expected = 0.75
delay_ms = 100
"#;

    #[test]
    fn test_parse_basic_suite() {
        let file = SuiteFile::from_toml_str(BASIC).unwrap();
        assert!(file.validate().is_ok());

        let suite = file.into_suite();
        assert_eq!(suite.name, "sum namespace");
        assert_eq!(suite.pacing_ms, 1000);
        assert_eq!(suite.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(suite.cases[0].a, Number::Int(1));
        assert_eq!(suite.cases[1].a, Number::Float(0.5));
        assert_eq!(suite.cases[1].delay_ms, Some(100));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ADDER_TEST_SUITE_NAME", "from-env");

        let content = r#"
[suite]
name = "${ADDER_TEST_SUITE_NAME}"

[[cases]]
name = "one"
a = 1
b = 1
expected = 2
"#;

        let file = SuiteFile::from_toml_str(content).unwrap();
        assert_eq!(file.suite.name, "from-env");

        std::env::remove_var("ADDER_TEST_SUITE_NAME");
    }

    #[test]
    fn test_validation_rejects_duplicate_case_names() {
        let content = r#"
[suite]
name = "dupes"

[[cases]]
name = "same"
a = 1
b = 1
expected = 2

[[cases]]
name = "same"
a = 2
b = 2
expected = 4
"#;

        let file = SuiteFile::from_toml_str(content).unwrap();
        assert!(file.validate().is_err());
    }

    #[test]
    fn test_validation_requires_cases() {
        let file = SuiteFile::from_toml_str("[suite]\nname = \"empty\"\n").unwrap();
        assert!(matches!(
            file.validate(),
            Err(AdderError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            SuiteFile::from_toml_str("[suite"),
            Err(AdderError::TomlError { .. })
        ));
    }

    #[test]
    fn test_source_loads_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let source = TomlSuiteSource::new(temp_file.path());
        let suite = source.load().unwrap();
        assert_eq!(suite.cases.len(), 2);
        assert_eq!(suite.output, OutputOptions::default());
    }

    #[test]
    fn test_source_carries_output_options() {
        let content = format!(
            "{}\n[output]\ncolor = false\nreport = \"out/report.json\"\n",
            BASIC
        );
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let suite = TomlSuiteSource::new(temp_file.path()).load().unwrap();
        assert_eq!(suite.output.color, Some(false));
        assert_eq!(suite.output.report.as_deref(), Some("out/report.json"));
    }
}
