use crate::core::number::Number;
use crate::domain::model::{Suite, SumCase};
use crate::domain::ports::SuiteSource;
use crate::utils::error::{AdderError, Result};
use crate::utils::validation;
use std::io::Read;
use std::path::PathBuf;

const REQUIRED_COLUMNS: [&str; 4] = ["name", "a", "b", "expected"];

/// 從 CSV 讀取案例表，欄位: name,a,b,expected[,delay_ms]
pub fn read_cases<R: Read>(reader: R) -> Result<Vec<SumCase>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let mut indices = [0usize; 4];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = column(name).ok_or_else(|| AdderError::MissingConfigError {
            field: format!("cases.{}", name),
        })?;
    }
    let [name_idx, a_idx, b_idx, expected_idx] = indices;
    let delay_idx = column("delay_ms");

    let mut cases = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let delay_ms = match delay_idx.map(field).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| AdderError::InvalidConfigValueError {
                field: "cases.delay_ms".to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        cases.push(SumCase {
            name: field(name_idx).to_string(),
            a: field(a_idx).parse::<Number>()?,
            b: field(b_idx).parse::<Number>()?,
            expected: field(expected_idx).parse::<Number>()?,
            delay_ms,
        });
    }

    tracing::debug!("Read {} cases from CSV", cases.len());
    Ok(cases)
}

/// 以 CSV 案例表為來源，套件設定取自命令列
#[derive(Debug, Clone)]
pub struct CsvCaseSource {
    path: PathBuf,
    template: Suite,
}

impl CsvCaseSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let mut template = Suite::builtin();
        template.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("cases")
            .to_string();
        template.cases.clear();
        Self { path, template }
    }

    pub fn with_pacing_ms(mut self, pacing_ms: u64) -> Self {
        self.template.pacing_ms = pacing_ms;
        self
    }
}

impl SuiteSource for CsvCaseSource {
    fn describe(&self) -> String {
        format!("case table {}", self.path.display())
    }

    fn load(&self) -> Result<Suite> {
        validation::validate_file_extension("cases", &self.path.to_string_lossy(), &["csv"])?;

        let file = std::fs::File::open(&self.path)?;
        let cases = read_cases(file)?;
        if cases.is_empty() {
            return Err(AdderError::MissingConfigError {
                field: "cases".to_string(),
            });
        }
        validation::validate_unique_names("cases.name", cases.iter().map(|c| c.name.as_str()))?;

        Ok(Suite {
            cases,
            ..self.template.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cases_with_optional_delay() {
        let data = "name,a,b,expected,delay_ms\nfirst,1,2,3,\nsecond, 4 , 5 ,9,500\n";
        let cases = read_cases(data.as_bytes()).unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0], SumCase::new("first", 1, 2, 3));
        assert_eq!(cases[1].b, Number::Int(5));
        assert_eq!(cases[1].delay_ms, Some(500));
    }

    #[test]
    fn test_read_cases_any_column_order() {
        let data = "expected,b,a,name\n0.75,0.25,0.5,halves\n";
        let cases = read_cases(data.as_bytes()).unwrap();
        assert_eq!(cases[0].a, Number::Float(0.5));
        assert_eq!(cases[0].expected, Number::Float(0.75));
    }

    #[test]
    fn test_missing_column() {
        let data = "name,a,b\nfirst,1,2\n";
        assert!(matches!(
            read_cases(data.as_bytes()),
            Err(AdderError::MissingConfigError { field }) if field == "cases.expected"
        ));
    }

    #[test]
    fn test_non_numeric_operand() {
        let data = "name,a,b,expected\nbad,one,2,3\n";
        assert!(matches!(
            read_cases(data.as_bytes()),
            Err(AdderError::InvalidNumber { input }) if input == "one"
        ));
    }
}
