use crate::domain::model::SuiteReport;
use crate::utils::error::{AdderError, Result};
use std::fs;
use std::path::Path;

impl SuiteReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 寫出 JSON 報告，必要時建立上層目錄
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_json()?)?;
        tracing::info!("📁 Report saved to: {}", path.display());
        Ok(())
    }

    /// 有失敗案例時轉成錯誤，供 CLI 決定結束碼
    pub fn ensure_passed(&self) -> Result<()> {
        if self.all_passed() {
            Ok(())
        } else {
            Err(AdderError::CaseFailures {
                failed: self.failed,
                skipped: self.skipped,
                total: self.total,
            })
        }
    }
}
