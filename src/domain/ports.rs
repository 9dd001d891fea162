use crate::domain::model::Suite;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 可替換的時間來源。測試用虛擬時鐘，正式執行用系統時鐘
#[async_trait]
pub trait Clock: Send + Sync {
    /// 自時鐘建立以來經過的時間
    fn now(&self) -> Duration;

    /// 暫停至少 `duration` 後才恢復
    async fn sleep(&self, duration: Duration);
}

pub trait SuiteSource: Send + Sync {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Suite>;
}
