use crate::domain::ports::Clock;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// 牆上時鐘，以 tokio 計時器暫停
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 虛擬時鐘：只有 sleep / advance 會推進時間，不等待真實時間
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    elapsed: Arc<Mutex<Duration>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += duration;
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_virtual_clock_advances_without_waiting() {
        let clock = VirtualClock::new();
        let wall = std::time::Instant::now();

        clock.sleep(Duration::from_millis(5000)).await;
        clock.sleep(Duration::from_millis(500)).await;
        clock.sleep(Duration::from_millis(500)).await;

        assert_eq!(clock.now(), Duration::from_millis(6000));
        assert!(wall.elapsed() < Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_virtual_clock_clones_share_time() {
        let clock = VirtualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_resumes_no_earlier_than_requested() {
        let clock = SystemClock::new();
        clock.sleep(Duration::from_millis(1000)).await;
        assert!(clock.now() >= Duration::from_millis(1000));
    }
}
