//! 空闲会话回收
//!
//! 注册为 `TaskKind::Periodic`，在 `start_background_tasks()` 中启动。

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::SessionStore;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct SessionSweeper {
    sessions: Arc<SessionStore>,
    idle_timeout: chrono::Duration,
    interval: Duration,
    shutdown: CancellationToken,
}

impl SessionSweeper {
    pub fn new(sessions: Arc<SessionStore>, idle_timeout_secs: u64, shutdown: CancellationToken) -> Self {
        Self {
            sessions,
            idle_timeout: chrono::Duration::seconds(idle_timeout_secs.min(i64::MAX as u64) as i64),
            interval: SWEEP_INTERVAL,
            shutdown,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 主循环：按固定间隔扫描，收到关机信号后退出
    pub async fn run(self) {
        tracing::info!(
            idle_timeout_secs = self.idle_timeout.num_seconds(),
            "Session sweeper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        // 第一次 tick 立即返回
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep();
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Session sweeper received shutdown signal");
                    return;
                }
            }
        }
    }

    fn sweep(&self) {
        let evicted = self.sessions.evict_idle(Utc::now(), self.idle_timeout);
        if evicted > 0 {
            tracing::info!(
                evicted,
                remaining = self.sessions.len(),
                "Evicted idle sessions"
            );
        } else {
            tracing::debug!(sessions = self.sessions.len(), "No idle sessions");
        }
    }
}
