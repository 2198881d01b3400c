//! 服务器状态
//!
//! | 字段 | 类型 | 说明 |
//! |------|------|------|
//! | config | Config | 服务器配置 (不可变) |
//! | catalog | Arc<Catalog> | 只读菜单 |
//! | sessions | Arc<SessionStore> | 内存会话存储 |
//! | assistant | Arc<AssistantPipeline> | 点单助手 |
//!
//! 所有字段都是 `Arc` 或廉价 `Clone`，axum 每个请求克隆一次。

use std::sync::Arc;

use crate::assistant::{AssistantPipeline, CompletionProvider, provider_from_config};
use crate::catalog::Catalog;
use crate::core::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::session::{SessionStore, SessionSweeper};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionStore>,
    pub assistant: Arc<AssistantPipeline>,
}

impl ServerState {
    pub fn new(
        config: Config,
        catalog: Arc<Catalog>,
        sessions: Arc<SessionStore>,
        assistant: Arc<AssistantPipeline>,
    ) -> Self {
        Self {
            config,
            catalog,
            sessions,
            assistant,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 加载菜单 (MENU_PATH 或内置 JSON)
    /// 2. 按配置选择文本生成实现
    /// 3. 创建空会话存储
    pub fn initialize(config: &Config) -> Result<Self, AppError> {
        let catalog = Catalog::load(config.menu_path.as_deref())?;
        tracing::info!(
            items = catalog.len(),
            categories = catalog.categories().len(),
            "Menu loaded"
        );

        let provider = provider_from_config(config)?;
        Ok(Self::with_provider(config.clone(), Arc::new(catalog), provider))
    }

    /// 使用指定的文本生成实现构建状态 (测试中注入脚本化实现)
    pub fn with_provider(
        config: Config,
        catalog: Arc<Catalog>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        let assistant = AssistantPipeline::new(
            catalog.clone(),
            provider,
            config.max_transcript_messages,
        );
        Self::new(
            config,
            catalog,
            Arc::new(SessionStore::new()),
            Arc::new(assistant),
        )
    }

    /// 启动后台任务
    ///
    /// 返回的 [`BackgroundTasks`] 由调用方在关机时 `shutdown().await`。
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let sweeper = SessionSweeper::new(
            self.sessions.clone(),
            self.config.session_idle_timeout_secs,
            tasks.shutdown_token(),
        );
        tasks.spawn("session_sweeper", TaskKind::Periodic, sweeper.run());

        tasks.log_summary();
        tasks
    }
}
