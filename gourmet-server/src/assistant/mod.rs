//! 点单助手
//!
//! # 模块结构
//!
//! - [`pipeline`] - 每轮对话的状态机 (本地解析 → 委托模型 → 指令执行)
//! - [`completion`] - 文本生成能力接口 [`CompletionProvider`]
//! - [`openai`] - 兼容 OpenAI 的 HTTP 实现
//! - [`prompt`] - 系统提示词

pub mod completion;
pub mod openai;
pub mod pipeline;
pub mod prompt;

use std::sync::Arc;

pub use completion::{
    AssistantContext, CompletionError, CompletionProvider, CompletionRequest,
    UnconfiguredCompletion,
};
pub use openai::OpenAiCompletion;
pub use pipeline::{APOLOGY, AssistantPipeline, ReplySource, TurnOutcome, greeting};

use crate::core::Config;
use crate::utils::AppError;

/// 按配置选择文本生成实现；未配置 API key 时使用 [`UnconfiguredCompletion`]
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn CompletionProvider>, AppError> {
    match OpenAiCompletion::from_config(config) {
        Ok(Some(provider)) => {
            tracing::info!(model = %config.openai_model, "Assistant completion enabled");
            Ok(Arc::new(provider))
        }
        Ok(None) => {
            tracing::warn!("OPENAI_API_KEY not set, assistant will only handle explicit order edits");
            Ok(Arc::new(UnconfiguredCompletion))
        }
        Err(e) => Err(AppError::config(e.to_string())),
    }
}
