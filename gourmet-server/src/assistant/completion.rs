//! Text-generation capability seam

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use shared::chat::ConversationMessage;
use shared::models::CartSnapshot;
use shared::preferences::Preferences;
use thiserror::Error;

use crate::advisor::AllergenSummary;
use crate::catalog::Catalog;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion provider is not configured")]
    NotConfigured,

    #[error("completion request failed: {0}")]
    Network(String),

    #[error("completion endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion payload: {0}")]
    Malformed(String),
}

/// Everything the model is told about the current order
#[derive(Debug, Clone, Serialize)]
pub struct AssistantContext {
    pub cart: CartSnapshot,
    #[serde(skip)]
    pub catalog: Arc<Catalog>,
    pub preferences: Preferences,
    /// Party size remembered from earlier turns
    pub party_size: Option<u32>,
    pub allergens: AllergenSummary,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Most recent transcript window, oldest first, ending with the user turn
    pub messages: Vec<ConversationMessage>,
    pub context: AssistantContext,
}

/// One request, one text reply. Implementations must not retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    fn name(&self) -> &'static str;
}

/// Used when no API key is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredCompletion;

#[async_trait]
impl CompletionProvider for UnconfiguredCompletion {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}
