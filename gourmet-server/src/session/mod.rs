//! 会话存储
//!
//! 每个会话拥有自己的购物车、对话记录和记住的人数，仅保存在内存中。
//!
//! # 并发
//!
//! 会话放在 `Arc<tokio::sync::Mutex<Session>>` 后面，整个对话轮次持锁
//! (包括等待模型回复)。同一会话的并发修改通过 [`SessionStore::try_lock`]
//! 立即返回 `TurnInProgress`，不排队。
//!
//! 不同会话互不影响；存储使用 `DashMap` 分片锁。

mod sweeper;

pub use sweeper::SessionSweeper;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use shared::chat::ConversationMessage;
use shared::models::CartSnapshot;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::cart::Cart;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub cart: Cart,
    pub transcript: Vec<ConversationMessage>,
    /// 顾客说过的人数，新订单时清除
    pub party_size: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            cart: Cart::new(),
            transcript: Vec::new(),
            party_size: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// 清空购物车、对话记录和人数
    pub fn start_new_order(&mut self) {
        self.cart.clear();
        self.transcript.clear();
        self.party_size = None;
        self.touch();
    }

    /// 顾客可见的对话记录 (不含隐藏的系统消息)
    pub fn visible_transcript(&self) -> Vec<ConversationMessage> {
        self.transcript
            .iter()
            .filter(|m| !m.hidden)
            .cloned()
            .collect()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            cart: self.cart.snapshot(),
            transcript: self.visible_transcript(),
            party_size: self.party_size,
            created_at: self.created_at,
            last_active: self.last_active,
        }
    }
}

/// 会话快照 (API 输出)
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub cart: CartSnapshot,
    pub transcript: Vec<ConversationMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// 内存会话存储
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建空会话 (空购物车、空对话)
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(Mutex::new(Session::new(id))));
        tracing::info!(session_id = %id, "Session created");
        id
    }

    pub fn get(&self, id: Uuid) -> AppResult<SessionHandle> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::session_not_found(id))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// 等待获取会话锁 (只读操作)
    pub async fn lock(&self, id: Uuid) -> AppResult<OwnedMutexGuard<Session>> {
        Ok(self.get(id)?.lock_owned().await)
    }

    /// 立即获取会话锁；会话正忙时返回 `TurnInProgress`
    pub fn try_lock(&self, id: Uuid) -> AppResult<OwnedMutexGuard<Session>> {
        self.get(id)?.try_lock_owned().map_err(|_| {
            tracing::debug!(session_id = %id, "Session busy");
            AppError::turn_in_progress()
        })
    }

    /// 回收空闲超过 `ttl` 的会话，返回回收数量
    ///
    /// 正在持锁的会话视为活跃，不回收。
    pub fn evict_idle(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => now - session.last_active < ttl,
            Err(_) => true,
        });
        before.saturating_sub(self.sessions.len())
    }
}
