//! Shared types for the Gourmet ordering service
//!
//! Common types used by the server and its clients: error codes and the
//! API envelope, menu and cart models, chat transcript entries, order
//! modification intents and customer preferences.

pub mod chat;
pub mod error;
pub mod intent;
pub mod models;
pub mod preferences;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use intent::{ItemRequest, ModificationCommand};
