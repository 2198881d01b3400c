//! Data models
//!
//! Shared between gourmet-server and the ordering frontend (via API).
//! Menu ids are strings whose prefix encodes the course.

pub mod cart;
pub mod menu;

// Re-exports
pub use cart::*;
pub use menu::*;
