//! API Routes
//!
//! Route handlers organized by functionality.

pub mod export;
pub mod health;
pub mod store;
pub mod timeline;
