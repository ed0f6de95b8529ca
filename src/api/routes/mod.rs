//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dashboard;
pub mod health;
