//! URL handling module for Web-Ripple
//!
//! This module decides which URLs the crawler must skip before any work is
//! dispatched for them.

mod matcher;

// Re-export main types
pub use matcher::{is_ignored, IgnoreList};
