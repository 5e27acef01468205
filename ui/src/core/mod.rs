//! Cross-platform plumbing shared by every view.

pub mod clipboard;
pub mod config;
pub mod format;
pub mod location;
pub mod platform;
pub mod timing;
