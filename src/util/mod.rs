//! Utility helpers shared across widget modules.

pub mod format;
