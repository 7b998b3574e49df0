//! Internal utilities.

pub mod format;

pub use format::format_content;
