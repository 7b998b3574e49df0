//! Shared types for the notification fanout.

pub mod errors;

pub use errors::{
    DispatchError, DispatchResult, PushError, PushResult, StoreError, StoreResult,
};

// Common type aliases. Identifiers and tokens are opaque strings minted by
// the external store and push provider; this system never parses them.
pub type UserId = String;
pub type ConversationId = String;
pub type DeviceToken = String;
