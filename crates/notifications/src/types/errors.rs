//! Error types for the notification fanout.

use thiserror::Error;

/// Document-store collaborator errors
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Batched write failed: {0}")]
    BatchWriteFailed(String),
}

/// Push-provider collaborator errors. Per-token delivery failures are not
/// errors; they come back inside the multicast report.
#[derive(Debug, Error, Clone)]
pub enum PushError {
    #[error("Push provider unavailable: {0}")]
    Unavailable(String),

    #[error("Multicast rejected: {0}")]
    MulticastRejected(String),
}

/// Any failure inside the dispatch pipeline. Callers at the trigger
/// boundary log these and swallow them; nothing propagates to the host.
#[derive(Debug, Error, Clone)]
pub enum DispatchError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Push error: {0}")]
    Push(#[from] PushError),
}

/// Result types for fanout operations
pub type StoreResult<T> = Result<T, StoreError>;
pub type PushResult<T> = Result<T, PushError>;
pub type DispatchResult<T> = Result<T, DispatchError>;
