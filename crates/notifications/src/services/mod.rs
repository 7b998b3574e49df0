//! Business logic for the notification fanout.

pub mod cleanup_service;
pub mod dispatch_service;

pub use cleanup_service::CleanupService;
pub use dispatch_service::{DispatchService, NotificationTarget};
