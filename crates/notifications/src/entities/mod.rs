//! Domain entities for the notification fanout.
//!
//! These mirror the records the chat application keeps in the document
//! store. They are passive data carriers; the dispatch pipeline never
//! creates messages or conversations, and only the user token list is
//! ever written back.

pub mod chat;
pub mod message;
pub mod user;

pub use chat::{ChatType, DirectChat, GroupChat};
pub use message::{Message, MessageKind};
pub use user::User;
