//! One [`FetchPolicy`](crate::fetch::FetchPolicy) per backend endpoint,
//! together with the wire types it sends and expects.

pub mod chat;
pub mod conversation;
pub mod files;
pub mod history;
pub mod search;
pub mod stocks;

pub use chat::*;
pub use conversation::*;
pub use files::*;
pub use history::*;
pub use search::*;
pub use stocks::*;

/// Rejects blank free-text input with `message`.
pub(crate) fn require_text(text: &str, message: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}
