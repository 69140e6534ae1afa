//! # hawar_core
//!
//! Core domain logic for Hawar: the conversation client, the outbound
//! webhook payload, reply decoding and rendering.

pub mod config;
pub mod conversation;
pub mod message;
pub mod payload;
pub mod render;
pub mod reply;
pub mod session;
pub mod webhook;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
