//! Terminal input mapping.
//!
//! Translates `crossterm` key events into [`crate::types::GameAction`] intents.
//! The bindings are fixed; there is no key repeat handling beyond what the
//! terminal delivers.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
