//! Swipe-gesture decoding core.
//!
//! Turns a finger trajectory across an on-screen keyboard into ranked word
//! candidates using a node-indexed dictionary trie and beam search.

pub mod decoder;
pub mod dict;
pub mod layout;
pub mod settings;
