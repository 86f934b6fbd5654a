//! Word dictionary storage.
//!
//! `TrieDictionary` is a prefix tree laid out as a flat arena of nodes
//! addressed by `NodeId`. The decoder only sees it through the
//! `Dictionary` trait: child-edge enumeration and per-node frequency.

mod packed;
mod trie_dict;
mod trie_dict_io;
mod wordlist;

#[cfg(test)]
mod tests;

pub use trie_dict::{TrieDictionary, Words};
pub use wordlist::{parse_word_list, read_word_list, DEFAULT_MAX_WORDS, MAX_WORD_FREQUENCY};

use std::io;

/// Index of a node in the trie arena.
pub type NodeId = u32;

/// The root node is always stored first.
pub const ROOT: NodeId = 0;

/// Errors from loading, saving or encoding dictionary files.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected SWDX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (expected {expected:#010x}, got {actual:#010x})")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("corrupt node data: {0}")]
    Corrupt(String),

    #[error("cannot encode dictionary: {0}")]
    Unencodable(String),
}

/// Read-only view of a node-indexed trie.
///
/// Implementations must tolerate any `NodeId`: an index that does not name
/// a node has no children and frequency 0.
pub trait Dictionary: Send + Sync {
    /// Outgoing edges of `node` as `(label, child)` pairs.
    fn children(&self, node: NodeId) -> Vec<(char, NodeId)>;

    /// Word frequency stored at `node`; 0 means the path is only a prefix.
    fn frequency(&self, node: NodeId) -> u32;

    /// Walk `word` from the root and return the node it ends at.
    fn find(&self, word: &str) -> Option<NodeId> {
        let mut node = ROOT;
        for c in word.chars() {
            node = self
                .children(node)
                .into_iter()
                .find_map(|(label, child)| (label == c).then_some(child))?;
        }
        Some(node)
    }
}
