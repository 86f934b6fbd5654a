use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use super::trie_dict::{Node, TrieDictionary};
use super::DictError;

pub(crate) const MAGIC: &[u8; 4] = b"SWDX";
const VERSION: u8 = 1;
// magic + version + reserved(3) + node_count + crc32
const HEADER_SIZE: usize = 4 + 1 + 3 + 4 + 4;
// char + frequency + first_child + next_sibling
const NODE_SIZE: usize = 16;

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

impl TrieDictionary {
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let nodes = self.nodes();
        let node_count: u32 = nodes
            .len()
            .try_into()
            .map_err(|_| DictError::Unencodable("node count exceeds u32::MAX".to_string()))?;

        let mut body = Vec::with_capacity(nodes.len() * NODE_SIZE);
        for node in nodes {
            body.extend_from_slice(&(node.ch as u32).to_le_bytes());
            body.extend_from_slice(&node.frequency.to_le_bytes());
            body.extend_from_slice(&node.first_child.to_le_bytes());
            body.extend_from_slice(&node.next_sibling.to_le_bytes());
        }

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&node_count.to_le_bytes());
        buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < 5 {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }

        let node_count = read_u32_le(data, 8) as usize;
        let expected_crc = read_u32_le(data, 12);
        let body_len = node_count
            .checked_mul(NODE_SIZE)
            .ok_or(DictError::InvalidHeader)?;
        let expected_len = HEADER_SIZE
            .checked_add(body_len)
            .ok_or(DictError::InvalidHeader)?;
        if data.len() < expected_len {
            return Err(DictError::InvalidHeader);
        }
        if data.len() != expected_len {
            return Err(DictError::Corrupt(format!(
                "{} trailing bytes after {node_count} nodes",
                data.len() - expected_len
            )));
        }
        let body = &data[HEADER_SIZE..];

        let actual_crc = crc32fast::hash(body);
        if actual_crc != expected_crc {
            return Err(DictError::ChecksumMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        let mut nodes = Vec::with_capacity(node_count);
        for (idx, record) in body.chunks_exact(NODE_SIZE).enumerate() {
            let raw_char = read_u32_le(record, 0);
            let ch = char::from_u32(raw_char).ok_or_else(|| {
                DictError::Corrupt(format!("node {idx}: invalid char {raw_char:#x}"))
            })?;
            nodes.push(Node {
                ch,
                frequency: read_u32_le(record, 4),
                first_child: read_u32_le(record, 8),
                next_sibling: read_u32_le(record, 12),
            });
        }
        Self::from_nodes(nodes)
    }

    /// Open a dictionary file.
    ///
    /// The file is memory-mapped only for the duration of decoding; nodes
    /// are copied into an owned arena and the mapping is dropped before
    /// returning. Files without the `SWDX` magic are read as packed
    /// (10-byte node) dictionaries.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap is dropped after decoding completes below.
        let mmap = unsafe { Mmap::map(&file)? };
        let dict = if mmap.starts_with(MAGIC) {
            Self::from_bytes(&mmap)?
        } else {
            Self::from_packed_bytes(&mmap)?
        };
        debug!(path = %path.display(), node_count = dict.nodes().len(), "opened dictionary");
        Ok(dict)
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }
}
