//! Packed dictionary format used by the keyboard's bundled `.bin` assets.
//!
//! 10-byte big-endian nodes: UTF-16 code unit (2), frequency (1), first
//! child byte offset (3), next sibling byte offset (3), padding (1).
//! Offsets are byte positions of node records; 0 means "none".

use std::fs;
use std::path::Path;

use super::trie_dict::{Node, TrieDictionary, ROOT_CHAR};
use super::{DictError, NodeId, MAX_WORD_FREQUENCY};

const PACKED_NODE_SIZE: usize = 10;
const MAX_OFFSET: usize = 0xFF_FFFF;

fn write_u24(buf: &mut Vec<u8>, value: usize) {
    buf.extend_from_slice(&[(value >> 16) as u8, (value >> 8) as u8, value as u8]);
}

fn read_u24(data: &[u8]) -> usize {
    (data[0] as usize) << 16 | (data[1] as usize) << 8 | data[2] as usize
}

fn offset_to_index(
    idx: usize,
    name: &str,
    offset: usize,
    len: usize,
) -> Result<NodeId, DictError> {
    if offset % PACKED_NODE_SIZE != 0 || offset >= len {
        return Err(DictError::Corrupt(format!(
            "node {idx}: {name} offset {offset} is not a node boundary"
        )));
    }
    Ok((offset / PACKED_NODE_SIZE) as NodeId)
}

impl TrieDictionary {
    pub fn to_packed_bytes(&self) -> Result<Vec<u8>, DictError> {
        let nodes = self.nodes();
        let last_offset = nodes.len().saturating_sub(1) * PACKED_NODE_SIZE;
        if last_offset > MAX_OFFSET {
            return Err(DictError::Unencodable(format!(
                "{} nodes exceed the 16MB packed trie limit",
                nodes.len()
            )));
        }

        let mut buf = Vec::with_capacity(nodes.len() * PACKED_NODE_SIZE);
        for (idx, node) in nodes.iter().enumerate() {
            let unit = if idx == 0 { ROOT_CHAR } else { node.ch };
            let unit: u16 = (unit as u32).try_into().map_err(|_| {
                DictError::Unencodable(format!("char {:?} is outside the BMP", node.ch))
            })?;
            if node.frequency > MAX_WORD_FREQUENCY {
                return Err(DictError::Unencodable(format!(
                    "frequency {} at node {idx} exceeds {MAX_WORD_FREQUENCY}",
                    node.frequency
                )));
            }
            buf.extend_from_slice(&unit.to_be_bytes());
            buf.push(node.frequency as u8);
            write_u24(&mut buf, node.first_child as usize * PACKED_NODE_SIZE);
            write_u24(&mut buf, node.next_sibling as usize * PACKED_NODE_SIZE);
            buf.push(0); // padding / flags
        }
        Ok(buf)
    }

    pub fn from_packed_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.is_empty() || data.len() % PACKED_NODE_SIZE != 0 {
            return Err(DictError::Corrupt(format!(
                "packed data length {} is not a positive multiple of {PACKED_NODE_SIZE}",
                data.len()
            )));
        }

        let mut nodes = Vec::with_capacity(data.len() / PACKED_NODE_SIZE);
        for (idx, record) in data.chunks_exact(PACKED_NODE_SIZE).enumerate() {
            let unit = u16::from_be_bytes([record[0], record[1]]);
            let ch = if idx == 0 {
                ROOT_CHAR
            } else {
                char::from_u32(u32::from(unit)).ok_or_else(|| {
                    DictError::Corrupt(format!("node {idx}: lone surrogate {unit:#06x}"))
                })?
            };
            nodes.push(Node {
                ch,
                frequency: u32::from(record[2]),
                first_child: offset_to_index(idx, "child", read_u24(&record[3..6]), data.len())?,
                next_sibling: offset_to_index(
                    idx,
                    "sibling",
                    read_u24(&record[6..9]),
                    data.len(),
                )?,
            });
        }
        Self::from_nodes(nodes)
    }

    pub fn save_packed(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_packed_bytes()?)?)
    }
}
