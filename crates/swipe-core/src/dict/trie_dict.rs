use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use super::{DictError, Dictionary, NodeId, ROOT};

/// Label stored on the root node. Never part of a word.
pub(crate) const ROOT_CHAR: char = '^';

/// One arena slot. `first_child` and `next_sibling` use 0 for "none": the
/// root is never a child, so index 0 is free to act as the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub ch: char,
    pub frequency: u32,
    pub first_child: NodeId,
    pub next_sibling: NodeId,
}

/// Prefix tree in left-child / right-sibling form, nodes in breadth-first
/// order with siblings sorted by label.
#[derive(Debug, Clone)]
pub struct TrieDictionary {
    nodes: Vec<Node>,
}

#[derive(Default)]
struct BuildNode {
    ch: char,
    frequency: u32,
    children: BTreeMap<char, usize>,
}

impl TrieDictionary {
    /// Build from `(word, frequency)` pairs. Later duplicates overwrite
    /// earlier ones; empty words are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut build = vec![BuildNode {
            ch: ROOT_CHAR,
            ..Default::default()
        }];
        for (word, frequency) in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            let mut cur = 0;
            for c in word.chars() {
                cur = match build[cur].children.get(&c) {
                    Some(&next) => next,
                    None => {
                        let next = build.len();
                        build.push(BuildNode {
                            ch: c,
                            ..Default::default()
                        });
                        build[cur].children.insert(c, next);
                        next
                    }
                };
            }
            build[cur].frequency = frequency;
        }

        // Lay out breadth-first so each node's children are contiguous.
        let mut nodes = Vec::with_capacity(build.len());
        nodes.push(Node {
            ch: ROOT_CHAR,
            frequency: 0,
            first_child: 0,
            next_sibling: 0,
        });
        let mut queue: VecDeque<(usize, usize)> = VecDeque::from([(0, 0)]);
        while let Some((build_idx, arena_idx)) = queue.pop_front() {
            let children = &build[build_idx].children;
            if children.is_empty() {
                continue;
            }
            nodes[arena_idx].first_child = nodes.len() as NodeId;
            let count = children.len();
            for (k, &child) in children.values().enumerate() {
                let idx = nodes.len();
                let next_sibling = if k + 1 < count {
                    (idx + 1) as NodeId
                } else {
                    0
                };
                nodes.push(Node {
                    ch: build[child].ch,
                    frequency: build[child].frequency,
                    first_child: 0,
                    next_sibling,
                });
                queue.push_back((child, idx));
            }
        }

        debug!(node_count = nodes.len(), "built trie");
        Self { nodes }
    }

    /// Wrap decoded nodes after checking the links form a tree.
    ///
    /// Every link must point strictly forward and stay in range, which
    /// rules out cycles. Every non-root node must also be the target of
    /// exactly one child or sibling link, so no subtree is reachable twice.
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Result<Self, DictError> {
        if nodes.is_empty() {
            return Err(DictError::Corrupt("missing root node".to_string()));
        }
        let len = nodes.len();
        let mut referenced = vec![false; len];
        for (idx, node) in nodes.iter().enumerate() {
            for (name, link) in [("child", node.first_child), ("sibling", node.next_sibling)] {
                let link = link as usize;
                if link == 0 {
                    continue;
                }
                if link <= idx || link >= len {
                    return Err(DictError::Corrupt(format!(
                        "node {idx}: {name} link {link} out of order (node count {len})"
                    )));
                }
                if std::mem::replace(&mut referenced[link], true) {
                    return Err(DictError::Corrupt(format!(
                        "node {idx}: {name} link {link} targets an already linked node"
                    )));
                }
            }
        }
        if let Some(orphan) = referenced.iter().skip(1).position(|&r| !r) {
            return Err(DictError::Corrupt(format!(
                "node {} is not linked from any other node",
                orphan + 1
            )));
        }
        Ok(Self { nodes })
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate over all `(word, frequency)` pairs in lexicographic order.
    pub fn iter(&self) -> Words<'_> {
        Words {
            dict: self,
            stack: vec![(ROOT, 0)],
            prefix: String::new(),
        }
    }

    /// Returns (node_count, word_count).
    pub fn stats(&self) -> (usize, usize) {
        let words = self.nodes[1..].iter().filter(|n| n.frequency > 0).count();
        (self.nodes.len(), words)
    }
}

impl Dictionary for TrieDictionary {
    fn children(&self, node: NodeId) -> Vec<(char, NodeId)> {
        let Some(parent) = self.nodes.get(node as usize) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cur = parent.first_child;
        while cur != 0 {
            let Some(child) = self.nodes.get(cur as usize) else {
                break;
            };
            out.push((child.ch, cur));
            cur = child.next_sibling;
        }
        out
    }

    fn frequency(&self, node: NodeId) -> u32 {
        if node == ROOT {
            return 0;
        }
        self.nodes.get(node as usize).map_or(0, |n| n.frequency)
    }
}

/// Depth-first word iterator returned by [`TrieDictionary::iter`].
pub struct Words<'a> {
    dict: &'a TrieDictionary,
    /// Pending nodes with the byte length of their parent's prefix.
    stack: Vec<(NodeId, usize)>,
    prefix: String,
}

impl Iterator for Words<'_> {
    type Item = (String, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, parent_len)) = self.stack.pop() {
            let entry = self.dict.nodes[node as usize];
            self.prefix.truncate(parent_len);
            if node != ROOT {
                self.prefix.push(entry.ch);
            }
            let len = self.prefix.len();
            let children = self.dict.children(node);
            self.stack
                .extend(children.iter().rev().map(|&(_, child)| (child, len)));
            if node != ROOT && entry.frequency > 0 {
                return Some((self.prefix.clone(), entry.frequency));
            }
        }
        None
    }
}
