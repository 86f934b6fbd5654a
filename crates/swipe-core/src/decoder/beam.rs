//! One beam-search step as three pure stages:
//! `expand` (successors) -> `merge_by_node` -> `prune`.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::dict::{Dictionary, NodeId, ROOT};
use crate::layout::{KeyLayout, Point};

use super::spatial::SpatialModel;

/// A partial word being traced through the trie.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    pub text: String,
    /// Accumulated spatial log-likelihood (plus idle penalties).
    pub score: f64,
    pub node: NodeId,
    pub last_char: Option<char>,
}

impl Hypothesis {
    pub fn root() -> Self {
        Self {
            text: String::new(),
            score: 0.0,
            node: ROOT,
            last_char: None,
        }
    }
}

/// A candidate extension of `parent` in the current beam. Text is only
/// built for successors that survive pruning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Successor {
    pub parent: usize,
    /// `Some(c)` for a new letter, `None` for a self-loop.
    pub edge: Option<char>,
    pub node: NodeId,
    pub score: f64,
}

/// Per-step search parameters.
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub spatial: SpatialModel,
    pub idle_penalty: f64,
    pub beam_width: usize,
}

/// Bounded set of hypotheses, at most one per trie node.
#[derive(Debug, Clone)]
pub struct Beam {
    hypotheses: Vec<Hypothesis>,
}

impl Beam {
    pub fn initial() -> Self {
        Self {
            hypotheses: vec![Hypothesis::root()],
        }
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    pub fn into_hypotheses(self) -> Vec<Hypothesis> {
        self.hypotheses
    }

    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// Consume one touch sample.
    pub fn advance(
        &self,
        sample: Point,
        layout: &KeyLayout,
        dict: &dyn Dictionary,
        params: &StepParams,
    ) -> Beam {
        let successors = expand(&self.hypotheses, sample, layout, dict, params);
        let merged = merge_by_node(successors);
        let kept = prune(merged, params.beam_width);
        Beam {
            hypotheses: kept.iter().map(|s| self.materialize(s)).collect(),
        }
    }

    fn materialize(&self, successor: &Successor) -> Hypothesis {
        let parent = &self.hypotheses[successor.parent];
        match successor.edge {
            Some(c) => {
                let mut text = String::with_capacity(parent.text.len() + c.len_utf8());
                text.push_str(&parent.text);
                text.push(c);
                Hypothesis {
                    text,
                    score: successor.score,
                    node: successor.node,
                    last_char: Some(c),
                }
            }
            None => Hypothesis {
                score: successor.score,
                ..parent.clone()
            },
        }
    }
}

/// Every successor of every hypothesis for one sample, in beam order:
/// child edges first, then the self-loop (or the idle step at the root).
pub(crate) fn expand(
    hypotheses: &[Hypothesis],
    sample: Point,
    layout: &KeyLayout,
    dict: &dyn Dictionary,
    params: &StepParams,
) -> Vec<Successor> {
    let mut out = Vec::new();
    for (parent, h) in hypotheses.iter().enumerate() {
        for (c, child) in dict.children(h.node) {
            // Keys missing from the layout are unreachable.
            let Some(spatial) = params.spatial.key_score(layout, c, sample) else {
                continue;
            };
            out.push(Successor {
                parent,
                edge: Some(c),
                node: child,
                score: h.score + spatial,
            });
        }

        let stay = match h.last_char {
            Some(c) => params.spatial.key_score(layout, c, sample),
            None => Some(-params.idle_penalty),
        };
        if let Some(delta) = stay {
            out.push(Successor {
                parent,
                edge: None,
                node: h.node,
                score: h.score + delta,
            });
        }
    }
    out
}

/// Keep the best successor per trie node, dropping non-finite scores.
///
/// Output follows first-appearance order of each node; on equal scores the
/// earlier successor wins.
pub(crate) fn merge_by_node(successors: Vec<Successor>) -> Vec<Successor> {
    let mut slot_of: HashMap<NodeId, usize> = HashMap::with_capacity(successors.len());
    let mut merged: Vec<Successor> = Vec::with_capacity(successors.len());
    for s in successors {
        if !s.score.is_finite() {
            continue;
        }
        match slot_of.get(&s.node) {
            Some(&slot) => {
                if s.score > merged[slot].score {
                    merged[slot] = s;
                }
            }
            None => {
                slot_of.insert(s.node, merged.len());
                merged.push(s);
            }
        }
    }
    merged
}

/// Stable sort by descending score, then truncate to `width`.
pub(crate) fn prune(mut merged: Vec<Successor>, width: usize) -> Vec<Successor> {
    merged.sort_by(|a, b| descending(a.score, b.score));
    merged.truncate(width);
    merged
}

pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
