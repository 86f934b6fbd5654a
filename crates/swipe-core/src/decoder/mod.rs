//! Swipe-gesture decoding via beam search over the dictionary trie.
//!
//! Each touch sample either extends a hypothesis by one letter (scored by
//! the distance to that letter's key) or keeps it on its current key. After
//! every sample the successors are merged to one per trie node and pruned
//! to the beam width. Complete words left at the end are ranked by
//! `WordScorer`.

mod beam;
mod scoring;
mod spatial;
pub(crate) mod testutil;


use tracing::{debug, debug_span};

use crate::dict::Dictionary;
use crate::layout::{KeyLayout, Point};
use crate::settings::{settings, Settings};

pub use beam::{Beam, Hypothesis, StepParams};
pub use scoring::{word_penalty, DefaultWordScorer, WordScorer};
pub use spatial::SpatialModel;

/// A ranked word suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub word: String,
    pub score: f64,
}

/// Beam-search decoder bound to a set of tuning settings.
///
/// Holds no per-gesture state, so one decoder can serve concurrent calls.
pub struct SwipeDecoder<'a> {
    settings: &'a Settings,
}

impl<'a> SwipeDecoder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn step_params(&self) -> StepParams {
        let d = &self.settings.decoder;
        StepParams {
            spatial: SpatialModel::new(d.sigma),
            idle_penalty: d.idle_penalty,
            beam_width: d.beam_width,
        }
    }

    /// Decode with the default word scorer.
    pub fn decode(
        &self,
        path: &[Point],
        layout: &KeyLayout,
        dict: &dyn Dictionary,
    ) -> Vec<Candidate> {
        let scorer = DefaultWordScorer::new(self.settings);
        self.decode_with(path, layout, dict, &scorer)
    }

    /// Decode a gesture into at most `max_results` candidates, best first.
    ///
    /// Paths shorter than `min_points` are taps and yield nothing. Never
    /// fails: bad samples or dictionary links only drop the affected branches.
    pub fn decode_with(
        &self,
        path: &[Point],
        layout: &KeyLayout,
        dict: &dyn Dictionary,
        scorer: &dyn WordScorer,
    ) -> Vec<Candidate> {
        let d = &self.settings.decoder;
        let _span = debug_span!("decode", points = path.len()).entered();
        if path.len() < d.min_points {
            return Vec::new();
        }

        let params = self.step_params();
        let mut beam = Beam::initial();
        for &sample in path {
            beam = beam.advance(sample, layout, dict, &params);
            if beam.is_empty() {
                debug!("beam exhausted");
                return Vec::new();
            }
        }
        debug!(beam_size = beam.len());

        let results = rank(beam.into_hypotheses(), dict, scorer, d.max_results);
        debug!(
            result_count = results.len(),
            best = results.first().map(|c| c.word.as_str())
        );
        results
    }
}

/// Score complete words and return the top `limit`, best first.
fn rank(
    hypotheses: Vec<Hypothesis>,
    dict: &dyn Dictionary,
    scorer: &dyn WordScorer,
    limit: usize,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = hypotheses
        .into_iter()
        .filter_map(|h| {
            let frequency = dict.frequency(h.node);
            if frequency == 0 {
                return None;
            }
            let score = scorer.final_score(h.score, &h.text, frequency);
            score.is_finite().then_some(Candidate {
                word: h.text,
                score,
            })
        })
        .collect();
    candidates.sort_by(|a, b| beam::descending(a.score, b.score));
    candidates.truncate(limit);
    candidates
}

/// Decode with the global settings.
pub fn decode(path: &[Point], layout: &KeyLayout, dict: &dyn Dictionary) -> Vec<Candidate> {
    SwipeDecoder::new(settings()).decode(path, layout, dict)
}
