//! Sampling engine: turns a resolved corpus and a requested count into names.
//!
//! - `count <= corpus size`: `count` entries without replacement
//! - `count > corpus size`: every entry, shuffled (never fabricates extra names)
//! - split first/last corpora: exactly `count` independent draws, with replacement

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use tracing::debug;

use crate::config::MAX_COUNT;
use crate::corpus::Corpus;
use crate::errors::InputError;

#[derive(Debug, Clone, Copy)]
pub struct SamplingEngine {
    max_count: u32,
}

impl Default for SamplingEngine {
    fn default() -> Self {
        Self::new(MAX_COUNT)
    }
}

impl SamplingEngine {
    /// The bound is clamped to `MAX_COUNT`
    pub fn new(max_count: u32) -> Self {
        Self {
            max_count: max_count.clamp(1, MAX_COUNT),
        }
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Sample `count` names from the corpus.
    ///
    /// Requests outside `1..=max_count` are rejected before any sampling.
    pub fn sample(
        &self,
        corpus: &Corpus,
        count: u32,
        rng: &mut StdRng,
    ) -> Result<Vec<String>, InputError> {
        if count < 1 || count > self.max_count {
            return Err(InputError::OutOfRange {
                min: 1,
                max: self.max_count,
            });
        }
        let count = count as usize;

        let names = match corpus {
            Corpus::Names(names) if count <= names.len() => {
                let mut picked: Vec<String> = index::sample(rng, names.len(), count)
                    .into_iter()
                    .map(|i| names[i].clone())
                    .collect();
                picked.shuffle(rng);
                picked
            }
            Corpus::Names(names) => {
                debug!(requested = count, available = names.len(), "Corpus exhausted");
                let mut all = names.clone();
                all.shuffle(rng);
                all
            }
            Corpus::Split { first, last } => (0..count)
                .filter_map(|_| {
                    let f = first.choose(rng)?;
                    let l = last.choose(rng)?;
                    Some(format!("{f} {l}"))
                })
                .collect(),
        };

        Ok(names)
    }
}
