//! # Corpus Store Module
//!
//! File-backed name lists keyed by `(country slug, gender)`.
//!
//! Resolution walks an explicit, ordered list of [`ResolutionStrategy`]
//! values. Each strategy names the files it would read, so a miss can report
//! every path that was tried. The first strategy that yields a non-empty list
//! wins:
//!
//! 1. `{slug}_{gender}.txt` (for mixed: `{slug}_mixed.txt`)
//! 2. mixed only: union of `{slug}_male.txt` and `{slug}_female.txt`
//! 3. `{slug}.txt`
//! 4. `{slug}_{gender}_first.txt` + `{slug}_last.txt`
//! 5. `first_names/{slug}_{gender}.txt` + `last_names/{slug}.txt`
//!
//! Strategies 4 and 5 produce split first/last lists that are combined at
//! sampling time.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::dialogue::Gender;
use crate::errors::CorpusError;
use crate::text_normalization::country_slug;

/// A resolved name source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    /// Complete names, one per entry
    Names(Vec<String>),
    /// First and last names drawn independently
    Split { first: Vec<String>, last: Vec<String> },
}

impl Corpus {
    /// Number of distinct draws without replacement, `None` for split lists
    pub fn len(&self) -> Option<usize> {
        match self {
            Corpus::Names(names) => Some(names.len()),
            Corpus::Split { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Corpus::Names(names) => names.is_empty(),
            Corpus::Split { first, last } => first.is_empty() || last.is_empty(),
        }
    }
}

/// One way of locating a corpus on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// `{slug}_{gender}.txt`
    CombinedFile,
    /// `{slug}_male.txt` ∪ `{slug}_female.txt`, mixed gender only
    MixedUnion,
    /// `{slug}.txt`
    CountryFile,
    /// `{slug}_{gender}_first.txt` + `{slug}_last.txt`
    SplitLists,
    /// `first_names/{slug}_{gender}.txt` + `last_names/{slug}.txt`
    SplitDirectories,
}

impl ResolutionStrategy {
    /// Resolution order
    pub const ORDER: [ResolutionStrategy; 5] = [
        ResolutionStrategy::CombinedFile,
        ResolutionStrategy::MixedUnion,
        ResolutionStrategy::CountryFile,
        ResolutionStrategy::SplitLists,
        ResolutionStrategy::SplitDirectories,
    ];

    /// Files this strategy reads, in order; empty when it does not apply
    pub fn candidates(&self, root: &Path, slug: &str, gender: Gender) -> Vec<PathBuf> {
        let g = gender.as_str();
        match self {
            ResolutionStrategy::CombinedFile => vec![root.join(format!("{slug}_{g}.txt"))],
            ResolutionStrategy::MixedUnion => match gender {
                Gender::Mixed => vec![
                    root.join(format!("{slug}_male.txt")),
                    root.join(format!("{slug}_female.txt")),
                ],
                _ => Vec::new(),
            },
            ResolutionStrategy::CountryFile => vec![root.join(format!("{slug}.txt"))],
            ResolutionStrategy::SplitLists => vec![
                root.join(format!("{slug}_{g}_first.txt")),
                root.join(format!("{slug}_last.txt")),
            ],
            ResolutionStrategy::SplitDirectories => vec![
                root.join("first_names").join(format!("{slug}_{g}.txt")),
                root.join("last_names").join(format!("{slug}.txt")),
            ],
        }
    }
}

/// Corpus files under a single root directory
#[derive(Debug, Clone)]
pub struct CorpusStore {
    root: PathBuf,
}

impl CorpusStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the root directory exists
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Primary path for a `(slug, gender)` corpus
    pub fn corpus_path(&self, slug: &str, gender: Gender) -> PathBuf {
        self.root.join(format!("{slug}_{}.txt", gender.as_str()))
    }

    /// Write a corpus atomically, replacing any previous file.
    ///
    /// The names are written to a temporary file in the store directory and
    /// renamed over the target, so readers never observe a partial corpus.
    pub fn publish(
        &self,
        slug: &str,
        gender: Gender,
        names: &[String],
    ) -> Result<PathBuf, CorpusError> {
        std::fs::create_dir_all(&self.root).map_err(|e| CorpusError::io(&self.root, e))?;

        let target = self.corpus_path(slug, gender);
        let mut temp =
            NamedTempFile::new_in(&self.root).map_err(|e| CorpusError::io(&self.root, e))?;

        let mut contents = names.join("\n");
        contents.push('\n');
        temp.write_all(contents.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| CorpusError::io(temp.path(), e))?;

        temp.persist(&target)
            .map_err(|e| CorpusError::io(&target, e.error))?;

        debug!(path = %target.display(), names = names.len(), "Published corpus");
        Ok(target)
    }

    /// Resolve a corpus for the country and gender.
    ///
    /// Returns [`CorpusError::NotFound`] listing every attempted path when no
    /// strategy yields a non-empty list.
    pub async fn resolve(&self, country: &str, gender: Gender) -> Result<Corpus, CorpusError> {
        let slug = country_slug(country);
        let mut attempted = Vec::new();

        for strategy in ResolutionStrategy::ORDER {
            let candidates = strategy.candidates(&self.root, &slug, gender);
            if candidates.is_empty() {
                continue;
            }
            attempted.extend(candidates.iter().cloned());

            if let Some(corpus) = self.try_strategy(strategy, &candidates).await {
                debug!(
                    country = %slug,
                    gender = gender.as_str(),
                    strategy = ?strategy,
                    "Corpus resolved"
                );
                return Ok(corpus);
            }
        }

        warn!(
            country = %slug,
            gender = gender.as_str(),
            attempted = attempted.len(),
            "No corpus found"
        );
        Err(CorpusError::NotFound {
            country: country.trim().to_string(),
            gender,
            attempted,
        })
    }

    async fn try_strategy(
        &self,
        strategy: ResolutionStrategy,
        candidates: &[PathBuf],
    ) -> Option<Corpus> {
        match strategy {
            ResolutionStrategy::CombinedFile | ResolutionStrategy::CountryFile => {
                read_names(&candidates[0]).await.map(Corpus::Names)
            }
            ResolutionStrategy::MixedUnion => {
                let mut union = Vec::new();
                for path in candidates {
                    if let Some(names) = read_names(path).await {
                        union.extend(names);
                    }
                }
                (!union.is_empty()).then_some(Corpus::Names(union))
            }
            ResolutionStrategy::SplitLists | ResolutionStrategy::SplitDirectories => {
                let first = read_names(&candidates[0]).await?;
                let last = read_names(&candidates[1]).await?;
                Some(Corpus::Split { first, last })
            }
        }
    }
}

/// Non-empty lines of a corpus file, `None` when missing, unreadable or empty
async fn read_names(path: &Path) -> Option<Vec<String>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping unreadable corpus file");
            return None;
        }
    };

    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    (!names.is_empty()).then_some(names)
}
