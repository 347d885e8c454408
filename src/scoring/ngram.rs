use std::collections::{BTreeMap, HashMap};

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, warn};

use crate::scoring::{PairScorer, ScoringError, VectorScorer};

pub const DEFAULT_NGRAM: usize = 3;
const SCORE_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NgramMetric {
    /// Cosine of the n-gram frequency vectors.
    Cosine,
    /// Jaccard index of the n-gram sets.
    Jaccard,
}

/// Character n-gram frequency profile. Ordered so that float sums over it are
/// reproducible between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    counts: BTreeMap<String, u32>,
    norm: f64,
}

impl Profile {
    pub fn from_text(text: &str, n: usize) -> Self {
        let chars = normalize_text(text);
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        if chars.iter().all(|c| *c == ' ') {
            return Self::default();
        }
        if chars.len() < n {
            counts.insert(chars.iter().collect(), 1);
        } else {
            for window in chars.windows(n) {
                *counts.entry(window.iter().collect()).or_insert(0) += 1;
            }
        }
        let norm = counts
            .values()
            .map(|&c| (c as f64) * (c as f64))
            .sum::<f64>()
            .sqrt();
        Self { counts, norm }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn cosine(&self, other: &Profile) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut dot = 0f64;
        for (gram, &a) in &small.counts {
            if let Some(&b) = large.counts.get(gram) {
                dot += (a as f64) * (b as f64);
            }
        }
        dot / (self.norm * other.norm)
    }

    pub fn jaccard(&self, other: &Profile) -> f64 {
        if self.is_empty() && other.is_empty() {
            return 0.0;
        }
        let shared = self
            .counts
            .keys()
            .filter(|k| other.counts.contains_key(*k))
            .count();
        let union = self.len() + other.len() - shared;
        shared as f64 / union as f64
    }
}

/// Lowercases, collapses whitespace runs into one space and pads both ends
/// with a space so word boundaries become part of the n-grams.
fn normalize_text(text: &str) -> Vec<char> {
    let mut out = vec![' '];
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if out.last() != Some(&' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    if out.last() != Some(&' ') {
        out.push(' ');
    }
    out
}

/// Built-in scorer: compares an entry's n-gram profile with profiles trained
/// from each item's own corpus entry. Scores are in 0..=100.
#[derive(Debug, Clone)]
pub struct NgramScorer {
    n: usize,
    metric: NgramMetric,
    labels: Vec<String>,
    profiles: Vec<Profile>,
    index: HashMap<String, usize>,
}

impl NgramScorer {
    pub fn train<T: AsRef<str>>(
        items: &[String],
        corpus: &[T],
        n: usize,
        metric: NgramMetric,
    ) -> Result<Self, ScoringError> {
        if n == 0 {
            return Err(ScoringError::Training("n-gram size must be >= 1".to_string()));
        }
        if items.len() != corpus.len() {
            return Err(ScoringError::Training(format!(
                "{} items but {} corpus entries",
                items.len(),
                corpus.len()
            )));
        }
        let mut index = HashMap::with_capacity(items.len());
        let mut profiles = Vec::with_capacity(items.len());
        for (i, (label, entry)) in items.iter().zip(corpus).enumerate() {
            let profile = Profile::from_text(entry.as_ref(), n);
            if profile.is_empty() {
                warn!("corpus entry for {label} has no n-grams; it will score 0 against everything");
            }
            debug!(item = %label, grams = profile.len(), "trained profile");
            profiles.push(profile);
            index.entry(label.clone()).or_insert(i);
        }
        Ok(Self {
            n,
            metric,
            labels: items.to_vec(),
            profiles,
            index,
        })
    }

    fn compare(&self, a: &Profile, b: &Profile) -> f64 {
        let sim = match self.metric {
            NgramMetric::Cosine => a.cosine(b),
            NgramMetric::Jaccard => a.jaccard(b),
        };
        SCORE_SCALE * sim
    }
}

impl<C: AsRef<str> + ?Sized> PairScorer<C> for NgramScorer {
    fn score(&self, entry: &C, item: &str) -> Result<f64, ScoringError> {
        let idx = *self
            .index
            .get(item)
            .ok_or_else(|| ScoringError::UnknownItem(item.to_string()))?;
        let profile = Profile::from_text(entry.as_ref(), self.n);
        Ok(self.compare(&profile, &self.profiles[idx]))
    }

    fn score_row(&self, entry: &C, items: &[String]) -> Result<Vec<f64>, (usize, ScoringError)> {
        let profile = Profile::from_text(entry.as_ref(), self.n);
        items
            .iter()
            .enumerate()
            .map(|(col, item)| match self.index.get(item) {
                Some(&idx) => Ok(self.compare(&profile, &self.profiles[idx])),
                None => Err((col, ScoringError::UnknownItem(item.clone()))),
            })
            .collect()
    }
}

impl<C: AsRef<str> + ?Sized> VectorScorer<C> for NgramScorer {
    fn score_vector(&self, entry: &C) -> Result<Vec<f64>, ScoringError> {
        let profile = Profile::from_text(entry.as_ref(), self.n);
        Ok(self
            .profiles
            .iter()
            .map(|p| self.compare(&profile, p))
            .collect())
    }

    fn column_labels(&self) -> Option<Vec<String>> {
        Some(self.labels.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scoring/ngram.rs"]
mod tests;
