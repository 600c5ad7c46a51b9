//! Frequency-weighted keyword views over extracted text.

use crate::config::KeywordConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w[\w']*").expect("token pattern is valid"));

/// Token -> occurrence weight. Iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordView {
    weights: BTreeMap<String, u32>,
}

impl KeywordView {
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn weight(&self, token: &str) -> Option<u32> {
        self.weights.get(token).copied()
    }

    pub fn max_weight(&self) -> u32 {
        self.weights.values().copied().max().unwrap_or(0)
    }

    /// Weight scaled to (0, 1] against the heaviest token, for visual sizing.
    pub fn relative_weight(&self, token: &str) -> Option<f32> {
        let max = self.max_weight();
        self.weight(token)
            .filter(|_| max > 0)
            .map(|w| w as f32 / max as f32)
    }

    /// Heaviest first; ties in alphabetical order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> =
            self.weights.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn top(&self, n: usize) -> Vec<(&str, u32)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

pub struct KeywordSummarizer {
    config: KeywordConfig,
    stopwords: HashSet<String>,
}

impl KeywordSummarizer {
    pub fn new(config: KeywordConfig) -> Self {
        let stopwords = config.stopwords.iter().map(|w| w.to_lowercase()).collect();
        Self { config, stopwords }
    }

    pub fn summarize(&self, text: &str) -> KeywordView {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for m in TOKEN.find_iter(text) {
            if let Some(token) = self.normalize(m.as_str()) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
        if self.config.normalize_plurals {
            fold_plurals(&mut counts);
        }

        let weights = if counts.len() > self.config.max_words {
            let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(self.config.max_words);
            ranked.into_iter().collect()
        } else {
            counts
        };

        debug!(tokens = weights.len(), "keyword view built");
        KeywordView { weights }
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim_end_matches('\'');
        let stem = trimmed
            .strip_suffix("'s")
            .or_else(|| trimmed.strip_suffix("'S"))
            .unwrap_or(trimmed);
        if !stem.chars().any(char::is_alphabetic) {
            return None;
        }
        if stem.chars().count() < self.config.min_token_len {
            return None;
        }
        if self.stopwords.contains(&stem.to_lowercase()) {
            return None;
        }
        Some(if self.config.case_fold {
            stem.to_lowercase()
        } else {
            stem.to_string()
        })
    }
}

/// Merges `xs` into `x` when both spellings occur; words ending in `ss` are left alone.
fn fold_plurals(counts: &mut BTreeMap<String, u32>) {
    let plurals: Vec<String> = counts
        .keys()
        .filter(|w| w.ends_with('s') && !w.ends_with("ss") && w.len() > 1)
        .filter(|w| counts.contains_key(&w[..w.len() - 1]))
        .cloned()
        .collect();
    for plural in plurals {
        if let Some(n) = counts.remove(&plural) {
            let singular = &plural[..plural.len() - 1];
            *counts.entry(singular.to_string()).or_insert(0) += n;
        }
    }
}
