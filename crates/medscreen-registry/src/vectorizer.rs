#![deny(unsafe_code)]

//! Text vectorizer capability trait and the exported count vectorizer.

use std::collections::BTreeMap;
use std::fmt;

use medscreen_model::FeatureVector;

/// Turns free text into the dense term-count vector a classifier expects.
pub trait Vectorizer: fmt::Debug + Send + Sync {
    /// Width of the produced vectors.
    fn vocabulary_len(&self) -> usize;

    /// Vectorize one piece of text. Total over all inputs; unknown terms
    /// are ignored.
    fn transform(&self, text: &str) -> FeatureVector;
}

/// Count vectorizer restored from an exported vocabulary.
///
/// Tokenization matches the fitting pipeline: the text is lowercased (when
/// the artifact says so), split on non-word characters, and tokens shorter
/// than two characters are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CountVectorizer {
    vocabulary: BTreeMap<String, usize>,
    lowercase: bool,
}

impl CountVectorizer {
    /// Assemble a vectorizer from an exported vocabulary.
    ///
    /// The vocabulary maps each term to its output column and vectors are
    /// `vocabulary_len()` wide. A term mapped outside `0..len` never
    /// receives a count; artifact loading validates density, so loaded
    /// instances use every column.
    #[must_use]
    pub fn new(vocabulary: BTreeMap<String, usize>, lowercase: bool) -> Self {
        Self {
            vocabulary,
            lowercase,
        }
    }

    /// Terms in the fitted vocabulary, in lexicographic order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }
}

impl Vectorizer for CountVectorizer {
    fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, text: &str) -> FeatureVector {
        let mut counts = vec![0.0; self.vocabulary.len()];
        let lowered;
        let source = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };
        for token in tokens(source) {
            if let Some(&column) = self.vocabulary.get(token)
                && let Some(slot) = counts.get_mut(column)
            {
                *slot += 1.0;
            }
        }
        FeatureVector::new(counts)
    }
}

/// Word tokens of at least two characters.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
}
