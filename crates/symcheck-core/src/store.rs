//! Answer storage: question index to recorded answer.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::Answer;

/// Recorded answers keyed by question index.
///
/// Recording at an already-answered index overwrites it: last write wins,
/// no history is kept. Keys are only ever written by the navigation state
/// machine, which guarantees they are valid question indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerStore {
    answers: HashMap<usize, Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer at `index`, replacing any previous one.
    pub fn record(&mut self, index: usize, answer: Answer) {
        self.answers.insert(index, answer);
    }

    pub fn get(&self, index: usize) -> Option<&Answer> {
        self.answers.get(&index)
    }

    pub fn has(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    /// Number of distinct answered indices.
    pub fn count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Answer)> {
        self.answers.iter().map(|(&i, a)| (i, a))
    }

    /// An index-ordered copy, for deterministic export and display.
    pub fn snapshot(&self) -> BTreeMap<usize, Answer> {
        self.answers.iter().map(|(&i, a)| (i, a.clone())).collect()
    }
}
