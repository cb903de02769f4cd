//! Score aggregation and risk classification.
//!
//! Both functions are pure: the navigation state machine guarantees every
//! question is answered before a session completes, but `score` tolerates
//! partial input so it can be exercised directly in tests.

use crate::model::{RiskLevel, ScoringScale};
use crate::store::AnswerStore;

/// Sum of the weights of all recorded answers, in no particular order.
pub fn score(answers: &AnswerStore) -> i64 {
    answers.iter().map(|(_, a)| a.weight).sum()
}

/// Classify a score against a scale.
///
/// Buckets are evaluated in ascending bound order and the boundary is
/// inclusive: a score exactly equal to a bucket's `max_score` belongs to
/// that bucket. Scores above every bound fall into the unbounded top tier.
pub fn classify(score: i64, scale: &ScoringScale) -> RiskLevel {
    scale
        .buckets()
        .iter()
        .find(|bucket| score <= bucket.max_score)
        .map(|bucket| bucket.level)
        .unwrap_or_else(|| scale.top())
}
