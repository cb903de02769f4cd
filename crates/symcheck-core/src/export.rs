//! Immutable result snapshots for completed sessions.
//!
//! The result is serializable so collaborators can persist or transmit it,
//! but the core itself owns no file format; writing it anywhere is the
//! caller's business.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::QuizEngine;
use crate::model::{Answer, RiskLevel};

/// A completed session, frozen.
///
/// Everything here is a copy: mutating or restarting the engine afterwards
/// never changes an already-exported result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Tool identifier from the definition.
    pub tool: String,
    /// The session this result was exported from.
    pub session_id: Uuid,
    /// Aggregate score: sum of recorded answer weights.
    pub score: i64,
    pub level: RiskLevel,
    /// The classified bucket's display label.
    pub label: String,
    /// The classified bucket's display color.
    pub color: String,
    /// Index-ordered snapshot of the recorded answers.
    pub answers: BTreeMap<usize, Answer>,
    /// When the session completed, not when the export was taken.
    pub completed_at: DateTime<Utc>,
    /// Advice list for the classified level.
    pub recommendations: Vec<String>,
}

/// Build a result snapshot from a completed session.
///
/// Returns `None` while the session is still in progress. Because the
/// score, level, and timestamp are captured at the completing transition,
/// repeated calls on the same completed session return equal snapshots.
pub fn export(engine: &QuizEngine) -> Option<AssessmentResult> {
    let completion = engine.completion()?;
    let definition = engine.definition();
    let bucket = definition.scoring.bucket(completion.level);

    Some(AssessmentResult {
        tool: definition.id.clone(),
        session_id: engine.session_id(),
        score: completion.score,
        level: completion.level,
        label: bucket
            .map(|b| b.label.clone())
            .unwrap_or_else(|| completion.level.to_string()),
        color: bucket.map(|b| b.color.clone()).unwrap_or_default(),
        answers: engine.answers().snapshot(),
        completed_at: completion.completed_at,
        recommendations: definition.recommendations_for(completion.level).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::engine::{Selection, SessionState};
    use crate::loader::parse_definition_str;
    use crate::model::QuizDefinition;

    fn definition() -> Arc<QuizDefinition> {
        Arc::new(
            parse_definition_str(
                r#"{
                    "id": "mini-check",
                    "questions": [
                        {"kind": "choice", "prompt": "Q0", "options": [
                            {"value": "a", "weight": 2, "text": "A"}
                        ]},
                        {"kind": "choice", "prompt": "Q1", "options": [
                            {"value": "b", "weight": 3, "text": "B"}
                        ]}
                    ],
                    "scoringRules": {
                        "low": {"maxScore": 2},
                        "moderate": {"maxScore": 4},
                        "high": {"maxScore": 6}
                    },
                    "recommendations": {
                        "high": ["Seek advice.", "Rest."]
                    },
                    "autoAdvanceEnabled": false
                }"#,
            )
            .unwrap(),
        )
    }

    fn completed_engine() -> QuizEngine {
        let mut engine = QuizEngine::new(definition());
        assert!(matches!(
            engine.select_answer(0, &"a".into()),
            Selection::Recorded { .. }
        ));
        engine.next();
        assert!(matches!(
            engine.select_answer(1, &"b".into()),
            Selection::Recorded { .. }
        ));
        engine.next();
        assert_eq!(engine.state(), SessionState::Completed);
        engine
    }

    #[test]
    fn export_before_completion_is_none() {
        let engine = QuizEngine::new(definition());
        assert!(export(&engine).is_none());

        let mut engine = QuizEngine::new(definition());
        engine.select_answer(0, &"a".into());
        engine.next();
        assert!(export(&engine).is_none());
    }

    #[test]
    fn export_snapshots_the_completed_session() {
        let engine = completed_engine();
        let result = export(&engine).unwrap();

        assert_eq!(result.tool, "mini-check");
        assert_eq!(result.session_id, engine.session_id());
        assert_eq!(result.score, 5);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.label, "High risk");
        assert_eq!(result.answers.len(), 2);
        assert_eq!(result.answers[&0].display_text, "A");
        assert_eq!(result.recommendations, vec!["Seek advice.", "Rest."]);
    }

    #[test]
    fn export_is_idempotent() {
        let engine = completed_engine();
        let first = export(&engine).unwrap();
        let second = export(&engine).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.completed_at, second.completed_at);
    }

    #[test]
    fn exported_result_survives_restart() {
        let mut engine = completed_engine();
        let result = export(&engine).unwrap();

        engine.restart();
        assert!(export(&engine).is_none());
        assert_eq!(result.answers.len(), 2);
        assert_eq!(result.score, 5);
    }

    #[test]
    fn result_json_round_trip() {
        let engine = completed_engine();
        let result = export(&engine).unwrap();

        let json = serde_json::to_string_pretty(&result).unwrap();
        let parsed: AssessmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
