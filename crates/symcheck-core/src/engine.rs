//! The quiz session engine: navigation state machine, answer recording,
//! auto-advance scheduling, and completion.
//!
//! One `QuizEngine` owns exactly one session over a shared, immutable
//! definition. Every operation is a synchronous total function: misuse
//! (advancing without an answer, selecting for a non-current question,
//! firing a stale auto-advance token) is a defined no-op, never an error,
//! so UI-driven event storms stay safe.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::export::AssessmentResult;
use crate::model::{AnswerValue, QuizDefinition, RiskLevel};
use crate::scoring;
use crate::store::AnswerStore;
use crate::traits::{Announcer, NoopAnnouncer, NoopTelemetry, TelemetrySink};

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Presenting the question at this index.
    AtQuestion(usize),
    /// All questions answered and scored; terminal until `restart`.
    Completed,
}

/// Cancellation handle for a scheduled auto-advance.
///
/// The engine never sleeps: `select_answer` hands this token to the host,
/// which owns the delay and calls [`QuizEngine::fire_auto_advance`] when it
/// elapses. A token only advances the session if its schedule is still the
/// pending one, so callbacks scheduled against a superseded state die quietly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    generation: u64,
}

/// Outcome of a `select_answer` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The answer was recorded. Carries the freshly scheduled auto-advance
    /// token when the definition enables auto-advance.
    Recorded { auto_advance: Option<AdvanceToken> },
    /// Non-current question index or unknown option value; nothing changed.
    Rejected,
}

/// Read-only session progress for rendering collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// `None` once the session has completed.
    pub current_index: Option<usize>,
    pub total_questions: usize,
    pub answered_count: usize,
    pub is_completed: bool,
}

/// Captured exactly once, at the transition into `Completed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub score: i64,
    pub level: RiskLevel,
    pub completed_at: DateTime<Utc>,
}

/// The quiz session engine.
pub struct QuizEngine {
    definition: Arc<QuizDefinition>,
    session_id: Uuid,
    answers: AnswerStore,
    state: SessionState,
    completion: Option<Completion>,
    /// Monotonic schedule counter; a token is live only while it matches
    /// `pending_advance`.
    generation: u64,
    pending_advance: Option<u64>,
    announcer: Arc<dyn Announcer>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl QuizEngine {
    /// Create a session with no-op observation sinks.
    pub fn new(definition: Arc<QuizDefinition>) -> Self {
        Self::with_observers(definition, Arc::new(NoopAnnouncer), Arc::new(NoopTelemetry))
    }

    /// Create a session wired to an announcer and a telemetry sink.
    pub fn with_observers(
        definition: Arc<QuizDefinition>,
        announcer: Arc<dyn Announcer>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let engine = Self {
            session_id: Uuid::new_v4(),
            answers: AnswerStore::new(),
            state: SessionState::AtQuestion(0),
            completion: None,
            generation: 0,
            pending_advance: None,
            announcer,
            telemetry,
            definition,
        };
        engine.telemetry.emit(
            "assessment_started",
            &json!({
                "tool": engine.definition.id,
                "question_count": engine.definition.question_count(),
            }),
        );
        engine
    }

    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// The completion outcome, once the session has reached `Completed`.
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    /// Whether the current question has a recorded answer.
    pub fn can_proceed(&self) -> bool {
        match self.state {
            SessionState::AtQuestion(i) => self.answers.has(i),
            SessionState::Completed => false,
        }
    }

    /// Record an answer for the current question.
    ///
    /// Valid only while `index` is the current question; a selection for any
    /// other index is rejected rather than silently stored. Re-selecting
    /// overwrites the previous answer and supersedes any pending
    /// auto-advance schedule.
    pub fn select_answer(&mut self, index: usize, value: &AnswerValue) -> Selection {
        let SessionState::AtQuestion(current) = self.state else {
            return Selection::Rejected;
        };
        if current != index {
            return Selection::Rejected;
        }
        let Some(question) = self.definition.question(index) else {
            return Selection::Rejected;
        };
        let Some(answer) = question.resolve_answer(value) else {
            return Selection::Rejected;
        };

        self.announcer
            .announce(&format!("Selected: {}", answer.display_text));
        self.answers.record(index, answer);
        self.pending_advance = None;

        let auto_advance = if self.definition.auto_advance_enabled {
            self.generation += 1;
            self.pending_advance = Some(self.generation);
            Some(AdvanceToken {
                generation: self.generation,
            })
        } else {
            None
        };

        Selection::Recorded { auto_advance }
    }

    /// Advance to the next question, or complete from the last one.
    ///
    /// No-op unless the current question is answered. Returns whether a
    /// transition happened.
    pub fn next(&mut self) -> bool {
        if !self.can_proceed() {
            return false;
        }
        let SessionState::AtQuestion(current) = self.state else {
            return false;
        };
        self.pending_advance = None;

        if current + 1 < self.definition.question_count() {
            self.state = SessionState::AtQuestion(current + 1);
            tracing::debug!(index = current + 1, "advanced to question");
        } else {
            self.complete();
        }
        true
    }

    /// Step back one question. No-op at the first question and after
    /// completion; restart is the only way back out of `Completed`.
    pub fn previous(&mut self) -> bool {
        match self.state {
            SessionState::AtQuestion(i) if i > 0 => {
                self.pending_advance = None;
                self.state = SessionState::AtQuestion(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Reset to a fresh session over the same definition: clears answers,
    /// discards any completion outcome, cancels pending auto-advance, and
    /// assigns a new session id.
    pub fn restart(&mut self) {
        self.pending_advance = None;
        self.generation += 1;
        self.answers.clear();
        self.completion = None;
        self.state = SessionState::AtQuestion(0);
        self.session_id = Uuid::new_v4();
        self.announcer.announce("Assessment restarted");
    }

    /// Deliver a previously scheduled auto-advance.
    ///
    /// No-op unless `token` is still the pending schedule. Returns whether
    /// the session advanced.
    pub fn fire_auto_advance(&mut self, token: AdvanceToken) -> bool {
        if self.pending_advance != Some(token.generation) {
            return false;
        }
        self.pending_advance = None;
        self.next()
    }

    /// Read-only progress view.
    pub fn view(&self) -> SessionView {
        SessionView {
            current_index: match self.state {
                SessionState::AtQuestion(i) => Some(i),
                SessionState::Completed => None,
            },
            total_questions: self.definition.question_count(),
            answered_count: self.answers.count(),
            is_completed: self.state == SessionState::Completed,
        }
    }

    /// Detached copy of the recorded answers.
    pub fn answer_summary(&self) -> AnswerStore {
        self.answers.clone()
    }

    /// Immutable result snapshot; `None` until the session completes.
    pub fn export_results(&self) -> Option<AssessmentResult> {
        crate::export::export(self)
    }

    fn complete(&mut self) {
        let score = scoring::score(&self.answers);
        let level = scoring::classify(score, &self.definition.scoring);
        self.state = SessionState::Completed;
        self.completion = Some(Completion {
            score,
            level,
            completed_at: Utc::now(),
        });

        let label = self
            .definition
            .scoring
            .bucket(level)
            .map(|b| b.label.clone())
            .unwrap_or_else(|| level.to_string());
        self.announcer
            .announce(&format!("Assessment complete: {label}"));
        self.telemetry.emit(
            "assessment_completed",
            &json!({
                "tool": self.definition.id,
                "score": score,
                "level": level.to_string(),
                "answered_count": self.answers.count(),
            }),
        );
        tracing::debug!(score, level = %level, "session completed");
    }
}
