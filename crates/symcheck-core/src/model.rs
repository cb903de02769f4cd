//! Core data model types for symcheck.
//!
//! These are the fundamental types the entire engine uses to represent a
//! quiz definition, its questions and options, and recorded answers.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An immutable quiz definition, produced once by the loader.
///
/// Question order is semantic: a question's position in `questions` is its
/// 0-based index, and navigation walks that order.
#[derive(Debug, Clone, Serialize)]
pub struct QuizDefinition {
    /// Tool identifier carried into exported results.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// The questions, in source order.
    pub questions: Vec<Question>,
    /// Risk buckets, sorted ascending by upper bound.
    pub scoring: ScoringScale,
    /// Advice lists per risk level. Missing levels mean no advice.
    pub recommendations: HashMap<RiskLevel, Vec<String>>,
    /// Display scaling bound only; never used to compute scores.
    pub max_score: i64,
    /// Whether answering schedules an automatic advance to the next question.
    pub auto_advance_enabled: bool,
}

impl QuizDefinition {
    /// The question at `index`, if any.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Advice for a level; empty when the definition provides none.
    pub fn recommendations_for(&self, level: RiskLevel) -> &[String] {
        self.recommendations
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A single question within a quiz definition.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    /// 0-based position within the definition.
    pub index: usize,
    /// What sort of answer input this question takes.
    pub kind: QuestionKind,
    /// The question text shown to the user.
    pub prompt: String,
    /// Optional supporting text.
    pub description: Option<String>,
    /// Selectable options, in source order.
    pub options: Vec<AnswerOption>,
    /// Endpoint labels for `scale` questions; `None` for `choice`.
    pub scale_labels: Option<ScaleLabels>,
}

impl Question {
    /// Find the option with the given value identity.
    pub fn option(&self, value: &AnswerValue) -> Option<&AnswerOption> {
        self.options.iter().find(|o| &o.value == value)
    }

    /// Resolve a selected option value into a recorded answer.
    ///
    /// Returns `None` when no option carries `value`; an answer can only be
    /// built from an option that actually exists on this question.
    pub fn resolve_answer(&self, value: &AnswerValue) -> Option<Answer> {
        self.option(value).map(|option| Answer {
            value: option.value.clone(),
            weight: option.weight,
            display_text: option.display_text(),
        })
    }
}

/// Supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Discrete options with visible text (and optionally an icon).
    Choice,
    /// A numeric scale with labelled endpoints.
    Scale,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Choice => write!(f, "choice"),
            QuestionKind::Scale => write!(f, "scale"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "choice" => Ok(QuestionKind::Choice),
            "scale" => Ok(QuestionKind::Scale),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// A selectable option on a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOption {
    /// Identity of the option; what `select_answer` matches on.
    pub value: AnswerValue,
    /// Integer contribution toward the aggregate score.
    pub weight: i64,
    /// Visible text. Required for `choice` questions, optional for `scale`.
    pub text: Option<String>,
    /// Optional icon hint for rendering collaborators.
    pub icon: Option<String>,
}

impl AnswerOption {
    /// Text recorded on the answer: the option text, or the value itself.
    pub fn display_text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.value.to_string(),
        }
    }
}

/// Option identity: quiz documents use both strings and bare numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Integer(n) => write!(f, "{n}"),
            AnswerValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Integer(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

/// Endpoint labels for a scale question, resolved to defaults at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleLabels {
    pub min: String,
    pub max: String,
}

impl Default for ScaleLabels {
    fn default() -> Self {
        Self {
            min: "Not at all".to_string(),
            max: "Extremely".to_string(),
        }
    }
}

/// A recorded answer: a selected option resolved against its question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The selected option's value.
    pub value: AnswerValue,
    /// The selected option's weight at the time of selection.
    pub weight: i64,
    /// Text suitable for summaries and announcements.
    pub display_text: String,
}

/// Risk levels, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" | "medium" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

/// One classification bucket: scores up to and including `max_score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringBucket {
    pub level: RiskLevel,
    /// Inclusive upper bound. The highest bucket is treated as unbounded.
    pub max_score: i64,
    /// Display label, e.g. "Low risk".
    pub label: String,
    /// Display color hint for rendering collaborators.
    pub color: String,
}

/// The full classification scale: buckets sorted ascending by `max_score`.
///
/// Construction validates the scale so classification can stay total: all
/// three levels must be present exactly once, with strictly increasing
/// bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringScale {
    buckets: Vec<ScoringBucket>,
}

impl ScoringScale {
    pub fn new(mut buckets: Vec<ScoringBucket>) -> Result<Self, String> {
        for level in RiskLevel::ALL {
            match buckets.iter().filter(|b| b.level == level).count() {
                0 => return Err(format!("scoring rules missing level: {level}")),
                1 => {}
                _ => return Err(format!("scoring rules define level twice: {level}")),
            }
        }

        buckets.sort_by_key(|b| b.max_score);

        for pair in buckets.windows(2) {
            if pair[0].max_score >= pair[1].max_score {
                return Err(format!(
                    "scoring rule bounds are not strictly increasing: {} ({}) then {} ({})",
                    pair[0].level, pair[0].max_score, pair[1].level, pair[1].max_score
                ));
            }
        }

        Ok(Self { buckets })
    }

    /// Buckets in ascending bound order.
    pub fn buckets(&self) -> &[ScoringBucket] {
        &self.buckets
    }

    /// The unbounded top tier's level.
    pub fn top(&self) -> RiskLevel {
        self.buckets
            .last()
            .map(|b| b.level)
            .unwrap_or(RiskLevel::High)
    }

    /// The bucket for a level.
    pub fn bucket(&self, level: RiskLevel) -> Option<&ScoringBucket> {
        self.buckets.iter().find(|b| b.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(level: RiskLevel, max_score: i64) -> ScoringBucket {
        ScoringBucket {
            level,
            max_score,
            label: format!("{level} risk"),
            color: "#808080".into(),
        }
    }

    #[test]
    fn kind_display_and_parse() {
        assert_eq!(QuestionKind::Choice.to_string(), "choice");
        assert_eq!(QuestionKind::Scale.to_string(), "scale");
        assert_eq!("choice".parse::<QuestionKind>().unwrap(), QuestionKind::Choice);
        assert_eq!("Scale".parse::<QuestionKind>().unwrap(), QuestionKind::Scale);
        assert!("slider".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn risk_level_display_and_parse() {
        assert_eq!(RiskLevel::Low.to_string(), "low");
        assert_eq!("moderate".parse::<RiskLevel>().unwrap(), RiskLevel::Moderate);
        assert_eq!("medium".parse::<RiskLevel>().unwrap(), RiskLevel::Moderate);
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn scale_sorts_buckets_ascending() {
        let scale = ScoringScale::new(vec![
            bucket(RiskLevel::High, 100),
            bucket(RiskLevel::Low, 5),
            bucket(RiskLevel::Moderate, 10),
        ])
        .unwrap();
        let bounds: Vec<i64> = scale.buckets().iter().map(|b| b.max_score).collect();
        assert_eq!(bounds, vec![5, 10, 100]);
        assert_eq!(scale.top(), RiskLevel::High);
    }

    #[test]
    fn scale_rejects_missing_level() {
        let err = ScoringScale::new(vec![
            bucket(RiskLevel::Low, 5),
            bucket(RiskLevel::High, 10),
        ])
        .unwrap_err();
        assert!(err.contains("missing level: moderate"));
    }

    #[test]
    fn scale_rejects_duplicate_level() {
        let err = ScoringScale::new(vec![
            bucket(RiskLevel::Low, 5),
            bucket(RiskLevel::Low, 7),
            bucket(RiskLevel::Moderate, 10),
            bucket(RiskLevel::High, 15),
        ])
        .unwrap_err();
        assert!(err.contains("twice"));
    }

    #[test]
    fn scale_rejects_non_monotonic_bounds() {
        let err = ScoringScale::new(vec![
            bucket(RiskLevel::Low, 10),
            bucket(RiskLevel::Moderate, 10),
            bucket(RiskLevel::High, 20),
        ])
        .unwrap_err();
        assert!(err.contains("strictly increasing"));
    }

    #[test]
    fn resolve_answer_uses_option_text() {
        let question = Question {
            index: 0,
            kind: QuestionKind::Choice,
            prompt: "How often?".into(),
            description: None,
            options: vec![AnswerOption {
                value: "daily".into(),
                weight: 3,
                text: Some("Every day".into()),
                icon: None,
            }],
            scale_labels: None,
        };
        let answer = question.resolve_answer(&"daily".into()).unwrap();
        assert_eq!(answer.weight, 3);
        assert_eq!(answer.display_text, "Every day");
        assert!(question.resolve_answer(&"weekly".into()).is_none());
    }

    #[test]
    fn resolve_answer_falls_back_to_value_text() {
        let question = Question {
            index: 0,
            kind: QuestionKind::Scale,
            prompt: "Rate it".into(),
            description: None,
            options: vec![AnswerOption {
                value: 4.into(),
                weight: 4,
                text: None,
                icon: None,
            }],
            scale_labels: Some(ScaleLabels::default()),
        };
        let answer = question.resolve_answer(&4.into()).unwrap();
        assert_eq!(answer.display_text, "4");
    }

    #[test]
    fn recommendations_default_to_empty() {
        let definition = QuizDefinition {
            id: "t".into(),
            title: "T".into(),
            description: None,
            questions: vec![],
            scoring: ScoringScale::new(vec![
                bucket(RiskLevel::Low, 5),
                bucket(RiskLevel::Moderate, 10),
                bucket(RiskLevel::High, 15),
            ])
            .unwrap(),
            recommendations: HashMap::new(),
            max_score: 15,
            auto_advance_enabled: true,
        };
        assert!(definition.recommendations_for(RiskLevel::High).is_empty());
    }
}
