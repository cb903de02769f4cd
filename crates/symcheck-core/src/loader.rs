//! Quiz definition loading and validation.
//!
//! Definitions are JSON documents with camelCase keys, fetched through a
//! [`DefinitionSource`] and parsed via intermediate raw structs before being
//! promoted to the validated [`QuizDefinition`] model. All optional-field
//! defaults are resolved here, once, so the rest of the engine never guesses.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::LoadError;
use crate::model::{
    AnswerOption, AnswerValue, Question, QuestionKind, QuizDefinition, RiskLevel, ScaleLabels,
    ScoringBucket, ScoringScale,
};
use crate::traits::DefinitionSource;

/// Intermediate JSON structure for parsing quiz definition documents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefinition {
    #[serde(default = "default_id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    questions: Vec<RawQuestion>,
    scoring_rules: HashMap<String, RawScoringRule>,
    #[serde(default)]
    recommendations: HashMap<String, Vec<String>>,
    #[serde(default)]
    max_score: Option<i64>,
    #[serde(default = "default_true")]
    auto_advance_enabled: bool,
}

fn default_id() -> String {
    "symptom-check".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    kind: String,
    prompt: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    options: Vec<RawOption>,
    #[serde(default)]
    scale_labels: Option<RawScaleLabels>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    value: AnswerValue,
    weight: i64,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawScaleLabels {
    #[serde(default)]
    min: Option<String>,
    #[serde(default)]
    max: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoringRule {
    max_score: i64,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

/// Fetch a definition through `source` and parse it.
///
/// This is the engine's only asynchronous boundary; any fetch failure
/// surfaces as [`LoadError::NotFound`].
pub async fn load(source: &dyn DefinitionSource) -> Result<QuizDefinition, LoadError> {
    let bytes = source
        .fetch()
        .await
        .map_err(|e| LoadError::NotFound(format!("{}: {e:#}", source.describe())))?;
    parse_definition(&bytes)
}

/// Parse raw definition bytes into a validated `QuizDefinition`.
pub fn parse_definition(bytes: &[u8]) -> Result<QuizDefinition, LoadError> {
    let raw: RawDefinition = serde_json::from_slice(bytes)
        .map_err(|e| LoadError::Malformed(e.to_string()))?;

    if raw.questions.is_empty() {
        return Err(LoadError::EmptyQuestionSet);
    }

    let questions = raw
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| convert_question(index, q))
        .collect::<Result<Vec<_>, _>>()?;

    let mut buckets = Vec::with_capacity(raw.scoring_rules.len());
    for (key, rule) in raw.scoring_rules {
        let level = RiskLevel::from_str(&key).map_err(LoadError::Malformed)?;
        buckets.push(ScoringBucket {
            level,
            max_score: rule.max_score,
            label: rule.label.unwrap_or_else(|| default_label(level)),
            color: rule.color.unwrap_or_else(|| default_color(level)),
        });
    }
    let scoring = ScoringScale::new(buckets).map_err(LoadError::Malformed)?;

    let mut recommendations = HashMap::new();
    for (key, advice) in raw.recommendations {
        let level = RiskLevel::from_str(&key).map_err(LoadError::Malformed)?;
        recommendations.insert(level, advice);
    }

    let max_score = raw.max_score.unwrap_or_else(|| {
        scoring
            .buckets()
            .last()
            .map(|b| b.max_score)
            .unwrap_or_default()
    });

    Ok(QuizDefinition {
        title: raw.title.unwrap_or_else(|| raw.id.clone()),
        id: raw.id,
        description: raw.description,
        questions,
        scoring,
        recommendations,
        max_score,
        auto_advance_enabled: raw.auto_advance_enabled,
    })
}

/// Parse a definition from a string (useful for testing).
pub fn parse_definition_str(content: &str) -> Result<QuizDefinition, LoadError> {
    parse_definition(content.as_bytes())
}

fn convert_question(index: usize, raw: RawQuestion) -> Result<Question, LoadError> {
    let kind = QuestionKind::from_str(&raw.kind)
        .map_err(|e| LoadError::Malformed(format!("question {index}: {e}")))?;

    if raw.options.is_empty() {
        return Err(LoadError::Malformed(format!(
            "question {index} has no options"
        )));
    }

    let options = raw
        .options
        .into_iter()
        .map(|o| {
            if kind == QuestionKind::Choice && o.text.is_none() {
                return Err(LoadError::Malformed(format!(
                    "question {index}: choice option '{}' has no text",
                    o.value
                )));
            }
            Ok(AnswerOption {
                value: o.value,
                weight: o.weight,
                text: o.text,
                icon: o.icon,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let scale_labels = match (kind, raw.scale_labels) {
        (QuestionKind::Scale, labels) => {
            let defaults = ScaleLabels::default();
            let labels = labels.unwrap_or(RawScaleLabels {
                min: None,
                max: None,
            });
            Some(ScaleLabels {
                min: labels.min.unwrap_or(defaults.min),
                max: labels.max.unwrap_or(defaults.max),
            })
        }
        (QuestionKind::Choice, Some(_)) => {
            tracing::warn!("question {index}: scaleLabels on a choice question, ignoring");
            None
        }
        (QuestionKind::Choice, None) => None,
    };

    Ok(Question {
        index,
        kind,
        prompt: raw.prompt,
        description: raw.description,
        options,
        scale_labels,
    })
}

fn default_label(level: RiskLevel) -> String {
    match level {
        RiskLevel::Low => "Low risk".to_string(),
        RiskLevel::Moderate => "Moderate risk".to_string(),
        RiskLevel::High => "High risk".to_string(),
    }
}

fn default_color(level: RiskLevel) -> String {
    match level {
        RiskLevel::Low => "#2e7d32".to_string(),
        RiskLevel::Moderate => "#f9a825".to_string(),
        RiskLevel::High => "#c62828".to_string(),
    }
}

/// A non-fatal finding from definition validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question index, when the finding concerns one.
    pub question_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a definition for issues that load strictness does not reject.
pub fn validate_definition(definition: &QuizDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for question in &definition.questions {
        let mut seen = Vec::new();
        for option in &question.options {
            if seen.contains(&&option.value) {
                warnings.push(ValidationWarning {
                    question_index: Some(question.index),
                    message: format!("duplicate option value: {}", option.value),
                });
            } else {
                seen.push(&option.value);
            }
        }

        if question.options.iter().all(|o| o.weight == 0) {
            warnings.push(ValidationWarning {
                question_index: Some(question.index),
                message: "every option has weight 0; question cannot affect the score".into(),
            });
        }
    }

    for level in RiskLevel::ALL {
        if definition.recommendations_for(level).is_empty() {
            warnings.push(ValidationWarning {
                question_index: None,
                message: format!("no recommendations for level: {level}"),
            });
        }
    }

    if let Some(top) = definition.scoring.buckets().last() {
        if definition.max_score < top.max_score {
            warnings.push(ValidationWarning {
                question_index: None,
                message: format!(
                    "display maxScore {} is below the top bucket bound {}",
                    definition.max_score, top.max_score
                ),
            });
        }
    }

    warnings
}
