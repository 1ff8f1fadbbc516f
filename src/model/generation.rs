use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// What the AI backend is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiKind {
    #[default]
    Summary,
    Quiz,
    Categorize,
}

impl AiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiKind::Summary => "summary",
            AiKind::Quiz => "quiz",
            AiKind::Categorize => "categorize",
        }
    }
}

impl fmt::Display for AiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(AiKind::Summary),
            "quiz" => Ok(AiKind::Quiz),
            "categorize" => Ok(AiKind::Categorize),
            other => Err(format!(
                "unknown generation type '{}', expected summary, quiz or categorize",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_questions: Option<u32>,
}

/// Body of `POST /api/content/generate`. Never persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiServiceRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AiKind,
    #[serde(default)]
    pub options: AiOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: String,
    pub key_points: Vec<String>,
    /// models sometimes send `120.0`
    pub word_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// zero-based index into `options`, not bound-checked and possibly
    /// negative
    pub correct_answer: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub total_questions: u32,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizeResponse {
    pub categories: Vec<String>,
    /// 0.0 to 1.0
    pub confidence: f64,
}

/// A validated AI payload, tagged with the kind that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AiResult {
    Summary(SummaryResponse),
    Quiz(QuizResponse),
    Categorize(CategorizeResponse),
}

impl AiResult {
    /// Validates an untagged payload against the shape `kind` asks for.
    pub fn from_value(kind: AiKind, value: Value) -> serde_json::Result<Self> {
        Ok(match kind {
            AiKind::Summary => AiResult::Summary(serde_json::from_value(value)?),
            AiKind::Quiz => AiResult::Quiz(serde_json::from_value(value)?),
            AiKind::Categorize => AiResult::Categorize(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> AiKind {
        match self {
            AiResult::Summary(_) => AiKind::Summary,
            AiResult::Quiz(_) => AiKind::Quiz,
            AiResult::Categorize(_) => AiKind::Categorize,
        }
    }
}

impl From<SummaryResponse> for AiResult {
    fn from(value: SummaryResponse) -> Self {
        AiResult::Summary(value)
    }
}

impl From<QuizResponse> for AiResult {
    fn from(value: QuizResponse) -> Self {
        AiResult::Quiz(value)
    }
}

impl From<CategorizeResponse> for AiResult {
    fn from(value: CategorizeResponse) -> Self {
        AiResult::Categorize(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_like_the_backend_expects() {
        let request = AiServiceRequest {
            content: "Photosynthesis converts light".into(),
            kind: AiKind::Quiz,
            options: AiOptions {
                max_length: None,
                difficulty: Some(Difficulty::Easy),
                num_questions: Some(3),
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "content": "Photosynthesis converts light",
                "type": "quiz",
                "options": {"difficulty": "easy", "numQuestions": 3}
            })
        );
    }

    #[test]
    fn from_value_rejects_wrong_shape() {
        let summary = json!({"summary": "s", "keyPoints": [], "wordCount": 1});
        assert!(AiResult::from_value(AiKind::Summary, summary.clone()).is_ok());
        assert!(AiResult::from_value(AiKind::Quiz, summary).is_err());
    }

    #[test]
    fn result_carries_kind_tag() {
        let result = AiResult::Categorize(CategorizeResponse {
            categories: vec!["Biology".into()],
            confidence: 0.8,
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "categorize");
        assert_eq!(result.kind(), AiKind::Categorize);

        let back: AiResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn out_of_range_answer_index_is_accepted() {
        let quiz: QuizResponse = serde_json::from_value(json!({
            "totalQuestions": 1,
            "questions": [{"question": "q", "options": ["a", "b"], "correctAnswer": 7}]
        }))
        .unwrap();
        assert_eq!(quiz.questions[0].correct_answer, 7);

        let quiz: QuizResponse = serde_json::from_value(json!({
            "totalQuestions": 1,
            "questions": [{"question": "q", "options": ["a"], "correctAnswer": -1}]
        }))
        .unwrap();
        assert_eq!(quiz.questions[0].correct_answer, -1);
    }

    #[test]
    fn fractional_word_count_is_accepted() {
        let summary: SummaryResponse = serde_json::from_value(
            json!({"summary": "s", "keyPoints": [], "wordCount": 120.0}),
        )
        .unwrap();
        assert_eq!(summary.word_count, 120.0);
    }
}
