//! Field extraction: résumé text in, normalized candidate attributes out.
//!
//! A primary `AttributeExtractor` (the LLM) is tried first under a timeout.
//! Any failure is logged and the deterministic `RuleBasedExtractor` answers
//! instead, so `FieldExtractor::extract` never fails.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::LlmError;
use crate::models::candidate::{Qualification, Seniority};

pub mod llm;
pub mod normalize;
mod prompts;
pub mod rules;

pub use llm::LlmExtractor;
pub use normalize::normalize;
pub use rules::RuleBasedExtractor;

/// Attributes as a strategy produced them, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAttributes {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub seniority: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub qualifications: Option<String>,
}

/// Normalized attributes: enums are always valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateAttributes {
    pub name: String,
    pub skills: Vec<String>,
    pub seniority: Seniority,
    pub qualifications: Qualification,
}

impl From<CandidateAttributes> for RawAttributes {
    fn from(attrs: CandidateAttributes) -> Self {
        RawAttributes {
            name: Some(attrs.name),
            skills: attrs.skills,
            seniority: Some(attrs.seniority.as_str().to_string()),
            qualifications: Some(attrs.qualifications.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Llm,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedCandidate {
    pub attributes: CandidateAttributes,
    pub source: ExtractionSource,
}

/// A primary extraction strategy. Implementations may fail; the
/// `FieldExtractor` recovers.
#[async_trait]
pub trait AttributeExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, resume_text: &str) -> Result<RawAttributes, LlmError>;
}

#[derive(Clone)]
pub struct FieldExtractor {
    primary: Arc<dyn AttributeExtractor>,
    fallback: RuleBasedExtractor,
    timeout: Duration,
}

impl FieldExtractor {
    pub fn new(primary: Arc<dyn AttributeExtractor>, timeout: Duration) -> Self {
        Self {
            primary,
            fallback: RuleBasedExtractor,
            timeout,
        }
    }

    pub async fn extract(&self, resume_text: &str) -> ExtractedCandidate {
        let attempt = tokio::time::timeout(self.timeout, self.primary.extract(resume_text))
            .await
            .unwrap_or_else(|_| Err(LlmError::Timeout(self.timeout)));

        let (raw, source) = match attempt {
            Ok(raw) => (raw, ExtractionSource::Llm),
            Err(e) => {
                warn!(
                    strategy = self.primary.name(),
                    error = %e,
                    "Primary extraction failed, falling back to rule-based extraction"
                );
                (self.fallback.extract(resume_text), ExtractionSource::Fallback)
            }
        };

        let attributes = normalize(raw);
        info!(
            source = ?source,
            skills = attributes.skills.len(),
            seniority = %attributes.seniority,
            "Extracted candidate attributes"
        );
        ExtractedCandidate { attributes, source }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accepts a list of strings or one comma-separated string. Anything else is empty.
fn lenient_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingExtractor;

    #[async_trait]
    impl AttributeExtractor for FailingExtractor {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn extract(&self, _resume_text: &str) -> Result<RawAttributes, LlmError> {
            Err(LlmError::Api {
                status: 401,
                message: "invalid x-api-key".to_string(),
            })
        }
    }

    struct SlowExtractor;

    #[async_trait]
    impl AttributeExtractor for SlowExtractor {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn extract(&self, _resume_text: &str) -> Result<RawAttributes, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(RawAttributes::default())
        }
    }

    struct FixedExtractor(RawAttributes);

    #[async_trait]
    impl AttributeExtractor for FixedExtractor {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn extract(&self, _resume_text: &str) -> Result<RawAttributes, LlmError> {
            Ok(self.0.clone())
        }
    }

    const RESUME: &str = "Jane Doe\njane@example.com\nSenior React Developer, Python, Django\nB.S. Computer Science";

    #[tokio::test]
    async fn test_primary_result_is_normalized() {
        let primary = FixedExtractor(RawAttributes {
            name: Some("  Jane Doe ".into()),
            skills: vec!["React".into(), " ".into()],
            seniority: Some("Sr.".into()),
            qualifications: Some("MSc".into()),
        });
        let extractor = FieldExtractor::new(Arc::new(primary), Duration::from_secs(5));

        let extracted = extractor.extract(RESUME).await;
        assert_eq!(extracted.source, ExtractionSource::Llm);
        assert_eq!(extracted.attributes.name, "Jane Doe");
        assert_eq!(extracted.attributes.skills, vec!["React".to_string()]);
        assert_eq!(extracted.attributes.seniority, Seniority::Senior);
        assert_eq!(extracted.attributes.qualifications, Qualification::Masters);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback() {
        let extractor = FieldExtractor::new(Arc::new(FailingExtractor), Duration::from_secs(5));

        let extracted = extractor.extract(RESUME).await;
        assert_eq!(extracted.source, ExtractionSource::Fallback);
        assert_eq!(extracted.attributes.name, "Jane Doe");
        assert_eq!(extracted.attributes.seniority, Seniority::Senior);
        assert_eq!(extracted.attributes.qualifications, Qualification::Bachelors);
        assert!(extracted.attributes.skills.contains(&"React".to_string()));
        assert!(extracted.attributes.skills.contains(&"Django".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_timeout_uses_fallback() {
        let extractor = FieldExtractor::new(Arc::new(SlowExtractor), Duration::from_secs(30));

        let extracted = extractor.extract(RESUME).await;
        assert_eq!(extracted.source, ExtractionSource::Fallback);
        assert_eq!(extracted.attributes.seniority, Seniority::Senior);
    }

    #[test]
    fn test_raw_attributes_tolerate_odd_llm_shapes() {
        let raw: RawAttributes = serde_json::from_value(json!({
            "name": null,
            "skills": "Rust, Go",
            "seniority": 3
        }))
        .unwrap();
        assert_eq!(raw.name, None);
        assert_eq!(raw.skills, vec!["Rust".to_string(), " Go".to_string()]);
        assert_eq!(raw.seniority, None);
        assert_eq!(raw.qualifications, None);
    }

    #[test]
    fn test_raw_attributes_drop_non_string_skills() {
        let raw: RawAttributes = serde_json::from_value(json!({
            "skills": ["Python", 42, {"name": "Go"}, "SQL"]
        }))
        .unwrap();
        assert_eq!(raw.skills, vec!["Python".to_string(), "SQL".to_string()]);
    }
}
