use async_trait::async_trait;

use crate::extraction::prompts::{RESUME_EXTRACT_PROMPT, RESUME_EXTRACT_SYSTEM};
use crate::extraction::{AttributeExtractor, RawAttributes};
use crate::llm_client::{LlmClient, LlmError};

/// Primary extraction strategy: one structured LLM call.
pub struct LlmExtractor(pub LlmClient);

#[async_trait]
impl AttributeExtractor for LlmExtractor {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn extract(&self, resume_text: &str) -> Result<RawAttributes, LlmError> {
        self.0
            .call_json::<RawAttributes>(&build_prompt(resume_text), RESUME_EXTRACT_SYSTEM)
            .await
    }
}

fn build_prompt(resume_text: &str) -> String {
    RESUME_EXTRACT_PROMPT.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_reply;

    #[test]
    fn test_prompt_embeds_resume_text() {
        let prompt = build_prompt("Jane Doe — Senior Rust Engineer");
        assert!(prompt.contains("Jane Doe — Senior Rust Engineer"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_typical_reply_parses_into_raw_attributes() {
        let reply = "```json\n{\"name\": \"Jane Doe\", \"skills\": [\"React\", \"Python\"], \
                     \"seniority\": \"senior\", \"qualifications\": \"masters\"}\n```";
        let raw: RawAttributes = parse_json_reply(reply).unwrap();
        assert_eq!(raw.name.as_deref(), Some("Jane Doe"));
        assert_eq!(raw.skills, vec!["React", "Python"]);
        assert_eq!(raw.seniority.as_deref(), Some("senior"));
        assert_eq!(raw.qualifications.as_deref(), Some("masters"));
    }
}
