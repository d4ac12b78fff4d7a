use std::sync::Arc;

use super::prompts::classification_prompt;
use crate::core::errors::ApiError;
use crate::documents::TemplateRegistry;
use crate::llm::{GenerateRequest, LlmProvider};

/// Classifies a free-text query into one of the known template keys, or none.
///
/// Classification never errors on unexpected model output: anything that is
/// not exactly a known key degrades to "no document intent detected".
pub struct IntentClassifier {
    llm: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LlmProvider>, model: String, temperature: f32) -> Self {
        Self {
            llm,
            model,
            temperature,
        }
    }

    pub async fn detect(
        &self,
        query: &str,
        registry: &TemplateRegistry,
    ) -> Result<Option<String>, ApiError> {
        let template_names = registry.keys().collect::<Vec<_>>().join(", ");
        let prompt = classification_prompt(query, &template_names);

        let request = GenerateRequest::new(prompt).with_temperature(self.temperature);
        let raw = self.llm.generate(request, &self.model).await?;

        Ok(normalize_detected(&raw, registry))
    }
}

/// Trim and lower-case the model output; anything that is not a known
/// template key means no intent.
fn normalize_detected(raw: &str, registry: &TemplateRegistry) -> Option<String> {
    let detected = raw.trim().to_lowercase();
    registry.contains(&detected).then_some(detected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TemplateRegistry {
        TemplateRegistry::with_defaults()
    }

    #[test]
    fn known_key_is_detected() {
        assert_eq!(
            normalize_detected("nda", &registry()),
            Some("nda".to_string())
        );
    }

    #[test]
    fn output_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_detected("  NDA \n", &registry()),
            Some("nda".to_string())
        );
        assert_eq!(
            normalize_detected("Non-Disclosure Agreement", &registry()),
            Some("non-disclosure agreement".to_string())
        );
    }

    #[test]
    fn none_token_means_no_intent() {
        assert_eq!(normalize_detected("NONE", &registry()), None);
    }

    #[test]
    fn unrecognized_output_degrades_to_no_intent() {
        assert_eq!(normalize_detected("lease agreement", &registry()), None);
        assert_eq!(
            normalize_detected("Sure! You want an nda, right?", &registry()),
            None
        );
        assert_eq!(normalize_detected("", &registry()), None);
    }
}
