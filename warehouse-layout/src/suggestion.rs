/// Natural-language suggestion boundary.
use crate::scene_object::PrimitiveKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest prompt the service accepts, in characters.
pub const MIN_PROMPT_LENGTH: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("please enter at least {min} characters (got {actual})")]
    PromptTooShort { min: usize, actual: usize },
    #[error("{0}")]
    Service(String),
}

/// What the service proposes for a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSuggestion {
    pub scene_description: String,
    pub suggested_objects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

pub trait SuggestionService {
    fn suggest(&self, prompt: &str) -> Result<SceneSuggestion, SuggestionError>;
}

/// Rejects prompts shorter than [`MIN_PROMPT_LENGTH`] after trimming.
pub fn validate_prompt(prompt: &str) -> Result<&str, SuggestionError> {
    let trimmed = prompt.trim();
    let actual = trimmed.chars().count();
    if actual < MIN_PROMPT_LENGTH {
        return Err(SuggestionError::PromptTooShort {
            min: MIN_PROMPT_LENGTH,
            actual,
        });
    }
    Ok(trimmed)
}

/// Validates, then asks the service.
pub fn request_suggestion(
    service: &dyn SuggestionService,
    prompt: &str,
) -> Result<SceneSuggestion, SuggestionError> {
    let prompt = validate_prompt(prompt)?;
    service.suggest(prompt).inspect_err(|err| {
        tracing::warn!(error = %err, "suggestion service failed");
    })
}

/// Offline stand-in returning a fixed suggestion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedSuggestionService;

impl CannedSuggestionService {
    pub const FAILURE_MESSAGE: &'static str =
        "The AI model failed to generate suggestions. Please try again.";
}

impl SuggestionService for CannedSuggestionService {
    fn suggest(&self, prompt: &str) -> Result<SceneSuggestion, SuggestionError> {
        if prompt.to_lowercase().contains("error") {
            return Err(SuggestionError::Service(Self::FAILURE_MESSAGE.to_string()));
        }

        Ok(SceneSuggestion {
            scene_description: format!(
                "A dynamic scene based on your prompt: \"{prompt}\". It features a variety of \
                 shapes and colors, arranged to create a visually interesting composition."
            ),
            suggested_objects: ["futuristic car", "glowing orb", "floating island", "crystal tower"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            additional_details: Some(
                "Consider adding a skybox with a nebula texture to enhance the atmosphere."
                    .to_string(),
            ),
        })
    }
}

/// Primitive used when a suggested object is accepted without an explicit kind.
pub fn default_suggestion_kind() -> PrimitiveKind {
    PrimitiveKind::Box
}
