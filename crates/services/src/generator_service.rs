use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use roadmap_core::model::{LearningStyle, Section, SkillLevel};

use crate::error::GeneratorError;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("PATHWAY_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("PATHWAY_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("PATHWAY_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Regenerates roadmap sections through an external chat-completions API.
///
/// The content-generation call is an opaque collaborator: this service sends
/// a prompt describing the learner and parses the structured section list
/// out of the response.
#[derive(Clone)]
pub struct GeneratorService {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl GeneratorService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Generate fresh roadmap sections for a career goal.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` when the service is disabled, the request
    /// fails, or the response cannot be parsed into sections.
    pub async fn generate(
        &self,
        skill_level: SkillLevel,
        career_goal: &str,
        learning_style: LearningStyle,
    ) -> Result<Vec<Section>, GeneratorError> {
        let config = self.config.as_ref().ok_or(GeneratorError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let prompt = build_prompt(skill_level, career_goal, learning_style);
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeneratorError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GeneratorError::EmptyResponse)?;

        parse_sections(&content)
    }
}

fn build_prompt(
    skill_level: SkillLevel,
    career_goal: &str,
    learning_style: LearningStyle,
) -> String {
    format!(
        "Create a learning roadmap for a {skill_level} learner whose career goal is \
         \"{career_goal}\" and who prefers a {learning_style} learning style. \
         Respond with JSON only, shaped as \
         {{\"sections\": [{{\"title\": \"...\", \"topics\": [\"...\"]}}]}}, \
         with 3 to 6 sections ordered from fundamentals to advanced."
    )
}

/// Parse the generator's reply into sections.
///
/// Tolerates a Markdown code fence around the JSON, which chat models add
/// even when told not to.
fn parse_sections(content: &str) -> Result<Vec<Section>, GeneratorError> {
    let json = strip_code_fence(content.trim());
    let payload: SectionsPayload =
        serde_json::from_str(json).map_err(|err| GeneratorError::BadPayload(err.to_string()))?;
    if payload.sections.is_empty() {
        return Err(GeneratorError::BadPayload("no sections".to_string()));
    }
    payload
        .sections
        .into_iter()
        .map(|section| Section::new(section.title, section.topics))
        .collect::<Result<Vec<_>, _>>()
        .map_err(GeneratorError::from)
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .trim_end()
        .trim_end_matches("```")
        .trim_end()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SectionsPayload {
    sections: Vec<SectionPayload>,
}

#[derive(Debug, Deserialize)]
struct SectionPayload {
    title: String,
    #[serde(default)]
    topics: Vec<String>,
}
