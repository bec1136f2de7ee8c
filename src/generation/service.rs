//! OpenRouter API service for prompt-driven schema generation

use crate::generation::{GenerationConfig, GenerationError, GenerationResult};
use crate::schema::types::Field;
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// OpenRouter-backed schema generation service
pub struct GenerationService {
    client: Client,
    config: GenerationConfig,
}

/// Request to OpenRouter API
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

/// Message in OpenRouter request
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response from OpenRouter API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

/// Choice in OpenRouter response
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

/// Response message from OpenRouter
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}

/// Usage information from OpenRouter
#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

impl GenerationService {
    /// Create a new generation service
    pub fn new(config: GenerationConfig) -> GenerationResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                GenerationError::api_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Generate a field tree from a natural-language description
    pub async fn generate_fields(&self, description: &str) -> GenerationResult<Vec<Field>> {
        if description.trim().is_empty() {
            return Err(GenerationError::invalid_input("Prompt is required"));
        }

        let prompt = self.create_prompt(description);

        info!(
            "Sending generation request to OpenRouter with model: {}",
            self.config.openrouter_model
        );

        let response = self.call_api(&prompt).await?;
        info!("Model response (length: {} chars)", response.len());

        self.parse_response(&response)
    }

    /// Create the prompt for the model
    fn create_prompt(&self, description: &str) -> String {
        format!(
            r#"Generate a JSON schema based on this description: "{}"

Return ONLY a valid JSON array of field objects with the following format:
- Each field should have: id (unique string), name (field name), type (one of: "String", "Number", "Boolean", "Array", "Object", "Date", "Email", "URL", "UUID", "Integer", "Float", "Enum", "Nested")
- Include optional properties: required (boolean), description (string)
- For String/Email/URL: include minLength, maxLength if appropriate
- For Number/Integer/Float: include min, max if appropriate
- For Enum: include enumValues array and set value to one of the enum values
- For Array: include arrayItemType
- For Nested/Object: include children array with nested fields
- Choose appropriate default values based on type

Example format:
[
  {{
    "id": "field_1",
    "name": "title",
    "type": "String",
    "value": "Default Title",
    "required": true,
    "description": "The title of the item",
    "minLength": 1,
    "maxLength": 100
  }},
  {{
    "id": "field_2",
    "name": "status",
    "type": "Enum",
    "value": "active",
    "enumValues": ["active", "inactive", "pending"],
    "required": true
  }},
  {{
    "id": "field_3",
    "name": "metadata",
    "type": "Nested",
    "children": [
      {{
        "id": "field_4",
        "name": "createdAt",
        "type": "Date",
        "value": "2024-01-01",
        "required": true
      }}
    ]
  }}
]

Make sure the response is valid JSON that can be parsed directly."#,
            description
        )
    }

    /// Call the OpenRouter API with retries
    async fn call_api(&self, prompt: &str) -> GenerationResult<String> {
        let request = ChatRequest {
            model: self.config.openrouter_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: Some(4000),
            temperature: Some(0.1),
        };

        let mut last_error = None;

        for attempt in 1..=self.config.max_retries {
            info!(
                "OpenRouter API attempt {} of {}",
                attempt, self.config.max_retries
            );

            match self.make_api_request(&request).await {
                Ok(response) => {
                    info!("OpenRouter API call successful on attempt {}", attempt);
                    return Ok(response);
                }
                Err(e) => {
                    warn!("OpenRouter API attempt {} failed: {}", attempt, e);
                    last_error = Some(e);

                    if attempt < self.config.max_retries {
                        // Exponential backoff
                        let delay = Duration::from_secs(2_u64.pow(attempt - 1));
                        info!("Retrying in {:?}", delay);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GenerationError::api_error("All API attempts failed")))
    }

    /// Make a single API request
    async fn make_api_request(&self, request: &ChatRequest) -> GenerationResult<String> {
        let url = format!("{}/chat/completions", self.config.openrouter_base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.openrouter_api_key),
            )
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::api_error(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            info!(
                "OpenRouter API usage - Prompt tokens: {:?}, Completion tokens: {:?}, Total tokens: {:?}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        if chat_response.choices.is_empty() {
            return Err(GenerationError::api_error("No choices in API response"));
        }

        Ok(chat_response.choices[0].message.content.clone())
    }

    /// Parse the model response into a validated field tree
    fn parse_response(&self, response_text: &str) -> GenerationResult<Vec<Field>> {
        let json_str = self.extract_field_array(response_text)?;

        let fields: Vec<Field> = serde_json::from_str(&json_str).map_err(|e| {
            GenerationError::response_validation_error(format!(
                "Failed to parse model response as a field array: {}. Response: {}",
                e, json_str
            ))
        })?;

        normalize_generated(fields)
    }

    /// Extract the JSON array from the model response text
    fn extract_field_array(&self, response_text: &str) -> GenerationResult<String> {
        // Look for JSON block markers
        if let Some(start) = response_text.find("```json") {
            let search_start = start + 7; // Length of "```json"
            if let Some(end_offset) = response_text[search_start..].find("```") {
                let json_end = search_start + end_offset;
                return Ok(response_text[search_start..json_end].trim().to_string());
            }
        }

        // Look for a direct array (starts with [ and ends with ])
        if let Some(start) = response_text.find('[') {
            if let Some(end) = response_text.rfind(']') {
                if end > start {
                    return Ok(response_text[start..=end].to_string());
                }
            }
        }

        Err(GenerationError::response_validation_error(
            "No JSON array found in model response",
        ))
    }
}

/// Structural validation of a generated tree: ids must be present and
/// unique across the whole tree, names non-empty, and children may only
/// appear under container kinds. Containers without a children array get
/// an empty one.
pub fn normalize_generated(mut fields: Vec<Field>) -> GenerationResult<Vec<Field>> {
    let mut seen_ids = HashSet::new();
    normalize_level(&mut fields, &mut seen_ids)?;
    Ok(fields)
}

fn normalize_level(
    fields: &mut [Field],
    seen_ids: &mut HashSet<String>,
) -> GenerationResult<()> {
    for field in fields.iter_mut() {
        if field.id.trim().is_empty() {
            return Err(GenerationError::response_validation_error(format!(
                "Generated field '{}' has an empty id",
                field.name
            )));
        }
        if !seen_ids.insert(field.id.clone()) {
            return Err(GenerationError::response_validation_error(format!(
                "Generated field id '{}' is not unique",
                field.id
            )));
        }
        if field.name.trim().is_empty() {
            return Err(GenerationError::response_validation_error(format!(
                "Generated field '{}' has an empty name",
                field.id
            )));
        }

        if field.kind.is_container() {
            if field.children.is_none() {
                field.children = Some(Vec::new());
            }
            if let Some(children) = field.children.as_mut() {
                normalize_level(children, seen_ids)?;
            }
        } else if field.children.as_ref().map_or(false, |c| !c.is_empty()) {
            return Err(GenerationError::response_validation_error(format!(
                "Generated field '{}' has children but is not a container type",
                field.name
            )));
        }
    }
    Ok(())
}
