use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, Role,
    },
    Client,
};
use regex::Regex;

use crate::error::AppError;
use crate::models::InsightSuggestion;

pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    /// Sends the prompt to the chat completion endpoint and validates
    /// the reply as a list of chart suggestions. A reply that carries no
    /// JSON array, or one that does not match the suggestion shape, is
    /// surfaced as an upstream failure rather than forwarded verbatim.
    pub async fn generate_suggestions(
        &self,
        prompt: &str,
    ) -> Result<Vec<InsightSuggestion>, AppError> {
        let content = self.complete(prompt).await?;
        parse_suggestions(&content)
    }

    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                name: None,
                role: Role::User,
            },
        )];

        let request = CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(0.2),
            ..Default::default()
        };

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::LlmError(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(content)
    }
}

/// Extracts the first JSON array from the raw LLM reply and parses it
/// into suggestions. Models often wrap the array in prose or code
/// fences, so the array is located by pattern rather than parsed whole.
pub fn parse_suggestions(response: &str) -> Result<Vec<InsightSuggestion>, AppError> {
    let re = Regex::new(r"\[[\s\S]*\]").map_err(|e| {
        AppError::Internal(format!("Failed to create regex: {}", e))
    })?;

    let json_str = re
        .find(response)
        .ok_or_else(|| {
            AppError::LlmError(format!("No JSON array found in LLM response: {}", response))
        })?
        .as_str();

    serde_json::from_str(json_str).map_err(|e| {
        AppError::LlmError(format!("Malformed suggestion payload from LLM: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartType;

    const VALID_PAYLOAD: &str = r#"[
        {
            "title": "Score Distribution",
            "type": "Histogram",
            "description": "Shows how scores are spread across the dataset.",
            "prompt": "Show the distribution of scores"
        },
        {
            "title": "Score by Name",
            "type": "Bar",
            "description": "Compares individual scores side by side.",
            "prompt": "Compare scores by name"
        }
    ]"#;

    #[test]
    fn parses_a_bare_json_array() {
        let suggestions = parse_suggestions(VALID_PAYLOAD).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].chart_type, ChartType::Histogram);
        assert_eq!(suggestions[1].prompt, "Compare scores by name");
    }

    #[test]
    fn parses_an_array_wrapped_in_prose_and_fences() {
        let wrapped = format!(
            "Here are your suggestions:\n```json\n{}\n```\nLet me know if you need more.",
            VALID_PAYLOAD
        );
        let suggestions = parse_suggestions(&wrapped).unwrap();
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn non_json_reply_is_an_upstream_error() {
        let err = parse_suggestions("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, AppError::LlmError(_)));
    }

    #[test]
    fn array_with_wrong_shape_is_an_upstream_error() {
        let err = parse_suggestions(r#"[{"title": "Missing the rest"}]"#).unwrap_err();
        assert!(matches!(err, AppError::LlmError(_)));
    }

    #[test]
    fn array_with_unknown_chart_type_is_an_upstream_error() {
        let payload = r#"[
            {
                "title": "Donut of Doom",
                "type": "Donut",
                "description": "Not a permitted chart type.",
                "prompt": "Show a donut chart"
            }
        ]"#;
        let err = parse_suggestions(payload).unwrap_err();
        assert!(matches!(err, AppError::LlmError(_)));
    }
}
