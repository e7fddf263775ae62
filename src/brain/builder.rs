// RequestBuilder - type-safe chainable builder for ChatRequest

use super::{ChatMessage, ChatRequest};

pub struct RequestBuilder {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl RequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::system(content));
        self
    }

    pub fn user_text(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::user(content));
        self
    }

    pub fn assistant_text(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::assistant(content));
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn build(self) -> Result<ChatRequest, &'static str> {
        if self.messages.is_empty() {
            return Err("messages cannot be empty");
        }

        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err("temperature must be between 0.0 and 2.0");
            }
        }

        Ok(ChatRequest {
            model: self.model,
            messages: self.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Role;

    #[test]
    fn test_build_keeps_message_order() {
        let request = RequestBuilder::new("m")
            .system("sys")
            .user_text("first")
            .assistant_text("reply")
            .user_text("second")
            .temperature(0.05)
            .max_tokens(256)
            .build()
            .unwrap();

        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(request.temperature, Some(0.05));
        assert_eq!(request.max_tokens, Some(256));
    }

    #[test]
    fn test_build_rejects_empty() {
        assert!(RequestBuilder::new("m").build().is_err());
    }

    #[test]
    fn test_build_rejects_bad_temperature() {
        let result = RequestBuilder::new("m").user_text("x").temperature(3.5).build();
        assert_eq!(
            result.unwrap_err(),
            "temperature must be between 0.0 and 2.0"
        );
    }
}
