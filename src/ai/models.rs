use serde::Serialize;

/// One chat-completion message. Content is either plain text or a list of
/// typed parts (text + image) for vision requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiMessage {
    pub role: String,
    pub content: AiContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AiContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Which configured model serves the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Text,
    Vision,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub kind: ModelKind,
    pub messages: Vec<AiMessage>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// System policy prompt plus the content to judge.
    pub fn text(system_prompt: &str, content: &str) -> Self {
        Self {
            kind: ModelKind::Text,
            messages: vec![
                AiMessage {
                    role: "system".into(),
                    content: AiContent::Text(system_prompt.into()),
                },
                AiMessage {
                    role: "user".into(),
                    content: AiContent::Text(content.into()),
                },
            ],
            temperature: Some(0.2),
        }
    }

    /// A single user turn carrying the prompt and the image URL.
    pub fn image(prompt: &str, image_url: &str) -> Self {
        Self {
            kind: ModelKind::Vision,
            messages: vec![AiMessage {
                role: "user".into(),
                content: AiContent::Parts(vec![
                    ContentPart::Text {
                        text: prompt.into(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_url.into(),
                        },
                    },
                ]),
            }],
            temperature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_request_serializes_as_typed_parts() {
        let request = CompletionRequest::image("Is this spam?", "https://x/y.jpg");
        let value = serde_json::to_value(&request.messages).unwrap();

        assert_eq!(
            value,
            json!([{
                "role": "user",
                "content": [
                    { "type": "text", "text": "Is this spam?" },
                    { "type": "image_url", "image_url": { "url": "https://x/y.jpg" } }
                ]
            }])
        );
    }

    #[test]
    fn text_request_has_system_then_user() {
        let request = CompletionRequest::text("policy", "hello");
        let value = serde_json::to_value(&request.messages).unwrap();

        assert_eq!(value[0]["role"], "system");
        assert_eq!(value[0]["content"], "policy");
        assert_eq!(value[1]["content"], "hello");
        assert_eq!(request.temperature, Some(0.2));
    }
}
