use rig::OneOrMany;
use rig::completion::Usage as RigUsage;
use rig::message::AssistantContent;
use splashgen_types::{
    JsonSchema,
    json::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct Usage {
    pub completion_tokens: u64,
    pub prompt_tokens: u64,
    pub total_tokens: u64,
}

impl Usage {
    pub fn from_rig(usage: RigUsage) -> Self {
        Usage {
            completion_tokens: usage.output_tokens,
            prompt_tokens: usage.input_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// Text payload of a single, non-streamed completion.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub usage: Usage,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Response {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Joins every text part of an assistant choice. Tool calls and reasoning are ignored.
    pub fn from_rig_choice(choice: &OneOrMany<AssistantContent>) -> Self {
        let mut texts = Vec::new();
        if let AssistantContent::Text(t) = choice.first() {
            texts.push(t.text.clone());
        }

        for c in choice.rest() {
            if let AssistantContent::Text(t) = c {
                texts.push(t.text.clone());
            }
        }

        let text = if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        };

        Response {
            text,
            ..Default::default()
        }
    }

    /// The payload text, or `None` when the model answered without any text part.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}
