//! Message conversion for the chat completions API.

use stackscope_protocols::{ChatContent, ChatMessage, ChatRole, ContentPart as ProtoContentPart};

use crate::api::{ApiMessage, ContentPart, ImageUrl, MessageContent};

/// Convert protocol messages to API format.
pub fn convert_messages(messages: &[ChatMessage]) -> Vec<ApiMessage> {
    messages.iter().map(convert_message).collect()
}

fn convert_message(msg: &ChatMessage) -> ApiMessage {
    let role = match msg.role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    };

    let content = match &msg.content {
        ChatContent::Text(text) => MessageContent::Text(text.clone()),
        ChatContent::Parts(parts) => MessageContent::Parts(convert_parts(parts)),
    };

    ApiMessage {
        role: role.to_string(),
        content,
    }
}

fn convert_parts(parts: &[ProtoContentPart]) -> Vec<ContentPart> {
    parts
        .iter()
        .map(|part| match part {
            ProtoContentPart::Text { text } => ContentPart::Text { text: text.clone() },
            ProtoContentPart::Image { url } => ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: url.clone(),
                    detail: None,
                },
            },
        })
        .collect()
}
