use serde::Serialize;

pub const SYSTEM: &str = "You are the AI Assistant for a fast food restaurant.

Your role:
- Answer questions about menu, prices, timings, location
- Be friendly, helpful, and concise
- Use emojis sparingly for friendly tone
- If you don't know something, say so politely

IMPORTANT: Only use information from the provided context. Never make up data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

pub fn human_message(context: &str, question: &str) -> String {
    format!(
        "Use the following restaurant information to answer my question.\n\n\
         === RESTAURANT DATA ===\n{context}\n=== END DATA ===\n\n\
         My Question: {question}\n\n\
         Please provide a helpful response:"
    )
}

pub fn chat_messages(context: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: Role::System,
            content: SYSTEM.to_string(),
        },
        ChatMessage {
            role: Role::User,
            content: human_message(context, question),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_message_wraps_context_and_question() {
        let msg = human_message("Name: HFC", "Are you open?");
        let start = msg.find("=== RESTAURANT DATA ===").unwrap();
        let ctx = msg.find("Name: HFC").unwrap();
        let end = msg.find("=== END DATA ===").unwrap();
        assert!(start < ctx && ctx < end);
        assert!(msg.contains("My Question: Are you open?"));
    }

    #[test]
    fn braces_in_user_text_are_kept_verbatim() {
        let msg = human_message("menu {context}", "what is {question}?");
        assert!(msg.contains("menu {context}"));
        assert!(msg.contains("My Question: what is {question}?"));
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let json = serde_json::to_value(chat_messages("c", "q")).unwrap();
        assert_eq!(json[0]["role"], "system");
        assert_eq!(json[1]["role"], "user");
    }
}
