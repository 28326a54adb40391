// src/message.rs
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Which page of the front end the conversation is happening on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatContext {
    Landing,
    Registration,
}

impl ChatContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatContext::Landing => "landing",
            ChatContext::Registration => "registration",
        }
    }
}

impl fmt::Display for ChatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit `null` reads as the type's default, same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One earlier turn as the front end stores it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl HistoryEntry {
    pub fn is_assistant(&self) -> bool {
        self.sender == "ai"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Older front-end builds still send `query`.
    #[serde(default, alias = "query")]
    pub message: Option<String>,
    /// Informational only; the route decides the context. Unknown tags are tolerated.
    #[serde(default)]
    pub context: Option<String>,
    /// Whatever the client knows about the user, or the partially filled registration form.
    #[serde(default, alias = "user_context", alias = "registration_data")]
    pub user_data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversation_history: Vec<HistoryEntry>,
}

/// Where the answer text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Groq,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub context: ChatContext,
    pub suggestions: Vec<String>,
    pub source: ReplySource,
    pub timestamp: DateTime<Utc>,
}

/// Registration fields recognised in the user's message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "userType", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

impl FieldUpdates {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.user_type.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Parent,
    Mentor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationChatResponse {
    #[serde(flatten)]
    pub chat: ChatResponse,
    pub field_updates: FieldUpdates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: ServiceStatus,
    pub groq_available: bool,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of `GET /api/ai/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiHealthStatus {
    pub status: ServiceStatus,
    pub groq_available: bool,
    pub credential_configured: bool,
    pub service: String,
    pub model: String,
    pub fallback_enabled: bool,
    pub response_time_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSummary {
    pub platform_info: String,
    pub mission: String,
    pub current_features: Vec<String>,
    pub user_types: Vec<String>,
    pub tech_stack: BTreeMap<String, String>,
    pub performance: BTreeMap<String, String>,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_query_field() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"query": "hi", "user_context": {"age": 9}}"#).unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert!(req.user_data.is_some());
        assert!(req.conversation_history.is_empty());
    }

    #[test]
    fn null_history_and_content_read_as_empty() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "hi", "user_context": null, "conversation_history": null}"#,
        )
        .unwrap();
        assert!(req.user_data.is_none());
        assert!(req.conversation_history.is_empty());

        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "hi", "conversation_history": [{"sender": "ai", "content": null}]}"#,
        )
        .unwrap();
        assert_eq!(req.conversation_history.len(), 1);
        assert!(req.conversation_history[0].is_assistant());
        assert_eq!(req.conversation_history[0].content, "");
    }

    #[test]
    fn unknown_context_tag_is_kept_as_text() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "hi", "context": "general"}"#).unwrap();
        assert_eq!(req.context.as_deref(), Some("general"));
    }

    #[test]
    fn aliased_fields_may_not_appear_twice() {
        for body in [
            r#"{"message": "a", "query": "b"}"#,
            r#"{"message": "a", "user_context": {}, "registration_data": {}}"#,
        ] {
            let err = serde_json::from_str::<ChatRequest>(body).unwrap_err();
            assert!(err.to_string().contains("duplicate field"), "{body}: {err}");
        }
    }

    #[test]
    fn field_updates_use_front_end_names() {
        let updates = FieldUpdates {
            name: Some("Ada".into()),
            email: None,
            user_type: Some(UserType::Mentor),
        };
        let json = serde_json::to_value(&updates).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ada", "userType": "mentor"}));
    }
}
