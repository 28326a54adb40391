// src/services/assistant.rs
use std::time::Instant;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{AppResult, ConfigError};
use crate::message::{ChatContext, FieldUpdates, HistoryEntry, ReplySource};
use crate::services::fallback::fallback_reply;
use crate::services::field_extractor::extract_fields;
use crate::services::groq_client::{ChatMessage, GroqClient, Role};
use crate::services::knowledge::KnowledgeBase;
use crate::services::prompts::system_prompt;
use crate::services::suggestions::suggestions_for;

/// How many earlier turns are replayed to the model.
pub const HISTORY_WINDOW: usize = 3;

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub response: String,
    pub suggestions: Vec<String>,
    pub field_updates: FieldUpdates,
    pub source: ReplySource,
}

/// One chat turn in, one answer out. Holds no per-conversation state.
#[derive(Debug, Clone)]
pub struct Assistant {
    groq: Option<GroqClient>,
    knowledge: &'static KnowledgeBase,
    fallback_enabled: bool,
}

impl Assistant {
    pub fn new(
        groq: Option<GroqClient>,
        knowledge: &'static KnowledgeBase,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            groq,
            knowledge,
            fallback_enabled,
        }
    }

    pub fn groq(&self) -> Option<&GroqClient> {
        self.groq.as_ref()
    }

    pub fn knowledge(&self) -> &'static KnowledgeBase {
        self.knowledge
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    /// Assembles the provider message list for one turn.
    pub fn build_messages(
        &self,
        context: ChatContext,
        message: &str,
        user_data: Option<&Value>,
        history: &[HistoryEntry],
    ) -> Vec<ChatMessage> {
        let knowledge = self.knowledge.relevant_to(message, context);
        let mut messages = vec![ChatMessage::new(
            Role::System,
            system_prompt(self.knowledge, context, user_data, &knowledge),
        )];

        let recent = history.len().saturating_sub(HISTORY_WINDOW);
        messages.extend(history[recent..].iter().map(|entry| {
            let role = if entry.is_assistant() {
                Role::Assistant
            } else {
                Role::User
            };
            ChatMessage::new(role, entry.content.clone())
        }));

        messages.push(ChatMessage::new(Role::User, message));
        messages
    }

    pub async fn respond(
        &self,
        context: ChatContext,
        message: &str,
        user_data: Option<&Value>,
        history: &[HistoryEntry],
    ) -> AppResult<TurnOutcome> {
        let Some(groq) = &self.groq else {
            if self.fallback_enabled {
                warn!(context = %context, "No provider credential, answering from fallback");
                return Ok(self.fallback(context, message));
            }
            return Err(ConfigError::MissingCredential.into());
        };

        let messages = self.build_messages(context, message, user_data, history);
        let started = Instant::now();

        match groq.chat(&messages).await {
            Ok(text) => {
                info!(
                    context = %context,
                    elapsed_ms = started.elapsed().as_millis(),
                    "Provider answered"
                );
                let field_updates = match context {
                    ChatContext::Registration => extract_fields(message),
                    ChatContext::Landing => FieldUpdates::default(),
                };
                Ok(TurnOutcome {
                    response: text,
                    suggestions: suggestions_for(message, context),
                    field_updates,
                    source: ReplySource::Groq,
                })
            }
            Err(err) if self.fallback_enabled => {
                warn!(context = %context, error = %err, "Provider failed, answering from fallback");
                Ok(self.fallback(context, message))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn fallback(&self, context: ChatContext, message: &str) -> TurnOutcome {
        let reply = fallback_reply(message, context);
        TurnOutcome {
            response: reply.response,
            suggestions: reply.suggestions,
            field_updates: reply.field_updates,
            source: ReplySource::Fallback,
        }
    }
}
