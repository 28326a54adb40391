// src/services/suggestions.rs
use crate::message::ChatContext;
use crate::services::knowledge::mentions_any;

pub const PARENT_SUGGESTIONS: &[&str] = &[
    "Tell me about program costs and schedules",
    "How do I evaluate mentor quality?",
    "What age groups do you serve?",
    "Take me to registration",
];

pub const MENTOR_SUGGESTIONS: &[&str] = &[
    "How does the platform save time?",
    "What support do new mentors get?",
    "Show me mentor success stories",
    "Create my mentor profile",
];

pub const DISCOVERY_SUGGESTIONS: &[&str] = &[
    "I'm a parent looking for programs",
    "I want to become a mentor",
    "Tell me about FLL and robotics",
    "How does your platform work?",
];

/// Follow-up chips shown under the assistant's answer.
pub fn suggestions_for(message: &str, context: ChatContext) -> Vec<String> {
    let chips = match context {
        ChatContext::Registration => return Vec::new(),
        ChatContext::Landing => {
            let lower = message.to_lowercase();
            if mentions_any(&lower, &["parent", "child"]) {
                PARENT_SUGGESTIONS
            } else if mentions_any(&lower, &["mentor", "teach"]) {
                MENTOR_SUGGESTIONS
            } else {
                DISCOVERY_SUGGESTIONS
            }
        }
    };
    chips.iter().map(|s| s.to_string()).collect()
}
