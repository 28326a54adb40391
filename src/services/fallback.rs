// src/services/fallback.rs
//! Canned answers used when `AI_FALLBACK_ENABLED` is on and the provider
//! cannot be used.

use crate::message::{ChatContext, FieldUpdates, UserType};
use crate::services::field_extractor::{email_domain, extract_fields};
use crate::services::knowledge::mentions_any;
use crate::services::suggestions::{
    DISCOVERY_SUGGESTIONS, MENTOR_SUGGESTIONS, PARENT_SUGGESTIONS,
};

const PARENT_REPLY: &str = "Perfect! I'd love to help you find the ideal FLL program for your child. \
MentorIQ connects families with amazing mentors and teams in your area. \
To get personalized recommendations, complete our quick registration so we understand your needs.";

const MENTOR_REPLY: &str = "Wonderful! We're always excited to connect with passionate educators and professionals. \
MentorIQ saves mentors 60%+ of administrative time through AI-powered tools, \
so you can focus on inspiring and guiding your students.";

const WELCOME_REPLY: &str = "Welcome to MentorIQ! I'm here to help you discover amazing FLL programs and mentors. \
What brings you to MentorIQ today?";

const REGISTRATION_PROMPT: &str = "I'm here to help you complete your registration! \
You can either fill out the form, or just tell me your name, email, and whether you're a parent or mentor.";

pub struct FallbackReply {
    pub response: String,
    pub suggestions: Vec<String>,
    pub field_updates: FieldUpdates,
}

fn owned(chips: &[&str]) -> Vec<String> {
    chips.iter().map(|s| s.to_string()).collect()
}

pub fn fallback_reply(message: &str, context: ChatContext) -> FallbackReply {
    match context {
        ChatContext::Landing => landing(message),
        ChatContext::Registration => registration(message),
    }
}

fn landing(message: &str) -> FallbackReply {
    let lower = message.to_lowercase();
    let (response, chips) = if mentions_any(&lower, &["parent", "child", "kid"]) {
        (PARENT_REPLY, PARENT_SUGGESTIONS)
    } else if mentions_any(&lower, &["mentor", "teach", "engineer"]) {
        (MENTOR_REPLY, MENTOR_SUGGESTIONS)
    } else {
        (WELCOME_REPLY, DISCOVERY_SUGGESTIONS)
    };

    FallbackReply {
        response: response.to_string(),
        suggestions: owned(chips),
        field_updates: FieldUpdates::default(),
    }
}

fn registration(message: &str) -> FallbackReply {
    let updates = extract_fields(message);
    let mut response = String::new();

    if let Some(name) = &updates.name {
        response.push_str(&format!("Hi {name}! Great to meet you. "));
    }

    if let Some(email) = &updates.email {
        match email_domain(email) {
            Some(domain) if domain.contains(".edu") => response.push_str(&format!(
                "I see you're from an educational institution ({domain}) - wonderful! "
            )),
            _ => response.push_str("Thanks for providing your email address! "),
        }
    }

    match updates.user_type {
        Some(UserType::Parent) => response.push_str(
            "Wonderful! We're excited to help you find the perfect FLL program for your child.",
        ),
        Some(UserType::Mentor) => {
            response.push_str("Fantastic! We need more passionate mentors like you.")
        }
        None => {}
    }

    if response.is_empty() {
        response.push_str(REGISTRATION_PROMPT);
    }

    FallbackReply {
        response: response.trim_end().to_string(),
        suggestions: Vec::new(),
        field_updates: updates,
    }
}
