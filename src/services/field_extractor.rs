// src/services/field_extractor.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::message::{FieldUpdates, UserType};
use crate::services::knowledge::mentions_any;

static INTRODUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:i'm|i am|my name is|call me)\s+([a-z\s]+)").expect("valid name pattern")
});

static CAPITALIZED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)$").expect("valid capitalized name pattern")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email pattern")
});

const PARENT_WORDS: &[&str] = &["parent", "child", "kid", "son", "daughter", "family"];
const MENTOR_WORDS: &[&str] = &["mentor", "teach", "coach", "lead", "engineer", "help"];

const MAX_NAME_LEN: usize = 50;

/// Pulls every registration field it can find. Never fails; unknown fields stay `None`.
pub fn extract_fields(message: &str) -> FieldUpdates {
    FieldUpdates {
        name: extract_name(message),
        email: extract_email(message),
        user_type: extract_user_type(message),
    }
}

pub fn extract_name(text: &str) -> Option<String> {
    let text = text.trim();
    [&*INTRODUCTION, &*CAPITALIZED_NAME]
        .iter()
        .filter_map(|re| re.captures(text))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .find(|name| is_valid_name(name))
}

pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() < MAX_NAME_LEN
        && name.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_user_type(text: &str) -> Option<UserType> {
    let lower = text.to_lowercase();
    if mentions_any(&lower, PARENT_WORDS) {
        Some(UserType::Parent)
    } else if mentions_any(&lower, MENTOR_WORDS) {
        Some(UserType::Mentor)
    } else {
        None
    }
}

/// Domain part of an address, if it has one.
pub fn email_domain(email: &str) -> Option<&str> {
    email.split_once('@').map(|(_, domain)| domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_introduction() {
        assert_eq!(extract_name("Hi, my name is Sarah Connor"), Some("Sarah Connor".into()));
        assert_eq!(extract_name("i'm bob"), Some("bob".into()));
    }

    #[test]
    fn name_from_bare_capitalized_words() {
        assert_eq!(extract_name("Grace Hopper"), Some("Grace Hopper".into()));
        assert_eq!(extract_name("what programs exist"), None);
    }

    #[test]
    fn introduction_stops_at_punctuation() {
        assert_eq!(extract_name("I am Dana, a parent"), Some("Dana".into()));
    }

    #[test]
    fn email_and_domain() {
        let email = extract_email("reach me at jo.lee@school.edu please").unwrap();
        assert_eq!(email, "jo.lee@school.edu");
        assert_eq!(email_domain(&email), Some("school.edu"));
        assert_eq!(extract_email("no address here"), None);
    }

    #[test]
    fn parent_keywords_win_over_mentor_keywords() {
        assert_eq!(
            extract_user_type("I want to help my daughter"),
            Some(UserType::Parent)
        );
        assert_eq!(extract_user_type("I coach a team"), Some(UserType::Mentor));
        assert_eq!(extract_user_type("hello"), None);
    }

    #[test]
    fn nothing_recognised_gives_empty_updates() {
        assert!(extract_fields("what time is it?").is_empty());
    }
}
