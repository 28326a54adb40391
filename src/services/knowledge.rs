// src/services/knowledge.rs
//! Static knowledge about the mentor platform that is fed to the model
//! and exposed through `/api/ai/knowledge/summary`.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::message::{ChatContext, KnowledgeSummary};

#[derive(Debug)]
pub struct PlatformInfo {
    pub name: &'static str,
    pub mission: &'static str,
    pub vision: &'static str,
    pub approach: &'static str,
}

#[derive(Debug)]
pub struct Feature {
    pub key: &'static str,
    pub description: &'static str,
    pub detail: &'static str,
    pub capabilities: &'static [&'static str],
}

#[derive(Debug)]
pub struct UserProfile {
    pub key: &'static str,
    pub primary_goal: &'static str,
    pub pain_points: &'static [&'static str],
    pub success_metrics: &'static str,
}

#[derive(Debug)]
pub struct KnowledgeBase {
    pub platform: PlatformInfo,
    pub tech_stack: &'static [(&'static str, &'static str)],
    pub features: &'static [Feature],
    pub user_types: &'static [UserProfile],
    pub performance: &'static [(&'static str, &'static str)],
}

pub static KNOWLEDGE: KnowledgeBase = KnowledgeBase {
    platform: PlatformInfo {
        name: "MentorIQ",
        mission: "AI-augmented mentor platform saving 60%+ administrative time",
        vision: "Transform FIRST LEGO League mentoring through conversational AI",
        approach: "Hybrid SaaS + conversational AI interface",
    },
    tech_stack: &[
        ("frontend", "React 18 + TypeScript + TailwindCSS + Vite"),
        ("backend", "Rust + axum relay with Groq AI integration"),
        ("ai_service", "Groq with Llama 3.3 70B model"),
        ("state_management", "Zustand for React components"),
        ("hosting", "Vercel frontend, Railway/Render backend"),
    ],
    features: &[
        Feature {
            key: "landing_page",
            description: "AI-first program discovery interface",
            detail: "70/30 split-screen (content/AI chat)",
            capabilities: &[
                "Natural language program queries",
                "Smart recommendations for parents and mentors",
                "Multi-user conversational flows",
                "Program matching with mentor profiles",
            ],
        },
        Feature {
            key: "registration",
            description: "Bidirectional registration system",
            detail: "Real-time form and chat synchronization",
            capabilities: &[
                "Dual interface registration (form OR chat)",
                "Smart field extraction from natural language",
                "Contextual responses based on email domains",
                "Role-specific messaging for parents vs mentors",
                "Progressive registration with completion tracking",
            ],
        },
    ],
    user_types: &[
        UserProfile {
            key: "parents",
            primary_goal: "Find FLL programs for their children",
            pain_points: &[
                "Location-based program search",
                "Mentor quality assessment",
                "Program schedule compatibility",
                "Cost and value comparison",
            ],
            success_metrics: "Program enrollment, child satisfaction, skill development",
        },
        UserProfile {
            key: "mentors",
            primary_goal: "Lead or assist with FLL teams effectively",
            pain_points: &[
                "Student progress tracking",
                "Resource and scheduling management",
                "Parent communication overhead",
                "Competition preparation coordination",
            ],
            success_metrics: "Team performance, mentor retention, 60%+ time savings",
        },
    ],
    performance: &[
        ("response_time", "<500ms with Groq integration"),
        ("accuracy", ">95% intent recognition"),
        ("completion_rate", ">90% registration completion"),
    ],
};

const PROGRAM_WORDS: &[&str] = &["program", "team", "find", "robotics"];
const PARENT_WORDS: &[&str] = &["parent", "child", "kid"];
const MENTOR_WORDS: &[&str] = &["mentor", "teach", "coach", "engineer"];

const NO_MATCH: &str = "General MentorIQ platform knowledge available.";

pub(crate) fn mentions_any(text_lower: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text_lower.contains(w))
}

impl KnowledgeBase {
    pub fn feature(&self, key: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.key == key)
    }

    pub fn user_type(&self, key: &str) -> Option<&UserProfile> {
        self.user_types.iter().find(|u| u.key == key)
    }

    /// Picks the knowledge snippets relevant to this message.
    pub fn relevant_to(&self, message: &str, context: ChatContext) -> String {
        let lower = message.to_lowercase();
        let mut sections = Vec::new();

        match context {
            ChatContext::Landing => {
                if mentions_any(&lower, PROGRAM_WORDS) {
                    if let Some(landing) = self.feature("landing_page") {
                        sections.push(format!(
                            "PROGRAM DISCOVERY:\n- Platform: {}\n- Feature: {}\n- Layout: {}\n- Capabilities: {}",
                            self.platform.name,
                            landing.description,
                            landing.detail,
                            landing.capabilities.join(", ")
                        ));
                    }
                }
                if mentions_any(&lower, PARENT_WORDS) {
                    if let Some(parents) = self.user_type("parents") {
                        sections.push(format!(
                            "PARENT USER CONTEXT:\n- Goal: {}\n- Common Concerns: {}\n- Success Outcome: {}",
                            parents.primary_goal,
                            parents.pain_points.join(", "),
                            parents.success_metrics
                        ));
                    }
                }
                if mentions_any(&lower, MENTOR_WORDS) {
                    if let Some(mentors) = self.user_type("mentors") {
                        sections.push(format!(
                            "MENTOR USER CONTEXT:\n- Goal: {}\n- Platform Benefit: {}\n- Time Savings: 60%+ administrative time reduction",
                            mentors.primary_goal, mentors.success_metrics
                        ));
                    }
                }
            }
            ChatContext::Registration => {
                if let Some(reg) = self.feature("registration") {
                    sections.push(format!(
                        "REGISTRATION SYSTEM:\n- Innovation: {}\n- Capabilities: {}\n- Target: >90% completion rate vs industry 60%",
                        reg.detail,
                        reg.capabilities.join(", ")
                    ));
                }
            }
        }

        if sections.is_empty() {
            NO_MATCH.to_string()
        } else {
            sections.join("\n\n")
        }
    }

    pub fn summary(&self) -> KnowledgeSummary {
        let to_map = |pairs: &[(&str, &str)]| -> BTreeMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        KnowledgeSummary {
            platform_info: self.platform.name.to_string(),
            mission: self.platform.mission.to_string(),
            current_features: self.features.iter().map(|f| f.key.to_string()).collect(),
            user_types: self.user_types.iter().map(|u| u.key.to_string()).collect(),
            tech_stack: to_map(self.tech_stack),
            performance: to_map(self.performance),
            last_updated: Utc::now(),
        }
    }
}
