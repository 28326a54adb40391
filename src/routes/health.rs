// src/routes/health.rs
use std::time::Instant;

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::warn;

use crate::error::ConfigError;
use crate::message::{AiHealthStatus, HealthStatus, KnowledgeSummary, ServiceStatus};
use crate::state::SharedState;

const SERVICE_NAME: &str = "MentorIQ AI Backend";
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn root_handler(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": VERSION,
        "description": "Chat relay for the mentor platform, backed by Groq",
        "status": "operational",
        "ai_provider": "Groq",
        "groq_available": state.config.groq_configured(),
        "endpoints": {
            "ai_chat_landing": "/api/ai/chat/landing",
            "ai_chat_registration": "/api/ai/chat/registration",
            "ai_health": "/api/ai/health",
            "knowledge_summary": "/api/ai/knowledge/summary",
        },
        "timestamp": Utc::now(),
    }))
}

/// Liveness. Makes no outbound call; `groq_available` only says whether a key is configured.
pub async fn health_handler(State(state): State<SharedState>) -> Json<HealthStatus> {
    let groq_available = state.config.groq_configured();
    Json(HealthStatus {
        status: if groq_available {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        },
        groq_available,
        service: SERVICE_NAME.to_string(),
        version: VERSION.to_string(),
        timestamp: Utc::now(),
    })
}

/// Provider health. Probes the provider and reports `degraded` instead of failing.
pub async fn ai_health_handler(State(state): State<SharedState>) -> Json<AiHealthStatus> {
    let started = Instant::now();
    let assistant = &state.assistant;

    let probe = match assistant.groq() {
        Some(groq) => groq.probe().await.map_err(|e| e.to_string()),
        None => Err(ConfigError::MissingCredential.to_string()),
    };

    if let Err(reason) = &probe {
        warn!("AI health check degraded: {}", reason);
    }

    Json(AiHealthStatus {
        status: if probe.is_ok() {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        },
        groq_available: probe.is_ok(),
        credential_configured: assistant.groq().is_some(),
        service: "MentorIQ AI Assistant".to_string(),
        model: state.config.groq_model.clone(),
        fallback_enabled: assistant.fallback_enabled(),
        response_time_ms: started.elapsed().as_millis(),
        error: probe.err(),
        timestamp: Utc::now(),
    })
}

pub async fn knowledge_summary_handler(State(state): State<SharedState>) -> Json<KnowledgeSummary> {
    Json(state.assistant.knowledge().summary())
}
