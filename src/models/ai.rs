use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body for the three per-resource AI actions.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct AiResourceRequest {
    pub resource_id: i64,
    pub save_to_resource: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub resource_id: i64,
    pub resource_name: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub priority: i64,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NoteSummary {
    pub resource_id: i64,
    pub resource_name: String,
    pub summary: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub technical_terms: HashMap<String, String>,
    #[serde(default)]
    pub main_topics: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MasteryPrediction {
    pub resource_id: i64,
    pub predicted_date: String,
    pub confidence: f64,
    pub days_remaining: i64,
    #[serde(default)]
    pub hours_remaining: Option<f64>,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ResourceCategorization {
    pub resource_id: i64,
    pub resource_name: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub skill_tags: Vec<String>,
    #[serde(default)]
    pub difficulty_level: String,
    #[serde(default)]
    pub related_skills: Vec<String>,
}

/// Everything the AI features have stored on a resource so far.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ResourceInsights {
    pub resource_id: i64,
    pub resource_name: String,
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub ai_tags: Vec<String>,
    #[serde(default)]
    pub ai_category: Option<String>,
    #[serde(default)]
    pub ai_mastery_date: Option<String>,
}
