use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a learner is with a resource.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    /// A value this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not_started",
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Completed => "completed",
            ProgressStatus::Unknown => "unknown",
        }
    }

    /// Parses user input; accepts `in_progress`, `in-progress` and `In Progress`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "not_started" => Some(ProgressStatus::NotStarted),
            "in_progress" => Some(ProgressStatus::InProgress),
            "completed" => Some(ProgressStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressStatus::Completed => "Completed",
            ProgressStatus::InProgress => "In Progress",
            // Anything unrecognised is shown like a fresh resource.
            ProgressStatus::NotStarted | ProgressStatus::Unknown => "Not Started",
        };
        f.write_str(label)
    }
}

/// A course, book, video or anything else being tracked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub resource_type_id: Option<i64>,
    #[serde(default)]
    pub resource_platform_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,

    #[serde(default)]
    pub progress_status: Option<ProgressStatus>,
    #[serde(default)]
    pub estimated_hours: Option<i64>,
    #[serde(default)]
    pub hours_spent: Option<i64>,
    #[serde(default, with = "super::timestamp")]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default, with = "super::timestamp")]
    pub started_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub ai_summary: Option<String>,
    /// Comma separated, see [`Resource::ai_tags`].
    #[serde(default, rename = "ai_tags")]
    pub ai_tags_raw: Option<String>,
    #[serde(default)]
    pub ai_category: Option<String>,
    #[serde(default, with = "super::timestamp")]
    pub ai_mastery_date: Option<DateTime<Utc>>,

    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource {
    pub fn status(&self) -> ProgressStatus {
        self.progress_status.unwrap_or_default()
    }

    pub fn ai_tags(&self) -> Vec<&str> {
        self.ai_tags_raw
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Percentage of the estimate already spent, capped at 100.
    pub fn progress_percent(&self) -> Option<u8> {
        let estimated = self.estimated_hours.filter(|h| *h > 0)?;
        let spent = self.hours_spent.unwrap_or(0).max(0);
        Some((spent.saturating_mul(100) / estimated).min(100) as u8)
    }

    /// Case-insensitive match against name and description.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

/// Body for `POST /api/resources`. Only `name` is required; absent optional
/// fields are left out of the payload entirely.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ResourceCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_platform_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_status: Option<ProgressStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_spent: Option<i64>,
}

impl ResourceCreate {
    pub fn new(name: impl Into<String>) -> Self {
        ResourceCreate {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body for `PUT /api/resources/{id}`. Every field is optional; only the
/// fields that are set are sent and changed.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ResourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_platform_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_status: Option<ProgressStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_spent: Option<i64>,
}

impl ResourceUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ResourceUpdate::default()
    }
}

/// Aggregates from `GET /api/resources/stats/overview`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResourceStats {
    pub total_resources: u64,
    pub completed_resources: u64,
    pub in_progress_resources: u64,
    pub not_started_resources: u64,
    /// Percentage, 0 to 100.
    pub completion_rate: f64,
    pub total_estimated_hours: i64,
    pub total_hours_spent: i64,
}
