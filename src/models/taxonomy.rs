use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two user-owned classification lists a resource can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    Type,
    Platform,
}

impl TaxonomyKind {
    /// Collection path under the API root.
    pub fn path(&self) -> &'static str {
        match self {
            TaxonomyKind::Type => "/api/resource-types",
            TaxonomyKind::Platform => "/api/resource-platforms",
        }
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.path(), id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxonomyKind::Type => "resource type",
            TaxonomyKind::Platform => "resource platform",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resource type ("Book", "Video course") or platform ("Udemy", "YouTube").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub id: i64,
    pub name: String,
    /// `None` for system-wide entries.
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for create and rename.
#[derive(Serialize, Debug)]
pub struct TaxonomyInput<'a> {
    pub name: &'a str,
}

/// Looks up an entry name by id; absent ids and dangling ids both yield `None`.
pub fn name_of(entries: &[TaxonomyEntry], id: Option<i64>) -> Option<&str> {
    let id = id?;
    entries.iter().find(|e| e.id == id).map(|e| e.name.as_str())
}
