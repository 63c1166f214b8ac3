use std::fmt;

use tracing::warn;

use super::{Alert, Screen, ViewState};
use crate::models::{TaxonomyEntry, TaxonomyKind};
use crate::state::AppState;

pub const DELETE_FAILED: &str = "Failed to delete. It might be in use by some resources.";

#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyList {
    pub kind: TaxonomyKind,
    pub entries: Vec<TaxonomyEntry>,
}

impl fmt::Display for TaxonomyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No {}s yet.", self.kind);
        }
        writeln!(f, "{:>5}  NAME", "ID")?;
        for entry in &self.entries {
            let scope = if entry.user_id.is_none() { "  (system)" } else { "" };
            writeln!(f, "{:>5}  {}{}", entry.id, entry.name, scope)?;
        }
        Ok(())
    }
}

/// Settings screen for resource types or platforms.
pub struct TaxonomyScreen {
    kind: TaxonomyKind,
    state: ViewState<TaxonomyList>,
}

impl TaxonomyScreen {
    pub async fn load(app: &AppState, kind: TaxonomyKind) -> Self {
        let mut screen = TaxonomyScreen {
            kind,
            state: ViewState::Loading,
        };
        screen.reload(app).await;
        screen
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    async fn reload(&mut self, app: &AppState) {
        let kind = self.kind;
        let result = app
            .taxonomy(kind)
            .list()
            .await
            .map(|entries| TaxonomyList { kind, entries });
        self.state = ViewState::from_result(result);
    }

    pub async fn create(&mut self, app: &AppState, name: &str) -> Result<TaxonomyEntry, Alert> {
        let entry = app
            .taxonomy(self.kind)
            .create(name)
            .await
            .map_err(|e| Alert::from_error(&e, &format!("Failed to create {}", self.kind)))?;
        self.reload(app).await;
        Ok(entry)
    }

    pub async fn rename(
        &mut self,
        app: &AppState,
        id: i64,
        name: &str,
    ) -> Result<TaxonomyEntry, Alert> {
        let entry = app
            .taxonomy(self.kind)
            .rename(id, name)
            .await
            .map_err(|e| Alert::from_error(&e, &format!("Failed to update {}", self.kind)))?;
        self.reload(app).await;
        Ok(entry)
    }

    /// Deletes an entry. A refusal from the backend (usually because
    /// resources still point at the entry) leaves the list untouched.
    pub async fn delete(&mut self, app: &AppState, id: i64) -> Result<(), Alert> {
        if let Err(e) = app.taxonomy(self.kind).delete(id).await {
            warn!(
                event_name = "taxonomy.delete.failed",
                event_domain = "views",
                kind = %self.kind,
                id,
                error = %e,
                "delete refused"
            );
            return Err(Alert::from_error(&e, DELETE_FAILED));
        }
        self.reload(app).await;
        Ok(())
    }
}

impl Screen for TaxonomyScreen {
    type Data = TaxonomyList;

    fn loading_message(&self) -> &'static str {
        match self.kind {
            TaxonomyKind::Type => "Loading resource types...",
            TaxonomyKind::Platform => "Loading resource platforms...",
        }
    }

    fn state(&self) -> &ViewState<TaxonomyList> {
        &self.state
    }
}
