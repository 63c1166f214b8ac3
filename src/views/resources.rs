use std::fmt;

use tracing::{info, warn};

use super::{Alert, Screen, ViewState};
use crate::client::ClientError;
use crate::models::{
    name_of, MasteryPrediction, NoteSummary, ProgressStatus, Resource, ResourceCategorization,
    TaxonomyEntry,
};
use crate::state::AppState;

/// Narrows the resource list. Both conditions must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub search: Option<String>,
    pub status: Option<ProgressStatus>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => resource.matches(needle),
            _ => true,
        };
        let status_ok = self.status.map_or(true, |s| resource.status() == s);
        search_ok && status_ok
    }
}

/// One line of the resource table with its names already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRow {
    pub id: i64,
    pub name: String,
    pub type_name: Option<String>,
    pub platform_name: Option<String>,
    pub status: ProgressStatus,
    pub progress: Option<u8>,
    pub rating: Option<i32>,
}

impl ResourceRow {
    fn new(resource: &Resource, types: &[TaxonomyEntry], platforms: &[TaxonomyEntry]) -> Self {
        ResourceRow {
            id: resource.id,
            name: resource.name.clone(),
            type_name: name_of(types, resource.resource_type_id).map(str::to_string),
            platform_name: name_of(platforms, resource.resource_platform_id).map(str::to_string),
            status: resource.status(),
            progress: resource.progress_percent(),
            rating: resource.rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTable {
    pub rows: Vec<ResourceRow>,
    /// Resources before filtering.
    pub total: usize,
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

impl fmt::Display for ResourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            if self.total == 0 {
                return writeln!(f, "No resources yet.");
            }
            return writeln!(f, "No resources match the filter.");
        }
        writeln!(
            f,
            "{:>5}  {:<32}  {:<16}  {:<16}  {:<12}  {:>8}  {:>6}",
            "ID", "NAME", "TYPE", "PLATFORM", "STATUS", "PROGRESS", "RATING"
        )?;
        for row in &self.rows {
            let progress = row.progress.map(|p| format!("{}%", p));
            let rating = row.rating.map(|r| format!("{}/5", r));
            writeln!(
                f,
                "{:>5}  {:<32}  {:<16}  {:<16}  {:<12}  {:>8}  {:>6}",
                row.id,
                row.name,
                or_dash(row.type_name.as_deref()),
                or_dash(row.platform_name.as_deref()),
                row.status.to_string(),
                or_dash(progress.as_deref()),
                or_dash(rating.as_deref()),
            )?;
        }
        writeln!(f, "{} of {} resources", self.rows.len(), self.total)
    }
}

/// The resource list.
pub struct ResourceListScreen {
    state: ViewState<ResourceTable>,
}

impl ResourceListScreen {
    pub async fn load(app: &AppState, filter: &ResourceFilter) -> Self {
        let resources = app.resources();
        let types = app.types();
        let platforms = app.platforms();
        let result = futures::try_join!(resources.list(), types.list(), platforms.list()).map(
            |(resources, types, platforms)| ResourceTable {
                total: resources.len(),
                rows: resources
                    .iter()
                    .filter(|r| filter.matches(r))
                    .map(|r| ResourceRow::new(r, &types, &platforms))
                    .collect(),
            },
        );
        ResourceListScreen {
            state: ViewState::from_result(result),
        }
    }
}

impl Screen for ResourceListScreen {
    type Data = ResourceTable;

    fn loading_message(&self) -> &'static str {
        "Loading resources..."
    }

    fn state(&self) -> &ViewState<ResourceTable> {
        &self.state
    }
}

/// The three things the AI panel can do for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    Summarize,
    Predict,
    Categorize,
}

impl AiAction {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            AiAction::Summarize => "Failed to summarize notes",
            AiAction::Predict => "Failed to predict mastery",
            AiAction::Categorize => "Failed to categorize resource",
        }
    }

    fn event_name(&self) -> &'static str {
        match self {
            AiAction::Summarize => "ai.summarize",
            AiAction::Predict => "ai.predict",
            AiAction::Categorize => "ai.categorize",
        }
    }
}

/// Results of AI actions run during this visit to the screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiPanel {
    pub summary: Option<NoteSummary>,
    pub prediction: Option<MasteryPrediction>,
    pub categorization: Option<ResourceCategorization>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDetail {
    pub resource: Resource,
    pub type_name: Option<String>,
    pub platform_name: Option<String>,
    pub ai: AiPanel,
}

fn write_list(f: &mut fmt::Formatter<'_>, label: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {}: {}", label, items.join(", "))
}

impl fmt::Display for ResourceDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.resource;
        writeln!(f, "{} (#{})", r.name, r.id)?;
        writeln!(f, "  Type:        {}", or_dash(self.type_name.as_deref()))?;
        writeln!(f, "  Platform:    {}", or_dash(self.platform_name.as_deref()))?;
        writeln!(f, "  Status:      {}", r.status())?;
        match (r.hours_spent, r.estimated_hours) {
            (spent, Some(estimated)) => writeln!(
                f,
                "  Hours:       {} of {} ({}%)",
                spent.unwrap_or(0),
                estimated,
                r.progress_percent().unwrap_or(0)
            )?,
            (Some(spent), None) => writeln!(f, "  Hours:       {}", spent)?,
            (None, None) => {}
        }
        if let Some(rating) = r.rating {
            writeln!(f, "  Rating:      {}/5", rating)?;
        }
        if let Some(started) = r.started_date {
            writeln!(f, "  Started:     {}", started.format("%Y-%m-%d"))?;
        }
        if let Some(completed) = r.completion_date {
            writeln!(f, "  Completed:   {}", completed.format("%Y-%m-%d"))?;
        }
        if let Some(description) = r.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "\nDescription\n  {}", description)?;
        }
        if let Some(notes) = r.notes.as_deref().filter(|n| !n.is_empty()) {
            writeln!(f, "\nNotes\n  {}", notes)?;
        }

        let tags = r.ai_tags();
        if r.ai_summary.is_some() || r.ai_category.is_some() || !tags.is_empty() {
            writeln!(f, "\nAI insights")?;
            if let Some(category) = &r.ai_category {
                writeln!(f, "  Category: {}", category)?;
            }
            if !tags.is_empty() {
                writeln!(f, "  Tags: {}", tags.join(", "))?;
            }
            if let Some(summary) = &r.ai_summary {
                writeln!(f, "  Summary: {}", summary)?;
            }
            if let Some(mastery) = r.ai_mastery_date {
                writeln!(f, "  Expected mastery: {}", mastery.format("%Y-%m-%d"))?;
            }
        }

        if let Some(summary) = &self.ai.summary {
            writeln!(f, "\nNote summary\n  {}", summary.summary)?;
            write_list(f, "Key concepts", &summary.key_concepts)?;
            write_list(f, "Main topics", &summary.main_topics)?;
            let mut terms: Vec<_> = summary.technical_terms.iter().collect();
            terms.sort();
            for (term, meaning) in terms {
                writeln!(f, "  {}: {}", term, meaning)?;
            }
        }
        if let Some(prediction) = &self.ai.prediction {
            writeln!(
                f,
                "\nMastery prediction\n  {} ({} days, {:.0}% confidence)",
                prediction.predicted_date,
                prediction.days_remaining,
                prediction.confidence * 100.0
            )?;
            if !prediction.recommendation.is_empty() {
                writeln!(f, "  {}", prediction.recommendation)?;
            }
        }
        if let Some(cat) = &self.ai.categorization {
            writeln!(f, "\nCategorization\n  {} / {}", cat.category, cat.subcategory)?;
            if !cat.difficulty_level.is_empty() {
                writeln!(f, "  Difficulty: {}", cat.difficulty_level)?;
            }
            write_list(f, "Skills", &cat.skill_tags)?;
            write_list(f, "Related", &cat.related_skills)?;
        }
        Ok(())
    }
}

/// One resource with its names resolved, plus the AI panel.
pub struct ResourceDetailScreen {
    id: i64,
    state: ViewState<ResourceDetail>,
}

impl ResourceDetailScreen {
    pub async fn load(app: &AppState, id: i64) -> Self {
        let state = ViewState::from_result(Self::fetch(app, id).await.map(|(r, t, p)| {
            ResourceDetail {
                resource: r,
                type_name: t,
                platform_name: p,
                ai: AiPanel::default(),
            }
        }));
        ResourceDetailScreen { id, state }
    }

    async fn fetch(
        app: &AppState,
        id: i64,
    ) -> Result<(Resource, Option<String>, Option<String>), ClientError> {
        let resources = app.resources();
        let types = app.types();
        let platforms = app.platforms();
        let (resource, types, platforms) =
            futures::try_join!(resources.get(id), types.list(), platforms.list())?;
        let type_name = name_of(&types, resource.resource_type_id).map(str::to_string);
        let platform_name = name_of(&platforms, resource.resource_platform_id).map(str::to_string);
        Ok((resource, type_name, platform_name))
    }

    /// Runs an AI action with the result saved to the resource, then
    /// reloads the resource so the stored insights show up. On failure the
    /// screen is left as it was.
    pub async fn run_ai(&mut self, app: &AppState, action: AiAction) -> Result<(), Alert> {
        let ai = app.ai();
        let outcome = match action {
            AiAction::Summarize => ai
                .summarize_notes(self.id, true)
                .await
                .map(|s| (Some(s), None, None)),
            AiAction::Predict => ai
                .predict_mastery(self.id, true)
                .await
                .map(|p| (None, Some(p), None)),
            AiAction::Categorize => ai
                .categorize(self.id, true)
                .await
                .map(|c| (None, None, Some(c))),
        };

        let (summary, prediction, categorization) = outcome.map_err(|e| {
            warn!(
                event_name = action.event_name(),
                event_domain = "ai",
                resource_id = self.id,
                error = %e,
                "AI action failed"
            );
            Alert::from_error(&e, action.fallback_message())
        })?;
        info!(
            event_name = action.event_name(),
            event_domain = "ai",
            resource_id = self.id,
            "AI action complete"
        );

        let refreshed = Self::fetch(app, self.id).await;
        if let Some(detail) = self.state.ready_mut() {
            if let Ok((resource, type_name, platform_name)) = refreshed {
                detail.resource = resource;
                detail.type_name = type_name;
                detail.platform_name = platform_name;
            }
            if summary.is_some() {
                detail.ai.summary = summary;
            }
            if prediction.is_some() {
                detail.ai.prediction = prediction;
            }
            if categorization.is_some() {
                detail.ai.categorization = categorization;
            }
        }
        Ok(())
    }
}

impl Screen for ResourceDetailScreen {
    type Data = ResourceDetail;

    fn loading_message(&self) -> &'static str {
        "Loading resource..."
    }

    fn state(&self) -> &ViewState<ResourceDetail> {
        &self.state
    }
}
