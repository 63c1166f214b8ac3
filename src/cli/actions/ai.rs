use std::fmt::Write as _;

use anyhow::{anyhow, Result};

use super::{require, show};
use crate::auth::Route;
use crate::models::{Recommendation, ResourceInsights};
use crate::state::AppState;
use crate::views::{AiAction, ResourceDetailScreen};

#[derive(Debug)]
pub enum AiCommand {
    Recommend { limit: u32 },
    Run { id: i64, action: AiAction },
    Insights(i64),
}

pub async fn execute(state: &AppState, command: AiCommand) -> Result<String> {
    match command {
        AiCommand::Recommend { limit } => {
            require(state, Route::Home).await?;
            let recommendations = state.ai().recommendations(limit).await?;
            Ok(format_recommendations(&recommendations))
        }
        AiCommand::Run { id, action } => {
            require(state, Route::ResourceDetail(id)).await?;
            let mut screen = ResourceDetailScreen::load(state, id).await;
            show(&screen)?;
            screen
                .run_ai(state, action)
                .await
                .map_err(|alert| anyhow!(alert.message))?;
            show(&screen)
        }
        AiCommand::Insights(id) => {
            require(state, Route::ResourceDetail(id)).await?;
            let insights = state.ai().insights(id).await?;
            Ok(format_insights(&insights))
        }
    }
}

fn format_recommendations(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return "Nothing to recommend yet. Add a few resources first.\n".to_string();
    }
    let mut out = String::new();
    for (i, r) in recommendations.iter().enumerate() {
        let _ = write!(out, "{}. {} (#{})", i + 1, r.resource_name, r.resource_id);
        let context: Vec<&str> = [r.resource_type.as_deref(), r.platform.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !context.is_empty() {
            let _ = write!(out, " [{}]", context.join(", "));
        }
        out.push('\n');
        if !r.reason.is_empty() {
            let _ = writeln!(out, "   {}", r.reason);
        }
    }
    out
}

fn format_insights(insights: &ResourceInsights) -> String {
    let mut out = format!("{} (#{})\n", insights.resource_name, insights.resource_id);
    let _ = writeln!(
        out,
        "  Category:  {}",
        insights.ai_category.as_deref().unwrap_or("-")
    );
    let tags = if insights.ai_tags.is_empty() {
        "-".to_string()
    } else {
        insights.ai_tags.join(", ")
    };
    let _ = writeln!(out, "  Tags:      {}", tags);
    let _ = writeln!(
        out,
        "  Mastery:   {}",
        insights.ai_mastery_date.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "  Summary:   {}",
        insights.ai_summary.as_deref().unwrap_or("-")
    );
    out
}
