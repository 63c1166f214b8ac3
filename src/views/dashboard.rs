use std::fmt;

use tracing::warn;

use super::{Screen, ViewState};
use crate::auth::Route;
use crate::models::{ResourceStats, Session};
use crate::state::AppState;

pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load dashboard data";

/// Everything the home screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub session: Session,
    pub resource_count: usize,
    pub type_count: usize,
    pub platform_count: usize,
    pub stats: ResourceStats,
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "Welcome back, {}!", self.session.display_name())?;
        writeln!(f)?;
        writeln!(f, "  Resources           {}", self.resource_count)?;
        writeln!(f, "  Resource types      {}", self.type_count)?;
        writeln!(f, "  Platforms           {}", self.platform_count)?;
        writeln!(f)?;
        writeln!(f, "  Completed           {}", stats.completed_resources)?;
        writeln!(f, "  In progress         {}", stats.in_progress_resources)?;
        writeln!(f, "  Not started         {}", stats.not_started_resources)?;
        writeln!(f, "  Completion rate     {:.1}%", stats.completion_rate)?;
        writeln!(
            f,
            "  Hours               {} spent of {} estimated",
            stats.total_hours_spent, stats.total_estimated_hours
        )
    }
}

/// The home screen.
pub struct DashboardScreen {
    state: ViewState<Dashboard>,
    redirect: Option<Route>,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        DashboardScreen {
            state: ViewState::Loading,
            redirect: None,
        }
    }
}

impl DashboardScreen {
    /// Issues all five requests at once and waits for every one of them.
    pub async fn load(app: &AppState) -> Self {
        let auth = app.auth();
        let resources = app.resources();
        let types = app.types();
        let platforms = app.platforms();

        let (session, resources, types, platforms, stats) = futures::join!(
            auth.session(),
            resources.list(),
            types.list(),
            platforms.list(),
            resources.stats(),
        );

        let data = resources.and_then(|r| Ok((r, types?, platforms?, stats?)));

        match data {
            Ok((resources, types, platforms, stats)) => match session {
                Some(session) => DashboardScreen {
                    state: ViewState::Ready(Dashboard {
                        session,
                        resource_count: resources.len(),
                        type_count: types.len(),
                        platform_count: platforms.len(),
                        stats,
                    }),
                    redirect: None,
                },
                None => Self::signed_out(),
            },
            Err(e) if e.is_auth_failure() => Self::signed_out(),
            Err(e) => {
                warn!(
                    event_name = "dashboard.load.failed",
                    event_domain = "views",
                    error = %e,
                    "dashboard data could not be loaded"
                );
                DashboardScreen {
                    state: ViewState::Error {
                        detail: DASHBOARD_LOAD_FAILED.to_string(),
                    },
                    redirect: None,
                }
            }
        }
    }

    fn signed_out() -> Self {
        DashboardScreen {
            state: ViewState::Loading,
            redirect: Some(Route::SignIn),
        }
    }

    /// Where the screen sent the user instead of rendering, if anywhere.
    pub fn redirect(&self) -> Option<Route> {
        self.redirect
    }
}

impl Screen for DashboardScreen {
    type Data = Dashboard;

    fn loading_message(&self) -> &'static str {
        "Loading dashboard..."
    }

    fn state(&self) -> &ViewState<Dashboard> {
        &self.state
    }
}
