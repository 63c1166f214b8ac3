//! Text screens over the API: each one loads its data into a
//! [`ViewState`] and renders from it.

pub mod dashboard;
pub mod resources;
pub mod state;
pub mod taxonomy;

pub use dashboard::{Dashboard, DashboardScreen};
pub use resources::{AiAction, ResourceDetailScreen, ResourceFilter, ResourceListScreen};
pub use state::{render, Alert, Screen, ViewState};
pub use taxonomy::TaxonomyScreen;
