//! Typed wrappers over the backend's REST endpoints, grouped the way the
//! backend groups them.

pub mod ai;
pub mod auth;
pub mod resources;
pub mod taxonomy;

pub use ai::{AiApi, DEFAULT_RECOMMENDATION_LIMIT};
pub use auth::AuthApi;
pub use resources::ResourceApi;
pub use taxonomy::TaxonomyApi;
