//! Session lifecycle: refreshing tokens, verifying the session, and gating
//! navigation on the result.

pub mod guard;
pub mod refresher;
pub mod session;

pub use guard::{Navigation, Route, RouteGuard};
pub use refresher::TokenRefresher;
pub use session::{Authenticator, SessionVerifier};
