use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::Authenticator;

/// Every screen the application can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
    Home,
    Resources,
    ResourceDetail(i64),
    ResourceEdit(i64),
    Types,
    Platforms,
}

impl Route {
    /// Maps a path onto a route. `/` and anything unknown land on sign-in.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["signin"] => Route::SignIn,
            ["signup"] => Route::SignUp,
            ["home"] => Route::Home,
            ["resources"] => Route::Resources,
            ["resources", id] => id.parse().map(Route::ResourceDetail).unwrap_or(Route::SignIn),
            ["resources", id, "edit"] => id.parse().map(Route::ResourceEdit).unwrap_or(Route::SignIn),
            ["settings", "types"] => Route::Types,
            ["settings", "platforms"] => Route::Platforms,
            _ => Route::SignIn,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/signin".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::Home => "/home".to_string(),
            Route::Resources => "/resources".to_string(),
            Route::ResourceDetail(id) => format!("/resources/{}", id),
            Route::ResourceEdit(id) => format!("/resources/{}/edit", id),
            Route::Types => "/settings/types".to_string(),
            Route::Platforms => "/settings/platforms".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::SignIn | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One guarded navigation: `Pending` until the session check answers, then
/// either `Authorized` or `Redirected`. Both outcomes are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Pending(Route),
    Authorized(Route),
    Redirected { from: Route, to: Route },
}

impl Navigation {
    pub fn start(route: Route) -> Self {
        Navigation::Pending(route)
    }

    /// Applies the session check result. Terminal states ignore it.
    pub fn resolve(self, authenticated: bool) -> Self {
        match self {
            Navigation::Pending(route) if authenticated => Navigation::Authorized(route),
            Navigation::Pending(route) => Navigation::Redirected {
                from: route,
                to: Route::SignIn,
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Navigation::Pending(_))
    }

    /// The route that should actually be shown.
    pub fn target(&self) -> Route {
        match self {
            Navigation::Pending(route) | Navigation::Authorized(route) => *route,
            Navigation::Redirected { to, .. } => *to,
        }
    }
}

/// Gates protected screens on a fresh session check.
///
/// There is no cross-navigation cache: every call to [`RouteGuard::enter`]
/// asks the authenticator again.
#[derive(Clone)]
pub struct RouteGuard {
    authenticator: Arc<dyn Authenticator>,
}

impl RouteGuard {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        RouteGuard { authenticator }
    }

    /// Drives a pending navigation to its outcome.
    pub async fn resolve(&self, navigation: Navigation) -> Navigation {
        let Navigation::Pending(route) = navigation else {
            return navigation;
        };
        if !route.requires_auth() {
            return Navigation::Authorized(route);
        }

        let authenticated = self.authenticator.check_authenticated().await;
        let outcome = navigation.resolve(authenticated);
        debug!(
            event_name = "guard.navigation.resolved",
            event_domain = "guard",
            route = %route,
            target = %outcome.target(),
            authenticated,
            "guarded navigation resolved"
        );
        outcome
    }

    pub async fn enter(&self, route: Route) -> Navigation {
        self.resolve(Navigation::start(route)).await
    }

    /// For the sign-in and sign-up screens: someone who is already signed in
    /// is sent to the home screen instead.
    pub async fn enter_public(&self, route: Route) -> Navigation {
        if route.requires_auth() {
            return self.enter(route).await;
        }
        if self.authenticator.check_authenticated().await {
            Navigation::Redirected {
                from: route,
                to: Route::Home,
            }
        } else {
            Navigation::Authorized(route)
        }
    }
}
