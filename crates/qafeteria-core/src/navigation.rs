// ── Navigation ──
//
// Two routes and no history. Every handoff *replaces* the current entry,
// so there is never an earlier entry to go back to.

use serde::Serialize;
use strum::{Display, EnumIter};

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum Route {
    Login,
    Home,
}

/// Instruction published to front ends when a flow moves the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "route", rename_all = "snake_case")]
pub enum NavigationRequest {
    /// Show `Route`, discarding the current entry from history.
    Replace(Route),
}

impl NavigationRequest {
    pub fn target(self) -> Route {
        match self {
            Self::Replace(route) => route,
        }
    }
}

/// Tracks the current route. Moves only replace it.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Swap the current entry for `route`.
    pub fn replace(&mut self, route: Route) -> NavigationRequest {
        self.current = route;
        NavigationRequest::Replace(route)
    }

    /// Refusal for a back request: no earlier entry survives a replace.
    pub fn back(&self) -> NavigationError {
        NavigationError::NoHistory {
            current: self.current,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_leaves_no_history() {
        let mut nav = Navigator::default();
        assert_eq!(nav.replace(Route::Home), NavigationRequest::Replace(Route::Home));
        assert_eq!(nav.current(), Route::Home);
        assert_eq!(
            nav.back(),
            NavigationError::NoHistory {
                current: Route::Home
            }
        );
        assert_eq!(nav.current(), Route::Home);

        nav.replace(Route::Login);
        assert_eq!(
            nav.back(),
            NavigationError::NoHistory {
                current: Route::Login
            }
        );
    }

    #[test]
    fn request_serializes_with_route() {
        let json = serde_json::to_string(&NavigationRequest::Replace(Route::Login));
        assert_eq!(json.ok().as_deref(), Some(r#"{"kind":"replace","route":"Login"}"#));
    }
}
