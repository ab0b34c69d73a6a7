use crate::error::ErrorKind;
use anyhow::Error;
use controller::MovieId;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Route {
    Home,
    AllMovies,
    MovieDetail(MovieId),
    Login,
    YourRatings,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::AllMovies => "/movies".into(),
            Route::MovieDetail(id) => format!("/movies/{}", id),
            Route::Login => "/login".into(),
            Route::YourRatings => "/ratings".into(),
        }
    }

    pub fn from_path(path: &str) -> Result<Self, Error> {
        let unknown = || ErrorKind::UnknownPath(path.into());
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["movies"] => Route::AllMovies,
            ["movies", id] => Route::MovieDetail(id.parse().map_err(|_| unknown())?),
            ["login"] => Route::Login,
            ["ratings"] => Route::YourRatings,
            _ => return Err(unknown().into()),
        };

        Ok(route)
    }

    /// Views that only make sense with a session
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::YourRatings)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Transition {
    /// The user activated a link
    Link(Route),
    /// The app moved on its own, ex. after a successful form submit
    Redirect(Route),
    Back,
}

/// Finite state machine over routes, starting at `Home`
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            current: Route::Home,
            history: Vec::new(),
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Where a transition would lead, `None` if it leads nowhere
    pub fn target(&self, transition: &Transition) -> Option<Route> {
        match transition {
            Transition::Link(route) | Transition::Redirect(route) => Some(route.clone()),
            Transition::Back => self.history.last().cloned(),
        }
    }

    pub fn apply(&mut self, transition: Transition) -> &Route {
        match transition {
            Transition::Link(route) | Transition::Redirect(route) => {
                let previous = std::mem::replace(&mut self.current, route);
                self.history.push(previous);
            }

            Transition::Back => {
                if let Some(previous) = self.history.pop() {
                    self.current = previous;
                }
            }
        }

        &self.current
    }
}
