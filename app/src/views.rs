pub mod all_movies;
pub mod home;
pub mod login;
pub mod movie_detail;
pub mod your_ratings;

pub use all_movies::AllMovies;
pub use home::Home;
pub use login::Login;
pub use movie_detail::MovieDetail;
pub use your_ratings::YourRatings;

use crate::form::Form;
use crate::router::Route;
use crate::screen::Screen;
use crate::session::SessionStore;
use anyhow::Error;
use config::AppConfig;
use controller::{Controller, Session};

/// What a view may read while mounting or submitting
pub struct Context<'a, C> {
    pub controller: &'a C,
    pub session: &'a SessionStore,
    pub config: &'a AppConfig,
}

/// Result of a data fetch, failures are kept as the message to show
#[derive(Debug, Clone)]
pub enum Load<T> {
    Ready(T),
    Failed(String),
}

impl<T> From<Result<T, Error>> for Load<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(data) => Load::Ready(data),
            Err(e) => {
                log::warn!("Fetch failed: {}", e);
                Load::Failed(e.to_string())
            }
        }
    }
}

/// What the app should do after a form submit
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    Stay,
    Redirect(Route),
    Authenticated(Session),
}

#[derive(Debug, Clone)]
pub enum View {
    Home(Home),
    AllMovies(AllMovies),
    MovieDetail(MovieDetail),
    Login(Login),
    YourRatings(YourRatings),
}

impl View {
    /// Build the view for a route, fetching whatever it shows
    pub async fn mount<C: Controller>(route: &Route, ctx: &Context<'_, C>) -> Self {
        match route {
            Route::Home => View::Home(Home),
            Route::AllMovies => View::AllMovies(AllMovies::mount(ctx).await),
            Route::MovieDetail(id) => View::MovieDetail(MovieDetail::mount(*id, ctx).await),
            Route::Login => View::Login(Login::new()),
            Route::YourRatings => View::YourRatings(YourRatings::mount(ctx).await),
        }
    }

    pub fn render(&self, screen: &mut Screen, config: &AppConfig) {
        match self {
            View::Home(view) => view.render(screen),
            View::AllMovies(view) => view.render(screen),
            View::MovieDetail(view) => view.render(screen, config),
            View::Login(view) => view.render(screen),
            View::YourRatings(view) => view.render(screen),
        }
    }

    pub fn form(&self) -> Option<&Form> {
        match self {
            View::MovieDetail(view) => view.form(),
            View::Login(view) => Some(view.form()),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match self {
            View::MovieDetail(view) => view.form_mut(),
            View::Login(view) => Some(view.form_mut()),
            _ => None,
        }
    }

    pub async fn submit<C: Controller>(&mut self, ctx: &Context<'_, C>) -> Outcome {
        match self {
            View::MovieDetail(view) => view.submit(ctx).await,
            View::Login(view) => view.submit(ctx).await,
            _ => Outcome::Stay,
        }
    }
}
