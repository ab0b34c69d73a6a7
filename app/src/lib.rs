pub mod error;
pub mod form;
pub mod router;
pub mod screen;
pub mod session;
pub mod views;

use anyhow::Error;
use config::AppConfig;
use controller::Controller;
use error::ErrorKind;
use form::{Field, Type, Value};
use router::Transition;
use screen::{Action, Element, Role};
use views::{Context, Home, Outcome, View};

pub use router::{Route, Router};
pub use screen::Screen;
pub use session::SessionStore;

/// Links shown above every view
const NAV: [(&str, Route); 4] = [
    ("Home", Route::Home),
    ("All Movies", Route::AllMovies),
    ("Log In", Route::Login),
    ("Your Ratings", Route::YourRatings),
];

/// The movie ratings client: one mounted view, the router that picked it and the session
pub struct App<C> {
    controller: C,
    config: AppConfig,
    session: SessionStore,
    router: Router,
    view: View,
}

impl<C: Controller> App<C> {
    pub fn new(controller: C, config: AppConfig) -> Self {
        Self {
            controller,
            config,
            session: SessionStore::new(),
            router: Router::new(),
            view: View::Home(Home),
        }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    pub fn screen(&self) -> Screen {
        let mut screen = Screen::new();

        for (label, route) in NAV.iter() {
            screen.push(Element::Link {
                label: (*label).into(),
                route: route.clone(),
            });
        }

        if let Some(session) = self.session.current_session() {
            screen.push(Element::Text(format!("Logged in as {}", session.email)));
            screen.push(Element::Button {
                label: "Log Out".into(),
                action: Action::Logout,
            });
        }

        self.view.render(&mut screen, &self.config);
        screen
    }

    // Only what the mounted view rendered, without the nav bar
    fn view_screen(&self) -> Screen {
        let mut screen = Screen::new();
        self.view.render(&mut screen, &self.config);
        screen
    }

    /// Fields of the form on the current view, if any
    pub fn fields(&self) -> Vec<Field<'static>> {
        self.view
            .form()
            .map(|form| form.fields().to_vec())
            .unwrap_or_default()
    }

    fn context(&self) -> Context<'_, C> {
        Context {
            controller: &self.controller,
            session: &self.session,
            config: &self.config,
        }
    }

    fn guarded(&self, route: &Route) -> bool {
        self.config.require_login && route.requires_session() && !self.session.is_logged_in()
    }

    // The new view is fully built before router and view are swapped, so a
    // dropped navigation leaves the previous view mounted
    async fn go(&mut self, transition: Transition) {
        let target = match self.router.target(&transition) {
            Some(target) => target,
            None => return,
        };

        let (target, transition) = if self.guarded(&target) {
            log::info!("{} needs a session, redirecting to {}", target, Route::Login);
            (Route::Login, Transition::Redirect(Route::Login))
        } else {
            (target, transition)
        };

        let view = View::mount(&target, &self.context()).await;

        log::debug!("{} -> {}", self.router.current(), target);
        self.router.apply(transition);
        self.view = view;
    }

    pub async fn navigate(&mut self, route: Route) {
        self.go(Transition::Link(route)).await
    }

    pub async fn back(&mut self) {
        self.go(Transition::Back).await
    }

    /// Mount the current view again, fetching its data anew
    pub async fn reload(&mut self) {
        let route = self.router.current().clone();
        let view = View::mount(&route, &self.context()).await;
        self.view = view;
    }

    /// Activate a button or link of the view named exactly `name`, otherwise
    /// any link, otherwise any button
    pub async fn click(&mut self, name: &str) -> Result<(), Error> {
        let view = self.view_screen();
        if view.exact(Role::Button, name).is_some() {
            return self.click_button(name).await;
        }

        if view.exact(Role::Link, name).is_some() {
            return self.click_link(name).await;
        }

        match self.screen().get(Role::Link, name) {
            Ok(_) => self.click_link(name).await,
            Err(e) => match e.downcast_ref::<ErrorKind>() {
                Some(ErrorKind::ElementNotFound(..)) => self.click_button(name).await,
                _ => Err(e),
            },
        }
    }

    /// Follow a link, an exact name in the view wins over the nav bar
    pub async fn click_link(&mut self, name: &str) -> Result<(), Error> {
        let in_view = self
            .view_screen()
            .exact(Role::Link, name)
            .and_then(|link| link.route().cloned());

        let route = match in_view {
            Some(route) => route,
            None => self
                .screen()
                .get(Role::Link, name)?
                .route()
                .cloned()
                .ok_or_else(|| ErrorKind::ElementNotFound(Role::Link, name.into()))?,
        };

        self.navigate(route).await;
        Ok(())
    }

    pub fn type_text(&mut self, label: &str, text: &str) -> Result<(), Error> {
        let label = self
            .screen()
            .get_any(&[Role::Textbox, Role::Password], label)?
            .name()
            .to_string();

        self.fill(&label, Value::Text(text.into()))
    }

    pub fn select_option(&mut self, label: &str, value: &str) -> Result<(), Error> {
        let label = self.screen().get(Role::Combobox, label)?.name().to_string();
        let value = Value::from_str(value, Type::Score)
            .map_err(|_| ErrorKind::InvalidOption(label.clone(), value.into()))?;

        self.fill(&label, value)
    }

    /// Set a form field by its exact label
    pub fn fill(&mut self, label: &str, value: Value) -> Result<(), Error> {
        let form = self
            .view
            .form_mut()
            .ok_or_else(|| ErrorKind::ElementNotFound(Role::Textbox, label.into()))?;

        form.set(label, value)?;
        Ok(())
    }

    pub async fn click_button(&mut self, name: &str) -> Result<(), Error> {
        let action = self.screen().get(Role::Button, name)?.action();

        match action {
            Some(Action::Submit) => self.submit().await,
            Some(Action::Logout) => {
                self.logout().await;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Submit the form of the current view
    pub async fn submit(&mut self) -> Result<(), Error> {
        if self.view.form().is_none() {
            return Err(ErrorKind::ElementNotFound(Role::Button, "submit".into()).into());
        }

        let ctx = Context {
            controller: &self.controller,
            session: &self.session,
            config: &self.config,
        };
        let outcome = self.view.submit(&ctx).await;

        match outcome {
            Outcome::Stay => {}
            Outcome::Redirect(route) => self.go(Transition::Redirect(route)).await,
            Outcome::Authenticated(session) => {
                self.session.set_session(session);
                self.go(Transition::Redirect(Route::YourRatings)).await;
            }
        }

        Ok(())
    }

    pub async fn logout(&mut self) {
        self.session.clear_session();
        self.go(Transition::Redirect(Route::Home)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use controller::{ErrorKind as ApiError, Movie, MovieId, MovieSummary, Rating, Session};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory backend recording the ratings it receives
    #[derive(Default)]
    struct FakeController {
        fail_ratings: bool,
        stall_movies: bool,
        extra_movie: Option<Movie>,
        movie_fetches: AtomicUsize,
        created: Mutex<Vec<(MovieId, u8)>>,
    }

    fn test_movie(id: MovieId) -> Movie {
        Movie {
            movie_id: id,
            title: "Test Movie".into(),
            poster_path: Some("some path".into()),
            overview: Some("blah, blah, blah".into()),
        }
    }

    #[async_trait]
    impl Controller for FakeController {
        async fn movies(&self) -> controller::Result<Vec<Movie>> {
            self.movie_fetches.fetch_add(1, Ordering::SeqCst);
            if self.stall_movies {
                std::future::pending::<()>().await;
            }

            Ok(vec![test_movie(1)].into_iter().chain(self.extra_movie.clone()).collect())
        }

        async fn movie_by_id(&self, id: MovieId) -> controller::Result<Movie> {
            match id {
                1 => Ok(test_movie(1)),
                _ => Err(ApiError::NotFound(id).into()),
            }
        }

        async fn ratings(&self) -> controller::Result<Vec<Rating>> {
            if self.fail_ratings {
                return Err(ApiError::Server(500).into());
            }

            Ok(vec![Rating {
                rating_id: 1,
                score: 2,
                movie_id: Some(1),
                movie: Some(MovieSummary {
                    title: "Test Movie".into(),
                }),
            }])
        }

        async fn insert_rating(&self, movie_id: MovieId, score: u8) -> controller::Result<Rating> {
            let score = self.check_score(score)?;
            if let Ok(mut created) = self.created.lock() {
                created.push((movie_id, score));
            }

            Ok(Rating {
                rating_id: 2,
                score,
                movie_id: Some(movie_id),
                movie: None,
            })
        }

        async fn login(&self, email: &str, password: &str) -> controller::Result<Session> {
            match password {
                "test" => Ok(Session::new(email)),
                _ => Err(ApiError::Auth.into()),
            }
        }
    }

    fn app() -> App<FakeController> {
        App::new(FakeController::default(), AppConfig::default())
    }

    fn guarded_app() -> App<FakeController> {
        let config = AppConfig {
            require_login: true,
            ..AppConfig::default()
        };

        App::new(FakeController::default(), config)
    }

    #[tokio::test]
    async fn starts_at_home_with_navigation() -> Result<(), Error> {
        let app = app();
        let screen = app.screen();

        assert_eq!(app.route(), &Route::Home);
        assert_eq!(screen.heading(), Some("Movie Ratings App"));
        assert_eq!(screen.all(Role::Link).count(), 4);
        assert!(screen.query(Role::Button, "log out").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn missing_movie_renders_inline_error() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::MovieDetail(99)).await;

        let screen = app.screen();
        assert_eq!(screen.heading(), Some("Movie Details"));
        assert!(screen.get(Role::Alert, "couldn't find movie")?.name().contains("99"));
        assert!(screen.query(Role::Combobox, "score").is_none());
        assert!(app.submit().await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_keeps_heading() -> Result<(), Error> {
        let controller = FakeController {
            fail_ratings: true,
            ..FakeController::default()
        };
        let mut app = App::new(controller, AppConfig::default());
        app.click_link("your ratings").await?;

        let screen = app.screen();
        assert_eq!(screen.heading(), Some("Your Ratings"));
        assert!(screen.query(Role::Alert, "status 500").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn rating_without_score_stays() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::MovieDetail(1)).await;
        app.click_button("submit").await?;

        assert_eq!(app.route(), &Route::MovieDetail(1));
        assert!(app.screen().query(Role::Alert, "score: is required").is_some());
        assert!(app.controller().created.lock().map(|c| c.is_empty()).unwrap_or(false));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_score_option_is_rejected() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::MovieDetail(1)).await;

        let err = app.select_option("score", "7").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::InvalidOption("Score:".into(), "7".into()))
        );

        let err = app.select_option("score", "great").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::InvalidOption("Score:".into(), "great".into()))
        );

        Ok(())
    }

    #[tokio::test]
    async fn rating_submission_redirects() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::MovieDetail(1)).await;
        app.select_option("score:", "4")?;
        app.click_button("submit").await?;

        assert_eq!(app.route(), &Route::YourRatings);
        let created = app.controller().created.lock().map(|c| c.clone()).unwrap_or_default();
        assert_eq!(created, vec![(1, 4)]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_login_shows_alert() -> Result<(), Error> {
        let mut app = app();
        app.click_link("log in").await?;
        app.type_text("email:", "user1@test.com")?;
        app.type_text("password:", "wrong")?;
        app.click_button("log in").await?;

        let screen = app.screen();
        assert_eq!(app.route(), &Route::Login);
        assert!(!app.session().is_logged_in());
        assert!(screen.query(Role::Alert, "invalid email or password").is_some());
        assert!(screen.text().contains("Password: []"));

        Ok(())
    }

    #[tokio::test]
    async fn login_requires_both_fields() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::Login).await;
        app.type_text("email", "user1@test.com")?;
        app.submit().await?;

        assert_eq!(app.route(), &Route::Login);
        assert!(app.screen().query(Role::Alert, "password: is required").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_session() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::Login).await;
        app.type_text("email", "user1@test.com")?;
        app.type_text("password", "test")?;
        app.submit().await?;

        assert!(app.screen().query(Role::Text, "logged in as user1@test.com").is_some());

        app.click_button("log out").await?;
        assert!(!app.session().is_logged_in());
        assert_eq!(app.route(), &Route::Home);

        Ok(())
    }

    #[tokio::test]
    async fn back_returns_to_previous_view() -> Result<(), Error> {
        let mut app = app();
        app.click_link("all movies").await?;
        app.click_link("test movie").await?;
        assert_eq!(app.route(), &Route::MovieDetail(1));

        app.back().await;
        assert_eq!(app.route(), &Route::AllMovies);
        assert_eq!(app.screen().heading(), Some("All Movies"));

        app.back().await;
        app.back().await;
        assert_eq!(app.route(), &Route::Home);

        Ok(())
    }

    #[tokio::test]
    async fn click_falls_back_to_buttons() -> Result<(), Error> {
        let mut app = app();
        app.click("all movies").await?;
        assert_eq!(app.route(), &Route::AllMovies);

        app.click("test movie").await?;
        app.select_option("score", "5")?;
        app.click("submit").await?;
        assert_eq!(app.route(), &Route::YourRatings);

        let err = app.click("nothing here").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::ElementNotFound(Role::Button, "nothing here".into()))
        );

        Ok(())
    }

    #[tokio::test]
    async fn click_presses_the_view_button_before_nav_links() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::Login).await;
        app.type_text("email:", "user1@test.com")?;
        app.type_text("password:", "test")?;

        app.click("log in").await?;

        assert_eq!(app.route(), &Route::YourRatings);
        assert!(app.session().is_logged_in());

        Ok(())
    }

    #[tokio::test]
    async fn movie_named_like_a_nav_link() -> Result<(), Error> {
        let controller = FakeController {
            extra_movie: Some(Movie {
                movie_id: 2,
                title: "Home".into(),
                poster_path: None,
                overview: None,
            }),
            ..FakeController::default()
        };
        let mut app = App::new(controller, AppConfig::default());

        app.navigate(Route::AllMovies).await;
        app.click("home").await?;
        assert_eq!(app.route(), &Route::MovieDetail(2));

        app.back().await;
        assert_eq!(app.route(), &Route::AllMovies);
        app.click_link("home").await?;
        assert_eq!(app.route(), &Route::MovieDetail(2));

        // Outside All Movies the nav link is the only match
        app.click_link("home").await?;
        assert_eq!(app.route(), &Route::Home);

        Ok(())
    }

    #[tokio::test]
    async fn dropped_navigation_keeps_previous_view() -> Result<(), Error> {
        let controller = FakeController {
            stall_movies: true,
            ..FakeController::default()
        };
        let mut app = App::new(controller, AppConfig::default());
        app.navigate(Route::Login).await;

        let navigation = tokio::time::timeout(
            Duration::from_millis(50),
            app.navigate(Route::AllMovies),
        )
        .await;
        assert!(navigation.is_err());

        assert_eq!(app.route(), &Route::Login);
        assert_eq!(app.screen().heading(), Some("Log In"));
        assert_eq!(app.controller().movie_fetches.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[tokio::test]
    async fn reload_fetches_again() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::AllMovies).await;
        assert_eq!(app.controller().movie_fetches.load(Ordering::SeqCst), 1);

        app.reload().await;

        assert_eq!(app.route(), &Route::AllMovies);
        assert_eq!(app.controller().movie_fetches.load(Ordering::SeqCst), 2);
        assert!(app.screen().query(Role::Link, "test movie").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn unguarded_by_default() -> Result<(), Error> {
        let mut app = app();
        app.navigate(Route::YourRatings).await;

        assert_eq!(app.route(), &Route::YourRatings);

        Ok(())
    }

    #[tokio::test]
    async fn guard_redirects_to_login() -> Result<(), Error> {
        let mut app = guarded_app();
        app.click_link("your ratings").await?;
        assert_eq!(app.route(), &Route::Login);

        app.navigate(Route::MovieDetail(1)).await;
        app.select_option("score", "3")?;
        app.submit().await?;
        assert_eq!(app.route(), &Route::Login);
        assert!(app.controller().created.lock().map(|c| c.is_empty()).unwrap_or(false));

        app.type_text("email", "user1@test.com")?;
        app.type_text("password", "test")?;
        app.submit().await?;
        assert_eq!(app.route(), &Route::YourRatings);

        Ok(())
    }

    #[tokio::test]
    async fn fields_follow_the_view() -> Result<(), Error> {
        let mut app = app();
        assert!(app.fields().is_empty());

        app.navigate(Route::Login).await;
        let labels: Vec<&str> = app.fields().iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["Email:", "Password:"]);

        app.navigate(Route::MovieDetail(1)).await;
        assert_eq!(app.fields(), vec![Field::Required("Score:", Type::Score)]);

        Ok(())
    }
}
