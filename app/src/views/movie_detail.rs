use super::{Context, Load, Outcome};
use crate::error::ErrorKind;
use crate::form::{Field, Form, Type};
use crate::router::Route;
use crate::screen::{Element, Screen};
use config::AppConfig;
use controller::{Controller, Movie, MovieId};

pub const SCORE: &str = "Score:";
pub const SUBMIT: &str = "Submit";

#[derive(Debug, Clone)]
pub struct MovieDetail {
    id: MovieId,
    movie: Load<Movie>,
    form: Form,
}

fn poster_url(base: Option<&str>, path: &str) -> String {
    match base {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => path.into(),
    }
}

impl MovieDetail {
    pub const FALLBACK_HEADING: &'static str = "Movie Details";

    pub async fn mount<C: Controller>(id: MovieId, ctx: &Context<'_, C>) -> Self {
        let (min, max) = ctx.controller.score_range();
        let form = Form::new(vec![Field::Required(SCORE, Type::Score)], SUBMIT).with_choices(min..=max);

        Self {
            id,
            movie: ctx.controller.movie_by_id(id).await.into(),
            form,
        }
    }

    // No form to fill when the movie couldn't be loaded
    pub fn form(&self) -> Option<&Form> {
        match self.movie {
            Load::Ready(_) => Some(&self.form),
            Load::Failed(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match self.movie {
            Load::Ready(_) => Some(&mut self.form),
            Load::Failed(_) => None,
        }
    }

    pub fn render(&self, screen: &mut Screen, config: &AppConfig) {
        match &self.movie {
            Load::Ready(movie) => {
                screen.push(Element::Heading(movie.title.clone()));

                if let Some(path) = &movie.poster_path {
                    screen.push(Element::Image {
                        src: poster_url(config.poster_base_url.as_deref(), path),
                        alt: format!("{} poster", movie.title),
                    });
                }

                if let Some(overview) = &movie.overview {
                    screen.push(Element::Text(overview.clone()));
                }

                self.form.render(screen);
            }

            Load::Failed(reason) => {
                screen.push(Element::Heading(Self::FALLBACK_HEADING.into()));
                screen.push(Element::Alert(reason.clone()));
            }
        }
    }

    pub async fn submit<C: Controller>(&mut self, ctx: &Context<'_, C>) -> Outcome {
        if ctx.config.require_login && !ctx.session.is_logged_in() {
            return Outcome::Redirect(Route::Login);
        }

        let score = match self.form.get(SCORE).map(|value| value.as_score()) {
            Some(Ok(score)) => score,
            _ => {
                self.form.set_error(ErrorKind::MissingField(SCORE.into()));
                return Outcome::Stay;
            }
        };

        match ctx.controller.insert_rating(self.id, score).await {
            Ok(rating) => {
                log::debug!("Created rating({}) for movie({})", rating.rating_id, self.id);
                self.form.clear_error();
                Outcome::Redirect(Route::YourRatings)
            }

            Err(e) => {
                log::warn!("Couldn't rate movie({}): {}", self.id, e);
                self.form.set_error(e);
                Outcome::Stay
            }
        }
    }
}
