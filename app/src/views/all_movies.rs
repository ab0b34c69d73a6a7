use super::{Context, Load};
use crate::router::Route;
use crate::screen::{Element, Screen};
use controller::{Controller, Movie};

#[derive(Debug, Clone)]
pub struct AllMovies {
    movies: Load<Vec<Movie>>,
}

impl AllMovies {
    pub const HEADING: &'static str = "All Movies";

    pub async fn mount<C: Controller>(ctx: &Context<'_, C>) -> Self {
        Self {
            movies: ctx.controller.movies().await.into(),
        }
    }

    pub fn render(&self, screen: &mut Screen) {
        screen.push(Element::Heading(Self::HEADING.into()));

        match &self.movies {
            Load::Ready(movies) if movies.is_empty() => {
                screen.push(Element::Text("No movies yet".into()));
            }

            Load::Ready(movies) => {
                for movie in movies {
                    screen.push(Element::Link {
                        label: movie.title.clone(),
                        route: Route::MovieDetail(movie.movie_id),
                    });
                }
            }

            Load::Failed(reason) => screen.push(Element::Alert(reason.clone())),
        }
    }
}
