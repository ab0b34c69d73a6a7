use crate::screen::{Element, Screen};

#[derive(Debug, Clone, Default)]
pub struct Home;

impl Home {
    pub const HEADING: &'static str = "Movie Ratings App";

    pub fn render(&self, screen: &mut Screen) {
        screen.push(Element::Heading(Self::HEADING.into()));
        screen.push(Element::Text(
            "Browse all movies, rate the ones you watched and check your ratings.".into(),
        ));
    }
}
