use super::{Context, Load};
use crate::screen::{Element, Screen};
use controller::{Controller, Rating, ToTable};

#[derive(Debug, Clone)]
pub struct YourRatings {
    ratings: Load<Vec<Rating>>,
}

impl YourRatings {
    pub const HEADING: &'static str = "Your Ratings";

    pub async fn mount<C: Controller>(ctx: &Context<'_, C>) -> Self {
        Self {
            ratings: ctx.controller.ratings().await.into(),
        }
    }

    pub fn render(&self, screen: &mut Screen) {
        screen.push(Element::Heading(Self::HEADING.into()));

        match &self.ratings {
            Load::Ready(ratings) if ratings.is_empty() => {
                screen.push(Element::Text("No ratings yet".into()));
            }
            Load::Ready(ratings) => screen.push(Element::Table(ratings.to_table())),
            Load::Failed(reason) => screen.push(Element::Alert(reason.clone())),
        }
    }
}
