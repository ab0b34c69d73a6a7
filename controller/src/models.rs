// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::entity::Entity;
use serde::{Deserialize, Serialize};

pub type MovieId = i64;
pub type RatingId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    // Only the detail endpoint sends these two
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

impl Entity for Movie {
    type Id = MovieId;

    fn get_id(&self) -> MovieId {
        self.movie_id
    }

    fn get_data(&self) -> Vec<(&'static str, String)> {
        let mut data = vec![("title", self.title.clone())];

        if let Some(poster_path) = &self.poster_path {
            data.push(("poster", poster_path.clone()));
        }

        if let Some(overview) = &self.overview {
            data.push(("overview", overview.clone()));
        }

        data
    }
}

/// Movie fields embedded in a rating for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub rating_id: RatingId,
    pub score: u8,
    pub movie_id: Option<MovieId>,
    pub movie: Option<MovieSummary>,
}

impl Rating {
    /// Best label for the rated movie: its title, else its id
    pub fn movie_label(&self) -> String {
        match (&self.movie, self.movie_id) {
            (Some(movie), _) => movie.title.clone(),
            (None, Some(id)) => format!("movie({})", id),
            (None, None) => "unknown movie".into(),
        }
    }
}

impl Entity for Rating {
    type Id = RatingId;

    fn get_id(&self) -> RatingId {
        self.rating_id
    }

    fn get_data(&self) -> Vec<(&'static str, String)> {
        vec![
            ("movie", self.movie_label()),
            ("score", self.score.to_string()),
        ]
    }
}

// Body of POST /api/ratings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub movie_id: MovieId,
    pub score: u8,
}

// Body of POST /api/auth
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    pub success: bool,
}

/// The authenticated user, kept by the client after a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

impl Session {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.into(),
        }
    }
}
