// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;
pub mod models;

use anyhow::Error;
use async_trait::async_trait;

pub use entity::{Entity, ToTable};
pub use error::ErrorKind;
pub use models::{Movie, MovieId, MovieSummary, Rating, RatingId, Session};

pub type Result<T> = std::result::Result<T, Error>;

#[async_trait]
pub trait Controller: Send + Sync {
    /// Get all movies
    async fn movies(&self) -> Result<Vec<Movie>>;

    /// Get a single movie with its details, fails with `NotFound` if absent
    async fn movie_by_id(&self, id: MovieId) -> Result<Movie>;

    /// Get the ratings of the current user
    async fn ratings(&self) -> Result<Vec<Rating>>;

    /// Create a rating for a movie, the returned rating carries the id assigned by the server
    async fn insert_rating(&self, movie_id: MovieId, score: u8) -> Result<Rating>;

    /// Authenticate with email and password
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    /// The controller score range, ex. (1, 5) is (min_score, max_score)
    fn score_range(&self) -> (u8, u8) {
        (1, 5)
    }

    /// Check a score against `score_range` before it leaves the client
    fn check_score(&self, score: u8) -> Result<u8> {
        let (min, max) = self.score_range();
        if score < min || score > max {
            return Err(ErrorKind::ScoreOutOfRange(score, min, max).into());
        }

        Ok(score)
    }
}
