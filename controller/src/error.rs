// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::models::MovieId;
use thiserror::Error as DError;

#[derive(Debug, Clone, PartialEq, Eq, DError)]
pub enum ErrorKind {
    #[error("Couldn't reach the server: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Server(u16),

    #[error("Couldn't find movie with id({0})")]
    NotFound(MovieId),

    #[error("Invalid email or password")]
    Auth,

    #[error("Couldn't understand the server response: {0}")]
    InvalidResponse(String),

    #[error("Score {0} is out of range ({1} to {2})")]
    ScoreOutOfRange(u8, u8, u8),
}
