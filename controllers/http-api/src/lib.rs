// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use async_trait::async_trait;
use config::ApiConfig;
use controller::models::{AuthResponse, Credentials, NewRating};
use controller::{Controller, ErrorKind, Movie, MovieId, Rating, Session};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Talks to the movie-ratings REST API
pub struct HttpController {
    client: Client,
    base_url: String,
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_decode() {
        ErrorKind::InvalidResponse(e.to_string()).into()
    } else {
        ErrorKind::Network(e.to_string()).into()
    }
}

impl HttpController {
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self, Error> {
        // The cookie store carries the server session established by /api/auth
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').into(),
        })
    }

    pub fn with_config(config: &ApiConfig) -> Result<Self, Error> {
        Self::with_url(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.send().await.map_err(transport_error)?;
        log::debug!("{} {}", response.status(), response.url());

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let status = response.status();
        if !status.is_success() {
            return Err(ErrorKind::Server(status.as_u16()).into());
        }

        response.json::<T>().await.map_err(transport_error)
    }
}

#[async_trait]
impl Controller for HttpController {
    async fn movies(&self) -> Result<Vec<Movie>, Error> {
        let response = self.send(self.client.get(self.url("/api/movies"))).await?;
        Self::decode(response).await
    }

    async fn movie_by_id(&self, id: MovieId) -> Result<Movie, Error> {
        let path = format!("/api/movies/{}", id);
        let response = self.send(self.client.get(self.url(&path))).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ErrorKind::NotFound(id).into());
        }

        Self::decode(response).await
    }

    async fn ratings(&self) -> Result<Vec<Rating>, Error> {
        let response = self.send(self.client.get(self.url("/api/ratings"))).await?;
        Self::decode(response).await
    }

    async fn insert_rating(&self, movie_id: MovieId, score: u8) -> Result<Rating, Error> {
        let score = self.check_score(score)?;
        let body = NewRating { movie_id, score };

        let request = self.client.post(self.url("/api/ratings")).json(&body);
        let response = self.send(request).await?;
        let mut rating: Rating = Self::decode(response).await?;

        // The create response only echoes id and score
        rating.movie_id.get_or_insert(movie_id);
        log::info!("Rated movie({}) with {}", movie_id, rating.score);

        Ok(rating)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let body = Credentials { email, password };

        let request = self.client.post(self.url("/api/auth")).json(&body);
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ErrorKind::Auth.into());
            }
            _ => {}
        }

        let auth: AuthResponse = Self::decode(response).await?;
        if !auth.success {
            log::warn!("Login rejected for {}", email);
            return Err(ErrorKind::Auth.into());
        }

        log::info!("Logged in as {}", email);
        Ok(Session::new(email))
    }
}
