use reqwest::Url;
use review_core::contract::ReviewRequest;
use thiserror::Error;

use crate::auth::BearerToken;
use crate::block_on_client;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub status: u16,
    pub body: String,
}

impl PostOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait ReviewPoster {
    fn post_review(
        &self,
        token: &BearerToken,
        request: &ReviewRequest,
    ) -> Result<PostOutcome, PostError>;
}

pub struct HttpReviewPoster {
    client: reqwest::Client,
    url: Url,
}

impl HttpReviewPoster {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl ReviewPoster for HttpReviewPoster {
    fn post_review(
        &self,
        token: &BearerToken,
        request: &ReviewRequest,
    ) -> Result<PostOutcome, PostError> {
        let pending = self
            .client
            .post(self.url.clone())
            .bearer_auth(token.as_str())
            .json(request)
            .send();

        block_on_client(async move {
            let response = pending.await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(PostOutcome { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_counts_as_success() {
        let outcome = |status| PostOutcome {
            status,
            body: String::new(),
        };
        assert!(outcome(200).is_success());
        assert!(outcome(201).is_success());
        assert!(!outcome(401).is_success());
        assert!(!outcome(502).is_success());
    }
}
