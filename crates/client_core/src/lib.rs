//! Client-side data-orchestration core for the remote joke catalog.
//!
//! Three orchestrators ([`CategoryProvider`], [`RandomJokeOrchestrator`],
//! [`SearchOrchestrator`]) drive lookups against a shared
//! [`RemoteJokeService`] boundary and expose their in-flight/error/result
//! lifecycle as [`RequestState`] values. Presentation code only reads
//! snapshots and invokes operations; it never mutates state directly.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Category,
    protocol::{Joke, SearchResponse},
};
use tracing::debug;
use url::Url;

pub mod error;
mod orchestrator;
mod state;

pub use error::ServiceError;
pub use orchestrator::{
    is_known_category, CategoryProvider, RandomJokeOrchestrator, SearchOrchestrator,
    SearchSnapshot, NO_CATEGORY_MESSAGE,
};
pub use state::{RequestState, RequestStatus};

/// The remote catalog boundary every orchestrator depends on. Pure: no
/// retries, no timeouts, no caching.
#[async_trait]
pub trait RemoteJokeService: Send + Sync {
    /// One random joke, optionally restricted to `category`.
    async fn fetch_random_joke(&self, category: Option<&Category>) -> Result<Joke, ServiceError>;

    /// The fixed catalog of valid category names; non-empty on success.
    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError>;

    /// All jokes matching `query`. An empty result is a valid success.
    async fn search_jokes(&self, query: &str) -> Result<Vec<Joke>, ServiceError>;
}

/// HTTP implementation of [`RemoteJokeService`].
pub struct HttpJokeService {
    http: Client,
    base_url: Url,
}

impl HttpJokeService {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|err| ServiceError::Transport(err.to_string()))
    }
}

#[async_trait]
impl RemoteJokeService for HttpJokeService {
    async fn fetch_random_joke(&self, category: Option<&Category>) -> Result<Joke, ServiceError> {
        let mut request = self.http.get(self.endpoint("jokes/random")?);
        if let Some(category) = category {
            request = request.query(&[("category", category.as_str())]);
        }
        let joke: Joke = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(category = ?category.map(Category::as_str), "fetched random joke");
        Ok(joke)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError> {
        let categories: Vec<Category> = self
            .http
            .get(self.endpoint("jokes/categories")?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if categories.is_empty() {
            return Err(ServiceError::EmptyCategories);
        }
        debug!(count = categories.len(), "fetched categories");
        Ok(categories)
    }

    async fn search_jokes(&self, query: &str) -> Result<Vec<Joke>, ServiceError> {
        let response: SearchResponse = self
            .http
            .get(self.endpoint("jokes/search")?)
            .query(&[("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(query, matches = response.result.len(), "searched jokes");
        Ok(response.result)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
