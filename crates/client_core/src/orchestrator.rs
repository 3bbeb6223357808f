use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::{domain::Category, protocol::Joke};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    error::failure_message,
    state::{RequestState, RequestStatus},
    RemoteJokeService,
};

pub const NO_CATEGORY_MESSAGE: &str = "Please select a category";

/// Fetches the catalog of valid category names once, at construction.
///
/// `Success` and `Failure` are terminal: there is no retrigger, a consumer
/// retries by recreating the provider.
pub struct CategoryProvider {
    state: watch::Sender<RequestState<Vec<Category>>>,
}

impl CategoryProvider {
    /// Issues the one-and-only category fetch immediately. Must be called
    /// from within a tokio runtime.
    pub fn new(service: Arc<dyn RemoteJokeService>) -> Arc<Self> {
        let (state, _) = watch::channel(RequestState::idle());
        let provider = Arc::new(Self { state });
        let task = Arc::clone(&provider);
        tokio::spawn(async move { task.load(service).await });
        provider
    }

    async fn load(&self, service: Arc<dyn RemoteJokeService>) {
        self.state.send_modify(RequestState::begin_loading);
        match service.fetch_categories().await {
            Ok(categories) => {
                debug!(count = categories.len(), "category catalog loaded");
                self.state.send_modify(|state| state.succeed(categories));
            }
            Err(err) => {
                warn!(error = %err, "category fetch failed");
                self.state
                    .send_modify(|state| state.fail(failure_message(&err)));
            }
        }
    }

    pub fn snapshot(&self) -> RequestState<Vec<Category>> {
        self.state.borrow().clone()
    }

    /// Receiver always holds the latest state; `changed()` resolves on every
    /// transition, so consumers can await `Success`/`Failure`.
    pub fn subscribe(&self) -> watch::Receiver<RequestState<Vec<Category>>> {
        self.state.subscribe()
    }
}

/// Fetches one random joke, optionally scoped to a category chosen per
/// call. Auto-fetches an unscoped joke at construction.
pub struct RandomJokeOrchestrator {
    service: Arc<dyn RemoteJokeService>,
    state: watch::Sender<RequestState<Joke>>,
    generation: AtomicU64,
}

impl RandomJokeOrchestrator {
    /// Must be called from within a tokio runtime.
    pub fn new(service: Arc<dyn RemoteJokeService>) -> Arc<Self> {
        let (state, _) = watch::channel(RequestState::idle());
        let orchestrator = Arc::new(Self {
            service,
            state,
            generation: AtomicU64::new(0),
        });
        let task = Arc::clone(&orchestrator);
        tokio::spawn(async move { task.refresh(None).await });
        orchestrator
    }

    /// Fetches a new random joke, superseding any in-flight refresh: the
    /// stale response, when it eventually resolves, is dropped so only the
    /// most recently requested joke is ever shown.
    pub async fn refresh(&self, category: Option<Category>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(RequestState::begin_loading);

        let result = self.service.fetch_random_joke(category.as_ref()).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "dropping superseded random joke response");
            return;
        }
        match result {
            Ok(joke) => self.state.send_modify(|state| state.succeed(joke)),
            Err(err) => {
                warn!(error = %err, category = ?category, "random joke fetch failed");
                self.state
                    .send_modify(|state| state.fail(failure_message(&err)));
            }
        }
    }

    pub fn snapshot(&self) -> RequestState<Joke> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState<Joke>> {
        self.state.subscribe()
    }
}

/// Search state plus the flag distinguishing "never ran" from "ran and
/// found nothing".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    pub request: RequestState<Vec<Joke>>,
    pub has_searched: bool,
}

enum SearchMode {
    ListAll,
    RandomOne,
}

/// Category-scoped search: either all jokes in a category or one random
/// joke from it. Both operations require a selected category and fail
/// locally, without a network call, when none is given.
pub struct SearchOrchestrator {
    service: Arc<dyn RemoteJokeService>,
    state: watch::Sender<SearchSnapshot>,
    generation: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(service: Arc<dyn RemoteJokeService>) -> Arc<Self> {
        let (state, _) = watch::channel(SearchSnapshot::default());
        Arc::new(Self {
            service,
            state,
            generation: AtomicU64::new(0),
        })
    }

    /// Lists every joke in `category`. An empty result is a success, not an
    /// error.
    pub async fn list_by_category(&self, category: Option<Category>) {
        self.run(category, SearchMode::ListAll).await;
    }

    /// Fetches one random joke from `category`, stored as a one-element
    /// result list.
    pub async fn random_from_category(&self, category: Option<Category>) {
        self.run(category, SearchMode::RandomOne).await;
    }

    async fn run(&self, category: Option<Category>, mode: SearchMode) {
        let Some(category) = category else {
            // Local validation failure: no service call, has_searched
            // untouched. Still takes a generation so an in-flight search
            // cannot overwrite the failure once it resolves.
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.state
                .send_modify(|snapshot| snapshot.request.fail(NO_CATEGORY_MESSAGE));
            return;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .send_modify(|snapshot| snapshot.request.begin_loading());

        let result = match mode {
            SearchMode::ListAll => self.service.search_jokes(category.as_str()).await,
            SearchMode::RandomOne => self
                .service
                .fetch_random_joke(Some(&category))
                .await
                .map(|joke| vec![joke]),
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, category = %category, "dropping superseded search response");
            return;
        }
        self.state.send_modify(|snapshot| {
            snapshot.has_searched = true;
            match result {
                Ok(jokes) => snapshot.request.succeed(jokes),
                Err(err) => {
                    warn!(error = %err, category = %category, "search failed");
                    snapshot.request.fail(failure_message(&err));
                    // Failed searches render as an empty result list, not an
                    // absent one.
                    snapshot.request.data = Some(Vec::new());
                }
            }
        });
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }
}

/// Convenience for consumers enforcing category gating: the selected token
/// must come from the fetched catalog.
pub fn is_known_category(state: &RequestState<Vec<Category>>, category: &Category) -> bool {
    state.status == RequestStatus::Success
        && state
            .data
            .as_ref()
            .is_some_and(|categories| categories.contains(category))
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
