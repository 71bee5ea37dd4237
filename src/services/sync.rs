use serde::Serialize;

use super::api::ApiError;

/// Async fetch state for one collection: Idle until the first `begin`, then
/// Loading until the matching `settle`, which lands in Ready or Errored.
/// Every collection hook in the app is an instance of this type.
///
/// A generation counter guards against out-of-order completions: `settle`
/// with a stale generation is discarded, so the last *started* fetch always
/// determines the final state, even across a rescope.
#[derive(Debug)]
pub struct Resource<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource {
            data: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T: Clone> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a fetch as started: loading set, error cleared, generation
    /// bumped. Returns the generation the caller must hand back to `settle`.
    /// The state lock must not be held while the fetch itself runs.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Apply a fetch outcome. Returns false when the result belonged to a
    /// superseded fetch and was discarded. On success the data is replaced
    /// wholesale; on failure the last-known-good data is kept and only the
    /// error message is recorded. Loading clears on both paths.
    pub fn settle(&mut self, generation: u64, result: Result<T, ApiError>) -> bool {
        if generation != self.generation {
            log::debug!(
                "discarding stale response (generation {} < {})",
                generation,
                self.generation
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        ResourceSnapshot {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// What the webview sees of a collection hook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ToggleFixed,
    AddLink,
    CreateProject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Projects,
    Items,
    Summaries,
    RecommendationItems,
}

/// Which collections a successful mutation makes stale. Every mutation site
/// consults this table instead of hand-picking refetch calls, so a new
/// mutation kind cannot forget an affected collection.
pub fn affected_collections(mutation: Mutation) -> &'static [Collection] {
    match mutation {
        Mutation::ToggleFixed => &[Collection::Items, Collection::Summaries],
        Mutation::AddLink => &[Collection::Items, Collection::Summaries],
        Mutation::CreateProject => &[Collection::Projects],
    }
}
