//! Tag and nearby-place suggestions for the edit screen.
//!
//! A [`Suggester`] never fails from the caller's point of view: any problem
//! (no credential, network error, unexpected payload) degrades to an empty
//! list. The edit flow can always save without waiting for suggestions.

use std::{
    future::Future,
    sync::atomic::{AtomicUsize, Ordering},
};

pub use dispatch::{Suggestion, SuggestionDispatcher, SuggestionEvent};
pub use error::SuggestError;
pub use gemini::{GeminiConfig, GeminiSuggester};

mod dispatch;
mod error;
mod gemini;

/// Shown by the edit flow when place suggestions come back empty.
pub const PLACEHOLDER_PLACES: [&str; 2] = ["正在定位...", "附近商户"];

/// Upper bound on place names returned by a single request.
pub const MAX_PLACES: usize = 3;

/// Notes of this many characters or fewer do not trigger tag suggestions.
pub const DEFAULT_MIN_NOTE_CHARS: usize = 5;

/// Quiet period after the last note edit before tags are requested.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// External text classification and place lookup service.
pub trait Suggester: Send + Sync + 'static {
    /// Short labels for `note`; empty on any failure and for an empty note.
    fn suggest_tags(&self, note: &str) -> impl Future<Output = Vec<String>> + Send;

    /// Up to [`MAX_PLACES`] business names near the given position.
    fn suggest_nearby_places(
        &self,
        latitude: f64,
        longitude: f64,
        note: &str,
    ) -> impl Future<Output = Vec<String>> + Send;
}

/// Fixed answers, for running offline and for tests.
#[derive(Debug, Default)]
pub struct StaticSuggester {
    tags: Vec<String>,
    places: Vec<String>,
    calls: AtomicUsize,
}

impl StaticSuggester {
    pub fn new(tags: &[&str], places: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(ToString::to_string).collect(),
            places: places.iter().map(ToString::to_string).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Suggester for StaticSuggester {
    async fn suggest_tags(&self, note: &str) -> Vec<String> {
        if note.trim().is_empty() {
            return Vec::new();
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tags.clone()
    }

    async fn suggest_nearby_places(
        &self,
        _latitude: f64,
        _longitude: f64,
        _note: &str,
    ) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.places.iter().take(MAX_PLACES).cloned().collect()
    }
}

/// Either configured backend, so the front-end can pick one at startup.
#[derive(Debug)]
pub enum AnySuggester {
    Gemini(GeminiSuggester),
    Static(StaticSuggester),
}

impl Suggester for AnySuggester {
    async fn suggest_tags(&self, note: &str) -> Vec<String> {
        match self {
            Self::Gemini(inner) => inner.suggest_tags(note).await,
            Self::Static(inner) => inner.suggest_tags(note).await,
        }
    }

    async fn suggest_nearby_places(
        &self,
        latitude: f64,
        longitude: f64,
        note: &str,
    ) -> Vec<String> {
        match self {
            Self::Gemini(inner) => inner.suggest_nearby_places(latitude, longitude, note).await,
            Self::Static(inner) => inner.suggest_nearby_places(latitude, longitude, note).await,
        }
    }
}

/// Place names with [`PLACEHOLDER_PLACES`] substituted for an empty result.
pub fn places_or_placeholder(places: Vec<String>) -> Vec<String> {
    if places.is_empty() {
        PLACEHOLDER_PLACES.iter().map(ToString::to_string).collect()
    } else {
        places
    }
}
