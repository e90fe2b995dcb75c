//! Background scheduling of suggestion requests for the edit screen.
//!
//! Each request carries a generation number. Starting a new request of the
//! same kind bumps the generation, so results that arrive late for an older
//! note are recognised by [`SuggestionDispatcher::accept`] and dropped.

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::Suggester;

#[derive(Clone, Debug, PartialEq)]
pub enum Suggestion {
    /// The quiet period elapsed and a tag request is in flight.
    TagsPending,
    Tags(Vec<String>),
    Places(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionEvent {
    pub generation: u64,
    pub suggestion: Suggestion,
}

pub struct SuggestionDispatcher<S> {
    suggester: Arc<S>,
    delay: Duration,
    min_note_chars: usize,
    tx: UnboundedSender<SuggestionEvent>,
    tag_generation: u64,
    place_generation: u64,
    pending_tags: Option<JoinHandle<()>>,
}

impl<S: Suggester> SuggestionDispatcher<S> {
    pub fn new(
        suggester: Arc<S>,
        delay: Duration,
        min_note_chars: usize,
        tx: UnboundedSender<SuggestionEvent>,
    ) -> Self {
        Self {
            suggester,
            delay,
            min_note_chars,
            tx,
            tag_generation: 0,
            place_generation: 0,
            pending_tags: None,
        }
    }

    /// Restarts the tag timer for `note`.
    ///
    /// Short notes only cancel whatever was pending.
    pub fn note_changed(&mut self, note: &str) {
        self.cancel_tags();
        if note.chars().count() <= self.min_note_chars {
            return;
        }

        let generation = self.tag_generation;
        let suggester = Arc::clone(&self.suggester);
        let tx = self.tx.clone();
        let delay = self.delay;
        let note = note.to_string();
        self.pending_tags = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let pending = SuggestionEvent {
                generation,
                suggestion: Suggestion::TagsPending,
            };
            if tx.send(pending).is_err() {
                return;
            }
            let tags = suggester.suggest_tags(&note).await;
            tracing::debug!(generation, count = tags.len(), "tag suggestions");
            let _ = tx.send(SuggestionEvent {
                generation,
                suggestion: Suggestion::Tags(tags),
            });
        }));
    }

    /// Asks for nearby places right away.
    pub fn request_places(&mut self, latitude: f64, longitude: f64, note: &str) {
        self.place_generation += 1;
        let generation = self.place_generation;
        let suggester = Arc::clone(&self.suggester);
        let tx = self.tx.clone();
        let note = note.to_string();
        tokio::spawn(async move {
            let places = suggester
                .suggest_nearby_places(latitude, longitude, &note)
                .await;
            let _ = tx.send(SuggestionEvent {
                generation,
                suggestion: Suggestion::Places(places),
            });
        });
    }

    /// Invalidates everything in flight, e.g. when the edit screen closes.
    pub fn reset(&mut self) {
        self.cancel_tags();
        self.place_generation += 1;
    }

    /// Whether `event` belongs to the latest request of its kind.
    pub fn accept(&self, event: &SuggestionEvent) -> bool {
        let current = match event.suggestion {
            Suggestion::TagsPending | Suggestion::Tags(_) => self.tag_generation,
            Suggestion::Places(_) => self.place_generation,
        };
        event.generation == current
    }

    fn cancel_tags(&mut self) {
        self.tag_generation += 1;
        if let Some(handle) = self.pending_tags.take() {
            handle.abort();
        }
    }
}

impl<S> Drop for SuggestionDispatcher<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_tags.take() {
            handle.abort();
        }
    }
}
