//! Search-as-you-type suggestions.

use std::sync::Arc;
use std::time::Duration;

use leather_lane_core::Product;
use tokio::sync::watch;

use super::matches_text;
use crate::catalog::Catalog;
use crate::timer::{Timer, TimerHandle};

/// Most suggestions shown for one input.
pub const MAX_SUGGESTIONS: usize = 5;

/// Products whose name or description contains `text`, in catalog order.
///
/// Blank input yields nothing.
#[must_use]
pub fn suggest<'a>(catalog: &'a Catalog, text: &str) -> Vec<&'a Product> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let needle = text.to_lowercase();
    catalog
        .products()
        .iter()
        .filter(|p| matches_text(p, &needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// The suggestions computed for one input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub query: String,
    pub products: Vec<Product>,
}

/// Recomputes suggestions once input has been quiet for the debounce delay.
///
/// Each call to [`input`](Self::input) cancels the pending recomputation,
/// so only the last keystroke of a burst is searched. Results are published
/// to every [`subscribe`](Self::subscribe)r.
#[derive(Debug)]
pub struct SuggestionDebouncer {
    catalog: Arc<Catalog>,
    timer: Timer,
    delay: Duration,
    pending: Option<TimerHandle>,
    tx: Arc<watch::Sender<Suggestions>>,
}

impl SuggestionDebouncer {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, timer: Timer, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(Suggestions::default());
        Self {
            catalog,
            timer,
            delay,
            pending: None,
            tx: Arc::new(tx),
        }
    }

    /// Receive every published set of suggestions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.tx.subscribe()
    }

    /// The most recently published suggestions.
    #[must_use]
    pub fn latest(&self) -> Suggestions {
        self.tx.borrow().clone()
    }

    /// Record new search input.
    pub fn input(&mut self, text: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }

        let text = text.into();
        let catalog = Arc::clone(&self.catalog);
        let tx = Arc::clone(&self.tx);

        self.pending = Some(self.timer.schedule(self.delay, move || {
            let products = suggest(&catalog, &text).into_iter().cloned().collect();
            tracing::debug!(query = %text, "Suggestions updated");
            tx.send_replace(Suggestions {
                query: text,
                products,
            });
        }));
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::builtin().unwrap())
    }

    #[test]
    fn test_blank_input_has_no_suggestions() {
        let catalog = catalog();
        assert!(suggest(&catalog, "").is_empty());
        assert!(suggest(&catalog, "   ").is_empty());
    }

    #[test]
    fn test_suggestions_are_capped() {
        let catalog = catalog();
        let products = suggest(&catalog, "leather");
        assert_eq!(products.len(), MAX_SUGGESTIONS);
        assert_eq!(products.first().unwrap().id.as_str(), "leather-jacket");
    }

    #[test]
    fn test_suggestions_match_description() {
        let catalog = catalog();
        let ids: Vec<&str> = suggest(&catalog, "Suede")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["suede-bomber"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_input_of_a_burst_is_searched() {
        let mut debouncer =
            SuggestionDebouncer::new(catalog(), Timer::current().unwrap(), Duration::from_millis(300));
        let rx = debouncer.subscribe();

        debouncer.input("b");
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.input("bo");
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.input("boots");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!rx.has_changed().unwrap());

        tokio::time::sleep(Duration::from_millis(150)).await;
        tokio::task::yield_now().await;

        let latest = debouncer.latest();
        assert_eq!(latest.query, "boots");
        assert_eq!(latest.products.len(), 2);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_search() {
        let mut debouncer =
            SuggestionDebouncer::new(catalog(), Timer::current().unwrap(), Duration::from_millis(300));
        let rx = debouncer.subscribe();

        debouncer.input("wallet");
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(*rx.borrow(), Suggestions::default());
    }
}
