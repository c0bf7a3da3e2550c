//! Testing utilities.
//!
//! These are useful for testing applications that use the domain-feeds
//! library without making real network calls. See also
//! [`MockFetcher`](crate::fetchers::MockFetcher).

use std::sync::{Arc, RwLock};

use crate::traits::observer::{CollectEvent, Observer};

/// Observer that keeps every event for later assertions.
///
/// Clones share the same event log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<RwLock<Vec<CollectEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far, in arrival order.
    pub fn events(&self) -> Vec<CollectEvent> {
        self.events.read().unwrap().clone()
    }

    /// Number of events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&CollectEvent) -> bool) -> usize {
        self.events.read().unwrap().iter().filter(|e| predicate(e)).count()
    }

    /// Forget recorded events.
    pub fn reset(&self) {
        self.events.write().unwrap().clear();
    }
}

impl Observer for RecordingObserver {
    fn on_event(&self, event: CollectEvent) {
        self.events.write().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let observer = RecordingObserver::new();
        let shared = observer.clone();

        observer.on_event(CollectEvent::FetchStarted {
            source: "a".to_string(),
        });
        shared.on_event(CollectEvent::Collected {
            sources: 1,
            total: 0,
        });

        assert_eq!(observer.events().len(), 2);
        assert_eq!(
            observer.count(|e| matches!(e, CollectEvent::Collected { .. })),
            1
        );

        shared.reset();
        assert!(observer.events().is_empty());
    }
}
