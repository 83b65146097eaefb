/// Handle returned by [`SubscriberRegistry::subscribe`]. Holding it is the only way
/// to unregister, so a view bound to a new path cannot keep receiving events for the
/// old one once it has dropped its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
    path: String,
}

impl Subscription {
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Path-keyed listeners for playback events.
#[derive(Debug)]
pub struct SubscriberRegistry<H> {
    next_id: u64,
    entries: Vec<(Subscription, H)>,
}

impl<H> Default for SubscriberRegistry<H> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<H: Clone> SubscriberRegistry<H> {
    pub fn subscribe(&mut self, path: &str, handler: H) -> Subscription {
        let subscription = Subscription {
            id: self.next_id,
            path: path.to_string(),
        };
        self.next_id += 1;
        self.entries.push((subscription.clone(), handler));
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| entry.id != subscription.id);
        before != self.entries.len()
    }

    pub fn handlers_for(&self, path: &str) -> Vec<H> {
        self.entries
            .iter()
            .filter(|(entry, _)| entry.path == path)
            .map(|(_, handler)| handler.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_are_scoped_to_their_path() {
        let mut registry = SubscriberRegistry::default();
        registry.subscribe("/a", "first");
        registry.subscribe("/b", "second");
        registry.subscribe("/a", "third");

        assert_eq!(registry.handlers_for("/a"), vec!["first", "third"]);
        assert_eq!(registry.handlers_for("/b"), vec!["second"]);
        assert!(registry.handlers_for("/c").is_empty());
    }

    #[test]
    fn unsubscribe_removes_only_that_handle() {
        let mut registry = SubscriberRegistry::default();
        let first = registry.subscribe("/a", 1);
        let _second = registry.subscribe("/a", 2);

        assert!(registry.unsubscribe(&first));
        assert_eq!(registry.handlers_for("/a"), vec![2]);
        assert!(!registry.unsubscribe(&first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rebinding_to_a_new_path_stops_old_events() {
        let mut registry = SubscriberRegistry::default();
        let old = registry.subscribe("/old", "view");
        registry.unsubscribe(&old);
        let new = registry.subscribe("/new", "view");

        assert_eq!(new.path(), "/new");
        assert!(registry.handlers_for("/old").is_empty());
        assert_eq!(registry.handlers_for("/new"), vec!["view"]);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut registry = SubscriberRegistry::default();
        let first = registry.subscribe("/a", ());
        registry.unsubscribe(&first);
        let second = registry.subscribe("/a", ());
        assert_ne!(first, second);
        assert_eq!(registry.len(), 1);
    }
}
