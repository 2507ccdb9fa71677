//! Lifecycle listener registry.
//!
//! The deck owns a `Notifier` and emits through it, rather than mixing
//! publish/subscribe behavior into the widget itself. Listeners are boxed
//! closures; since closures have no usable identity, `on` hands back a
//! [`ListenerId`] token that `off` accepts to remove one listener, or `off`
//! can clear an event's whole table.

use fxhash::FxHashMap;

/// Lifecycle notifications of a page transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Fired synchronously when a transition starts.
    Move,
    /// Fired once the transition duration has elapsed.
    End,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(usize) + Send>;

#[derive(Default)]
pub struct Notifier {
    listeners: FxHashMap<Lifecycle, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Notifier {
        Notifier::default()
    }

    /// Registers `listener` for `event` and returns its removal token.
    pub fn on<F>(&mut self, event: Lifecycle, listener: F) -> ListenerId
    where
        F: FnMut(usize) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Removes one listener by token, or every listener for `event` when
    /// `listener` is `None`.
    pub fn off(&mut self, event: Lifecycle, listener: Option<ListenerId>) {
        let Some(entries) = self.listeners.get_mut(&event) else {
            return;
        };

        match listener {
            Some(id) => entries.retain(|(entry_id, _)| *entry_id != id),
            None => entries.clear(),
        }
    }

    pub fn emit(&mut self, event: Lifecycle, index: usize) {
        if let Some(entries) = self.listeners.get_mut(&event) {
            for (_, listener) in entries.iter_mut() {
                listener(index);
            }
        }
    }

    pub fn listener_count(&self, event: Lifecycle) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl FnMut(usize) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |index| sink.lock().unwrap().push(index))
    }

    #[test]
    fn emit_reaches_registered_listeners() {
        let mut notifier = Notifier::new();
        let (seen, listener) = recorder();

        notifier.on(Lifecycle::Move, listener);
        notifier.emit(Lifecycle::Move, 2);
        notifier.emit(Lifecycle::Move, 0);

        assert_eq!(*seen.lock().unwrap(), vec![2, 0]);
    }

    #[test]
    fn events_are_independent() {
        let mut notifier = Notifier::new();
        let (seen, listener) = recorder();

        notifier.on(Lifecycle::End, listener);
        notifier.emit(Lifecycle::Move, 1);

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn off_removes_single_listener() {
        let mut notifier = Notifier::new();
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();

        let first_id = notifier.on(Lifecycle::Move, first);
        notifier.on(Lifecycle::Move, second);

        notifier.off(Lifecycle::Move, Some(first_id));
        notifier.emit(Lifecycle::Move, 3);

        assert!(first_seen.lock().unwrap().is_empty());
        assert_eq!(*second_seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn off_without_token_clears_event() {
        let mut notifier = Notifier::new();
        let (seen, listener) = recorder();

        notifier.on(Lifecycle::Move, listener);
        notifier.off(Lifecycle::Move, None);
        notifier.emit(Lifecycle::Move, 1);

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(notifier.listener_count(Lifecycle::Move), 0);
    }
}
