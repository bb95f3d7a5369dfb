//! Typed change notifications.
//!
//! Listeners get a bare wake-up and re-read whatever they display; nothing is
//! pushed with the notification and nothing is replayed to late subscribers.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tokio::sync::mpsc;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// An entry was appended to the audit log.
    AuditLog,
    /// The investigation record was written or cleared.
    Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Topic, Callback)>,
}

/// Fire-and-forget broadcast keyed by [`Topic`].
///
/// Cloning yields another handle onto the same set of listeners.
#[derive(Clone, Default)]
pub struct ChangeBus {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ChangeBus")
            .field("listeners", &registry.listeners.len())
            .finish()
    }
}

impl ChangeBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bus shared by everything in this process.
    pub fn global() -> &'static ChangeBus {
        static GLOBAL: OnceLock<ChangeBus> = OnceLock::new();
        GLOBAL.get_or_init(ChangeBus::new)
    }

    pub fn subscribe(
        &self,
        topic: Topic,
        listener: impl Fn() + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, topic, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let before = registry.listeners.len();
        registry.listeners.retain(|(existing, _, _)| *existing != id);
        registry.listeners.len() != before
    }

    /// Call every listener currently registered for `topic`, synchronously.
    ///
    /// The registry lock is released before any listener runs, so listeners
    /// may subscribe or unsubscribe from inside the callback.
    pub fn notify(&self, topic: Topic) {
        let callbacks: Vec<Callback> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry
                .listeners
                .iter()
                .filter(|(_, t, _)| *t == topic)
                .map(|(_, _, callback)| Arc::clone(callback))
                .collect()
        };
        tracing::trace!(?topic, listeners = callbacks.len(), "Change notification");
        for callback in callbacks {
            callback();
        }
    }

    #[must_use]
    pub fn listener_count(&self, topic: Topic) -> usize {
        let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry
            .listeners
            .iter()
            .filter(|(_, t, _)| *t == topic)
            .count()
    }

    /// Async wake-ups for `topic`. Deregisters when dropped.
    #[must_use]
    pub fn listen(&self, topic: Topic) -> Listener {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.subscribe(topic, move || {
            let _ = tx.send(());
        });
        Listener {
            rx,
            id,
            bus: self.clone(),
        }
    }
}

/// A subscription that queues wake-ups for an async observer.
pub struct Listener {
    rx: mpsc::UnboundedReceiver<()>,
    id: SubscriptionId,
    bus: ChangeBus,
}

impl Listener {
    /// Wait for the next notification.
    pub async fn changed(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }

    /// Drain queued wake-ups; `true` if there was at least one.
    pub fn try_changed(&mut self) -> bool {
        let mut any = false;
        while self.rx.try_recv().is_ok() {
            any = true;
        }
        any
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}
