//! Event surface of the endpoint
//!
//! Engine notifications are republished as [`EndpointEvent`]s, a fixed
//! enum — no dynamic event names. Two consumption styles are offered:
//!
//! - callback listeners registered per [`EventKind`], each removable
//!   through its own [`ListenerHandle`];
//! - an async [`EventStream`] backed by a broadcast channel.
//!
//! Events are neither buffered beyond the broadcast capacity, deduplicated,
//! nor reordered; every subscriber observes the engine's delivery order.
//!
//! ```
//! use sip_endpoint::events::{EventEmitter, EventKind, EndpointEvent};
//!
//! let emitter = EventEmitter::default();
//! let handle = emitter.on(EventKind::ConnectivityChanged, |event| {
//!     if let EndpointEvent::ConnectivityChanged(available) = event {
//!         println!("connectivity: {available}");
//!     }
//! });
//! emitter.emit(EndpointEvent::ConnectivityChanged(true));
//! emitter.remove_listener(&handle);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::account::Account;
use crate::call::Call;
use crate::message::Message;

/// Events emitted by the endpoint, one per engine notification.
#[derive(Debug, Clone)]
pub enum EndpointEvent {
    /// Registration status of an account changed.
    RegistrationChanged(Account),
    /// An incoming call arrived.
    CallReceived(Call),
    /// State or media flags of a call changed.
    CallChanged(Call),
    /// A call reached a terminal state.
    CallTerminated(Call),
    /// The platform locked or unlocked the call screen.
    CallScreenLocked(bool),
    /// A SIP MESSAGE arrived.
    MessageReceived(Message),
    /// Network connectivity toward the configured services changed.
    ConnectivityChanged(bool),
}

impl EndpointEvent {
    /// Field-less discriminant of this event, for listener registration.
    pub fn kind(&self) -> EventKind {
        match self {
            EndpointEvent::RegistrationChanged(_) => EventKind::RegistrationChanged,
            EndpointEvent::CallReceived(_) => EventKind::CallReceived,
            EndpointEvent::CallChanged(_) => EventKind::CallChanged,
            EndpointEvent::CallTerminated(_) => EventKind::CallTerminated,
            EndpointEvent::CallScreenLocked(_) => EventKind::CallScreenLocked,
            EndpointEvent::MessageReceived(_) => EventKind::MessageReceived,
            EndpointEvent::ConnectivityChanged(_) => EventKind::ConnectivityChanged,
        }
    }
}

/// The fixed set of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`EndpointEvent::RegistrationChanged`].
    RegistrationChanged,
    /// See [`EndpointEvent::CallReceived`].
    CallReceived,
    /// See [`EndpointEvent::CallChanged`].
    CallChanged,
    /// See [`EndpointEvent::CallTerminated`].
    CallTerminated,
    /// See [`EndpointEvent::CallScreenLocked`].
    CallScreenLocked,
    /// See [`EndpointEvent::MessageReceived`].
    MessageReceived,
    /// See [`EndpointEvent::ConnectivityChanged`].
    ConnectivityChanged,
}

/// Async stream of endpoint events.
pub type EventStream = BroadcastStream<EndpointEvent>;

type Listener = Arc<dyn Fn(&EndpointEvent) + Send + Sync>;

/// Handle identifying one registered listener.
///
/// Removing a handle detaches only the listener it was returned for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerHandle {
    kind: EventKind,
    id: u64,
}

impl ListenerHandle {
    /// Event kind this listener was registered for.
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// Typed publish/subscribe mechanism for endpoint events.
pub struct EventEmitter {
    sender: broadcast::Sender<EndpointEvent>,
    listeners: Mutex<HashMap<EventKind, Vec<(u64, Listener)>>>,
    next_id: AtomicU64,
}

impl EventEmitter {
    /// Create an emitter whose broadcast side buffers up to `capacity`
    /// events per lagging subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Deliver an event to every registered listener of its kind, in
    /// registration order, then to every stream subscriber.
    pub fn emit(&self, event: EndpointEvent) {
        // Snapshot under the lock so a listener may register or remove
        // listeners without deadlocking.
        let snapshot: Vec<Listener> = {
            let listeners = self.listeners.lock();
            listeners
                .get(&event.kind())
                .map(|list| list.iter().map(|(_, l)| Arc::clone(l)).collect())
                .unwrap_or_default()
        };
        for listener in snapshot {
            listener(&event);
        }

        // No stream subscribers is fine.
        let _ = self.sender.send(event);
    }

    /// Register a callback for one event kind.
    pub fn on(
        &self,
        kind: EventKind,
        listener: impl Fn(&EndpointEvent) + Send + Sync + 'static,
    ) -> ListenerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .entry(kind)
            .or_default()
            .push((id, Arc::new(listener)));
        ListenerHandle { kind, id }
    }

    /// Detach the listener behind `handle`. Removing an already removed
    /// handle is a no-op.
    pub fn remove_listener(&self, handle: &ListenerHandle) {
        let mut listeners = self.listeners.lock();
        if let Some(list) = listeners.get_mut(&handle.kind) {
            list.retain(|(id, _)| *id != handle.id);
        }
    }

    /// Subscribe to the async event stream.
    pub fn subscribe(&self) -> EventStream {
        BroadcastStream::new(self.sender.subscribe())
    }

    /// Number of active stream subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new(256)
    }
}
