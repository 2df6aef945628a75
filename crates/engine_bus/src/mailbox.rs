//! The [`Mailbox`]: listener registration and synchronous dispatch.
//!
//! A `Mailbox` is a handle onto a shared listener table; cloning it is
//! cheap and every clone sees the same listeners. Listeners may capture a
//! clone to dispatch further messages or (un)register listeners while a
//! dispatch is running.
//!
//! ## Reentrancy
//!
//! [`Mailbox::dispatch`] snapshots the listener list for the message's tag
//! before invoking anything and releases the table while listeners run.
//! Consequently:
//!
//! - a listener may dispatch any message, including one of its own tag;
//! - listeners added during a dispatch first run on the next dispatch;
//! - listeners removed during a dispatch still run for the in-progress one.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::message::Message;

/// Identifies a registered listener, for [`Mailbox::unlisten`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

type Handler = Rc<dyn Fn(&dyn Message)>;

#[derive(Default)]
struct Listeners {
    by_tag: HashMap<String, Vec<(ListenerId, Handler)>>,
}

/// Process-wide (per world) publish/subscribe channel keyed by message type
/// tag.
///
/// The mailbox is single-threaded; all registration and dispatch happen on
/// the update thread.
#[derive(Clone, Default)]
pub struct Mailbox {
    listeners: Rc<RefCell<Listeners>>,
    next_id: Rc<Cell<u64>>,
}

impl std::fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.borrow();
        let mut tags: Vec<_> = listeners
            .by_tag
            .iter()
            .map(|(tag, handlers)| (tag.as_str(), handlers.len()))
            .collect();
        tags.sort_unstable();
        f.debug_struct("Mailbox").field("listeners", &tags).finish()
    }
}

impl Mailbox {
    /// Create a mailbox with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for messages whose type tag is `tag`.
    ///
    /// Handlers sharing a tag run in registration order.
    pub fn listen<F>(&self, tag: impl Into<String>, handler: F) -> ListenerId
    where
        F: Fn(&dyn Message) + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let tag = tag.into();
        trace!(tag = %tag, listener = id.0, "listener registered");
        self.listeners
            .borrow_mut()
            .by_tag
            .entry(tag)
            .or_default()
            .push((id, Rc::new(handler)));
        id
    }

    /// Register a handler that only receives messages of concrete type `M`.
    ///
    /// Messages carrying `tag` but of another type are ignored by this
    /// handler.
    pub fn listen_to<M, F>(&self, tag: impl Into<String>, handler: F) -> ListenerId
    where
        M: Message,
        F: Fn(&M) + 'static,
    {
        self.listen(tag, move |message: &dyn Message| {
            if let Some(message) = message.downcast_ref::<M>() {
                handler(message);
            }
        })
    }

    /// Remove a listener. Returns `true` if it was registered under `tag`.
    pub fn unlisten(&self, tag: &str, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(handlers) = listeners.by_tag.get_mut(tag) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(listener, _)| *listener != id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            listeners.by_tag.remove(tag);
        }
        removed
    }

    /// Invoke every listener registered for the message's type tag.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch<M: Message>(&self, message: M) -> usize {
        self.dispatch_ref(&message)
    }

    /// Like [`Mailbox::dispatch`], for a message that is already borrowed or
    /// type-erased.
    pub fn dispatch_ref(&self, message: &dyn Message) -> usize {
        let tag = message.type_name();
        let snapshot: Vec<Handler> = match self.listeners.borrow().by_tag.get(tag) {
            Some(handlers) => handlers.iter().map(|(_, handler)| Rc::clone(handler)).collect(),
            None => Vec::new(),
        };

        if snapshot.is_empty() {
            trace!(tag, "dispatch without listeners");
            return 0;
        }

        for handler in &snapshot {
            handler(message);
        }
        snapshot.len()
    }

    /// Returns the number of listeners registered for `tag`.
    #[must_use]
    pub fn listener_count(&self, tag: &str) -> usize {
        self.listeners
            .borrow()
            .by_tag
            .get(tag)
            .map_or(0, Vec::len)
    }

    /// Remove every listener.
    pub fn clear(&self) {
        self.listeners.borrow_mut().by_tag.clear();
    }
}
