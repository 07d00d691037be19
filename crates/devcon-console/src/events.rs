//! Console notifications and their subscribers.
//!
//! Delivery is synchronous and on the caller's thread: `emit` runs every
//! listener in subscription order before returning.

use std::fmt;
use std::rc::Rc;

use crate::descriptor::CommandDescriptor;
use crate::target::CommandTarget;

/// Something that happened inside the console core.
#[derive(Clone)]
pub enum ConsoleEvent {
    /// A descriptor was committed to the registry.
    CommandAdded {
        name: String,
        target: Rc<dyn CommandTarget>,
        method: String,
    },
    /// Removal of `name` was requested, whether or not it was registered.
    CommandRemoved { name: String },
    /// A resolved command was invoked.
    CommandExecuted(CommandDescriptor),
    /// A parsed command name had no registry entry.
    CommandNotFound { name: String },
}

impl ConsoleEvent {
    /// Name of the command the event concerns.
    pub fn command_name(&self) -> &str {
        match self {
            Self::CommandAdded { name, .. }
            | Self::CommandRemoved { name }
            | Self::CommandNotFound { name } => name,
            Self::CommandExecuted(descriptor) => descriptor.name(),
        }
    }
}

impl fmt::Debug for ConsoleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandAdded {
                name,
                target,
                method,
            } => f
                .debug_struct("CommandAdded")
                .field("name", name)
                .field("target", &target.target_name())
                .field("method", method)
                .finish(),
            Self::CommandRemoved { name } => {
                f.debug_struct("CommandRemoved").field("name", name).finish()
            },
            Self::CommandExecuted(descriptor) => {
                f.debug_tuple("CommandExecuted").field(&descriptor.name()).finish()
            },
            Self::CommandNotFound { name } => {
                f.debug_struct("CommandNotFound").field("name", name).finish()
            },
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ConsoleEvent)>;

/// Ordered list of event listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ConsoleEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &ConsoleEvent) {
        log::trace!("event {event:?}");
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
