//! The command registry: name -> descriptor, plus change notifications.

use std::collections::HashMap;
use std::rc::Rc;

use devcon_types::error::{DevconError, Result};

use crate::descriptor::{CommandBuilder, CommandDescriptor};
use crate::events::{ConsoleEvent, EventBus, SubscriptionId};
use crate::target::CommandTarget;

/// Registry of available commands.
///
/// Names are unique. Registering a taken name is rejected with
/// `DuplicateCommand` rather than shadowing the existing command.
/// Mutation needs `&mut self`, so the borrow checker provides the
/// exclusive access concurrent hosts would otherwise need a lock for.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
    events: EventBus,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start defining a command. Nothing changes until `register()`.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        target: Rc<dyn CommandTarget>,
        method: impl Into<String>,
    ) -> CommandBuilder<'_> {
        CommandBuilder::new(self, name.into(), target, method.into())
    }

    /// Insert a validated descriptor and announce it.
    pub fn commit(&mut self, descriptor: CommandDescriptor) -> Result<()> {
        let name = descriptor.name().to_string();
        if self.commands.contains_key(&name) {
            log::warn!("rejected duplicate command `{name}`");
            return Err(DevconError::DuplicateCommand(name));
        }
        log::debug!(
            "registered command `{name}` -> {}.{}",
            descriptor.target().target_name(),
            descriptor.method()
        );
        let event = ConsoleEvent::CommandAdded {
            name: name.clone(),
            target: Rc::clone(descriptor.target()),
            method: descriptor.method().to_string(),
        };
        self.commands.insert(name, descriptor);
        self.events.emit(&event);
        Ok(())
    }

    /// Remove a command, returning how many entries were dropped (0 or 1).
    ///
    /// `CommandRemoved` is emitted before the lookup, so it fires even when
    /// `name` was never registered.
    pub fn remove(&mut self, name: &str) -> usize {
        self.events.emit(&ConsoleEvent::CommandRemoved {
            name: name.to_string(),
        });
        match self.commands.remove(name) {
            Some(_) => {
                log::debug!("removed command `{name}`");
                1
            },
            None => 0,
        }
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All descriptors whose name starts with `prefix`, sorted by name.
    ///
    /// An empty prefix matches every command.
    pub fn find(&self, prefix: &str) -> Vec<&CommandDescriptor> {
        let mut found: Vec<&CommandDescriptor> = self
            .commands
            .values()
            .filter(|d| d.name().starts_with(prefix))
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        found
    }

    /// Every descriptor, sorted by name.
    pub fn list(&self) -> Vec<&CommandDescriptor> {
        self.find("")
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // -- Notifications --

    pub fn subscribe(&mut self, listener: impl FnMut(&ConsoleEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn emit(&mut self, event: &ConsoleEvent) {
        self.events.emit(event);
    }
}
