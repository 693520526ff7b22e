//! Static command tables.

use core::fmt;

/// A single entry of a [`CommandTable`].
pub struct Command<H> {
    /// CMIF command id.
    pub id: u32,
    /// Name used in logs.
    pub name: &'static str,
    /// The handler invoked for `id`.
    pub handler: H,
}

impl<H> Command<H> {
    /// Creates a table entry.
    pub const fn new(id: u32, name: &'static str, handler: H) -> Self {
        Self { id, name, handler }
    }
}

impl<H> fmt::Debug for Command<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// Immutable mapping from command id to handler for one service interface.
///
/// Tables are `static`s built once; entries must be sorted by strictly increasing id,
/// which is checked when the table is constructed (at compile time for `static`s).
pub struct CommandTable<H: 'static> {
    service: &'static str,
    commands: &'static [Command<H>],
}

impl<H: 'static> CommandTable<H> {
    /// Creates a table for `service`.
    ///
    /// # Panics
    ///
    /// Panics if the ids in `commands` are not strictly increasing.
    pub const fn new(service: &'static str, commands: &'static [Command<H>]) -> Self {
        let mut i = 1;
        while i < commands.len() {
            assert!(
                commands[i - 1].id < commands[i].id,
                "command ids must be strictly increasing"
            );
            i += 1;
        }

        Self { service, commands }
    }

    /// Returns the service interface name.
    #[inline]
    pub const fn service(&self) -> &'static str {
        self.service
    }

    /// Looks up the entry for `id`.
    pub fn get(&self, id: u32) -> Option<&'static Command<H>> {
        self.commands
            .binary_search_by_key(&id, |command| command.id)
            .ok()
            .map(|index| &self.commands[index])
    }

    /// Looks up the entry for `id`, failing with [`DispatchError::UnknownCommand`].
    pub fn lookup(&self, id: u32) -> Result<&'static Command<H>, DispatchError> {
        self.get(id).ok_or(DispatchError::UnknownCommand {
            service: self.service,
            command: id,
        })
    }

    /// Returns every entry in id order.
    #[inline]
    pub fn commands(&self) -> &'static [Command<H>] {
        self.commands
    }
}

impl<H: 'static> fmt::Debug for CommandTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("service", &self.service)
            .field("commands", &self.commands)
            .finish()
    }
}

/// Error raised when a request cannot be routed to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The service has no handler for the command id.
    #[error("{service}: unknown command {command}")]
    UnknownCommand {
        /// Service interface name.
        service: &'static str,
        /// The unresolved command id.
        command: u32,
    },
}

impl DispatchError {
    /// Returns the generic IPC failure the transport reports to the guest.
    pub fn result_code(&self) -> nx_hle_rc::ResultCode {
        nx_hle_rc::codes::SF_UNKNOWN_COMMAND_ID
    }
}
