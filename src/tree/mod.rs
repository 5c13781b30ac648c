//! Command tree data structures.
//!
//! Commands are described by const-initializable [`Command`] values owned by the
//! host (usually `static`s). A [`CommandTree`] links them into a forest: an arena of
//! entries addressed by [`CommandId`], with parent, next-sibling and first-child
//! relations stored as indices. Registration appends to the end of a sibling chain,
//! so listing order is insertion order.

use crate::config::MAX_COMMANDS;
use crate::error::CliError;
use crate::response::Response;
use crate::shell::Invocation;

// Sub-modules
pub mod completion;
pub mod matching;

pub use completion::{Completion, complete};
pub use matching::{HelpTopic, LevelMatch, Resolution, TokenMatch, help_topic, match_prefix, parse_level, resolve};

/// Usage text marking a command that takes no input.
///
/// The menu runs such commands immediately instead of collecting an argument line.
pub const NO_ARGS: &str = "[no-arg]";

/// Command handler.
///
/// `argv[0]` is the canonical command name, followed by at most
/// `ShellConfig::MAX_ARGS - 1` arguments.
pub type CommandFn = fn(&mut Invocation<'_>) -> Result<Response, CliError>;

/// Command descriptor (const-initializable).
///
/// ```rust
/// use sprig_shell::tree::{Command, NO_ARGS};
/// use sprig_shell::shell::Invocation;
/// use sprig_shell::{CliError, Response};
///
/// fn uptime(_inv: &mut Invocation<'_>) -> Result<Response, CliError> {
///     Ok(Response::success("up 3 days"))
/// }
///
/// static UPTIME: Command = Command::new("uptime")
///     .help("show time since boot")
///     .usage(NO_ARGS)
///     .handler(uptime);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Command {
    /// Command name (non-empty, unique among siblings, no spaces)
    pub name: &'static str,

    /// One-line description shown by help listings
    pub help: Option<&'static str>,

    /// Usage text shown for leaf commands
    pub usage: Option<&'static str>,

    /// Function invoked when the command is executed
    pub handler: Option<CommandFn>,

    /// Opaque value passed to the handler
    pub arg: usize,

    /// Requires admin privileges (initial value of the tree entry's flag)
    pub admin: bool,
}

impl Command {
    /// Create a command with only a name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            help: None,
            usage: None,
            handler: None,
            arg: 0,
            admin: false,
        }
    }

    /// Set help text.
    pub const fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Set usage text.
    pub const fn usage(mut self, usage: &'static str) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Set handler function.
    pub const fn handler(mut self, handler: CommandFn) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Set opaque handler argument.
    pub const fn arg(mut self, arg: usize) -> Self {
        self.arg = arg;
        self
    }

    /// Require admin privileges.
    pub const fn admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// Check whether the command wants an argument line.
    ///
    /// True when usage text is present and is not [`NO_ARGS`].
    pub fn expects_args(&self) -> bool {
        self.usage.is_some_and(|usage| usage != NO_ARGS)
    }
}

/// Stable handle of a registered command.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CommandId(u16);

impl CommandId {
    /// Arena index of this command.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry<'a> {
    command: &'a Command,
    admin: bool,
    parent: Option<CommandId>,
    next: Option<CommandId>,
    child: Option<CommandId>,
}

/// Arena of registered commands.
///
/// Registration must be completed before input is processed; afterwards the tree
/// is read-only except for [`set_admin`](Self::set_admin).
#[derive(Debug, Default)]
pub struct CommandTree<'a> {
    entries: heapless::Vec<Entry<'a>, MAX_COMMANDS>,
    root: Option<CommandId>,
}

impl<'a> CommandTree<'a> {
    /// Create an empty tree.
    pub const fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
            root: None,
        }
    }

    /// Register `command` under `parent` (or at root level).
    ///
    /// The command is appended to the end of its sibling chain. Registering the
    /// same descriptor again returns its existing id and changes nothing.
    ///
    /// # Errors
    ///
    /// - `InvalidCommand` for an empty name or an unknown parent
    /// - `DuplicateCommand` if a sibling already uses the name
    /// - `BufferFull` if the arena is full
    pub fn add(&mut self, command: &'a Command, parent: Option<CommandId>) -> Result<CommandId, CliError> {
        if let Some(existing) = self.find(command) {
            return Ok(existing);
        }
        if command.name.is_empty() {
            return Err(CliError::InvalidCommand);
        }
        if let Some(p) = parent
            && p.index() >= self.entries.len()
        {
            return Err(CliError::InvalidCommand);
        }

        let head = match parent {
            Some(p) => self.entries[p.index()].child,
            None => self.root,
        };
        if self.siblings(head).any(|id| self.name(id) == command.name) {
            return Err(CliError::DuplicateCommand);
        }
        let tail = self.siblings(head).last();

        let id = CommandId(u16::try_from(self.entries.len()).map_err(|_| CliError::BufferFull)?);
        self.entries
            .push(Entry {
                command,
                admin: command.admin,
                parent,
                next: None,
                child: None,
            })
            .map_err(|_| CliError::BufferFull)?;

        match (tail, parent) {
            (Some(tail), _) => self.entries[tail.index()].next = Some(id),
            (None, Some(p)) => self.entries[p.index()].child = Some(id),
            (None, None) => self.root = Some(id),
        }

        Ok(id)
    }

    /// First command of the root sibling chain.
    pub fn root(&self) -> Option<CommandId> {
        self.root
    }

    /// Descriptor of a registered command.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn command(&self, id: CommandId) -> &'a Command {
        self.entries[id.index()].command
    }

    /// Name of a registered command.
    pub fn name(&self, id: CommandId) -> &'static str {
        self.command(id).name
    }

    /// Parent of a command (`None` at root level).
    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        self.entries[id.index()].parent
    }

    /// Next sibling in insertion order.
    pub fn next_sibling(&self, id: CommandId) -> Option<CommandId> {
        self.entries[id.index()].next
    }

    /// Head of the child chain (`None` for a leaf).
    pub fn first_child(&self, id: CommandId) -> Option<CommandId> {
        self.entries[id.index()].child
    }

    /// Check whether a command has children.
    pub fn has_children(&self, id: CommandId) -> bool {
        self.first_child(id).is_some()
    }

    /// Check whether a command currently requires admin privileges.
    pub fn is_admin(&self, id: CommandId) -> bool {
        self.entries[id.index()].admin
    }

    /// Change a command's admin requirement at runtime.
    pub fn set_admin(&mut self, id: CommandId, admin: bool) {
        if let Some(entry) = self.entries.get_mut(id.index()) {
            entry.admin = admin;
        }
    }

    /// Iterate a sibling chain starting at `first`.
    pub fn siblings(&self, first: Option<CommandId>) -> Siblings<'_, 'a> {
        Siblings {
            tree: self,
            cursor: first,
        }
    }

    /// Iterate the children of `id`.
    pub fn children(&self, id: CommandId) -> Siblings<'_, 'a> {
        self.siblings(self.first_child(id))
    }

    /// Find the id of a registered descriptor (identity, not name).
    pub fn find(&self, command: &Command) -> Option<CommandId> {
        self.entries
            .iter()
            .position(|entry| core::ptr::eq(entry.command, command))
            .and_then(|index| u16::try_from(index).ok())
            .map(CommandId)
    }

    /// Resolve a space-separated path of exact names, e.g. `"system reboot"`.
    pub fn lookup(&self, path: &str) -> Option<CommandId> {
        let mut chain = self.root;
        let mut found = None;
        for name in path.split(' ').filter(|s| !s.is_empty()) {
            let id = self.siblings(chain).find(|&id| self.name(id) == name)?;
            found = Some(id);
            chain = self.first_child(id);
        }
        found
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator over a sibling chain.
#[derive(Debug, Clone)]
pub struct Siblings<'t, 'a> {
    tree: &'t CommandTree<'a>,
    cursor: Option<CommandId>,
}

impl Iterator for Siblings<'_, '_> {
    type Item = CommandId;

    fn next(&mut self) -> Option<CommandId> {
        let id = self.cursor?;
        self.cursor = self.tree.next_sibling(id);
        Some(id)
    }
}
