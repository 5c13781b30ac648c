//! Menu navigation over static menus and the command tree.
//!
//! Menus are const-initializable trees of [`Menu`] and [`MenuItem`] values owned by
//! the host. A [`MenuNavigator`] walks them one character at a time:
//!
//! - **Browsing**: arrow keys move the selection (wrapping), Enter/Right/space or a
//!   digit executes, Left/`q`/ESC goes back one level (leaving menu mode at the root).
//! - **CollectingArgument**: an argument line is typed for an item that needs input.
//! - **AwaitingAck**: any key returns to the redrawn menu.
//!
//! Items referring to commands with children open menus synthesized from the
//! command tree. The navigator never executes anything itself: it returns a
//! [`MenuOutcome`] and the shell performs it.

use crate::auth::Privilege;
use crate::config::{MAX_INPUT, MENU_MAX_ITEMS, MENU_STACK_CAPACITY, ShellConfig};
use crate::error::CliError;
use crate::io::CharIo;
use crate::response::Response;
use crate::shell::{InputDecoder, InputEvent};
use crate::tree::{Command, CommandFn, CommandId, CommandTree};
use core::marker::PhantomData;

pub mod pool;
pub mod render;

pub use pool::{SubmenuPool, SynthMenu};

/// Zero-argument menu function.
pub type MenuFn = fn() -> Result<Response, CliError>;

/// A titled list of items.
#[derive(Debug, Copy, Clone)]
pub struct Menu<'a> {
    /// Title shown in the header
    pub title: &'a str,

    /// Items in display order (only the first `MENU_MAX_ITEMS` are shown)
    pub items: &'a [MenuItem<'a>],
}

impl<'a> Menu<'a> {
    /// Create a menu.
    pub const fn new(title: &'a str, items: &'a [MenuItem<'a>]) -> Self {
        Self { title, items }
    }
}

/// What a menu item does when executed.
#[derive(Debug, Copy, Clone)]
pub enum MenuAction<'a> {
    /// Open another menu
    Submenu(&'a Menu<'a>),

    /// Type a line into the shell and submit it
    Shell(&'a str),

    /// Call a function without arguments
    Function(MenuFn),

    /// Collect an argument line, then call a function with it
    FunctionArgs {
        /// Called with argv[0] set to the item title
        function: CommandFn,
        /// Parameter description shown while collecting
        params: &'a str,
    },

    /// Execute a registered command, or open its children as a menu
    Command(&'a Command),

    /// Open a menu of all top-level commands
    Commands,

    /// Return to the previous menu
    Back,

    /// Leave menu mode
    Exit,
}

/// Menu entry.
#[derive(Debug, Copy, Clone)]
pub struct MenuItem<'a> {
    /// Display title
    pub title: &'a str,

    /// Action performed on execution
    pub action: MenuAction<'a>,

    /// Requires admin privileges
    pub admin: bool,
}

impl<'a> MenuItem<'a> {
    /// Create an item with an explicit action.
    pub const fn new(title: &'a str, action: MenuAction<'a>) -> Self {
        Self {
            title,
            action,
            admin: false,
        }
    }

    /// Item opening `menu`.
    pub const fn submenu(title: &'a str, menu: &'a Menu<'a>) -> Self {
        Self::new(title, MenuAction::Submenu(menu))
    }

    /// Item typing `line` into the shell.
    pub const fn shell(title: &'a str, line: &'a str) -> Self {
        Self::new(title, MenuAction::Shell(line))
    }

    /// Item calling `function`.
    pub const fn function(title: &'a str, function: MenuFn) -> Self {
        Self::new(title, MenuAction::Function(function))
    }

    /// Item collecting arguments for `function`.
    pub const fn function_with_args(title: &'a str, function: CommandFn, params: &'a str) -> Self {
        Self::new(title, MenuAction::FunctionArgs { function, params })
    }

    /// Item executing a registered command.
    pub const fn command(title: &'a str, command: &'a Command) -> Self {
        Self::new(title, MenuAction::Command(command))
    }

    /// Item listing all top-level commands.
    pub const fn commands(title: &'a str) -> Self {
        Self::new(title, MenuAction::Commands)
    }

    /// Back item.
    pub const fn back(title: &'a str) -> Self {
        Self::new(title, MenuAction::Back)
    }

    /// Exit item.
    pub const fn exit(title: &'a str) -> Self {
        Self::new(title, MenuAction::Exit)
    }

    /// Require admin privileges.
    pub const fn admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// Check whether the item, or the command it runs, requires admin privileges.
    pub fn requires_admin(&self, tree: &CommandTree<'_>) -> bool {
        match self.action {
            MenuAction::Command(command) => self.admin || tree.find(command).is_some_and(|id| tree.is_admin(id)),
            _ => self.admin,
        }
    }
}

/// Navigator mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuState {
    /// Moving the selection
    Browsing,

    /// Typing an argument line
    CollectingArgument,

    /// Waiting for any key before redrawing the menu
    AwaitingAck,
}

/// Work the shell performs on behalf of the navigator.
#[derive(Debug, Clone)]
pub enum MenuOutcome<'a> {
    /// Input consumed, nothing to do
    Handled,

    /// Leave menu mode
    Exit,

    /// Feed the line to the line editor and submit it
    RunShellLine(&'a str),

    /// Call a menu function
    CallFunction(MenuFn),

    /// Execute a command with an argument line
    RunCommand {
        /// Command to execute
        id: CommandId,
        /// Unparsed argument text
        args: heapless::String<MAX_INPUT>,
    },

    /// Call a function with a collected argument line
    RunWithArguments {
        /// Item title, passed as argv[0]
        title: &'a str,
        /// Function to call
        function: CommandFn,
        /// Unparsed argument text
        line: heapless::String<MAX_INPUT>,
    },
}

#[derive(Debug, Copy, Clone)]
enum MenuRef<'a> {
    Static(&'a Menu<'a>),
    Synthesized(usize),
}

#[derive(Debug, Copy, Clone)]
struct Frame<'a> {
    menu: MenuRef<'a>,
    index: usize,
    scroll: usize,
}

#[derive(Debug, Copy, Clone)]
enum PendingTarget {
    Command(CommandId),
    Function(CommandFn),
}

#[derive(Debug, Clone)]
struct PendingArgument<'a> {
    title: &'a str,
    target: PendingTarget,
    line: heapless::String<MAX_INPUT>,
}

/// Keep `index` visible in a window of `visible` rows starting at `offset`.
///
/// The window moves by the smallest amount that brings the selection into view.
///
/// ```rust
/// use sprig_shell::menu::clamp_scroll;
///
/// assert_eq!(clamp_scroll(6, 0, 5), 2);
/// assert_eq!(clamp_scroll(1, 3, 5), 1);
/// assert_eq!(clamp_scroll(4, 2, 5), 2);
/// ```
pub fn clamp_scroll(index: usize, offset: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if index < offset {
        index
    } else if index >= offset + visible {
        index + 1 - visible
    } else {
        offset
    }
}

/// Menu mode state machine.
pub struct MenuNavigator<'a, C: ShellConfig> {
    root: &'a Menu<'a>,
    current: MenuRef<'a>,
    index: usize,
    scroll: usize,
    stack: heapless::Vec<Frame<'a>, MENU_STACK_CAPACITY>,
    pool: SubmenuPool<'a>,
    state: MenuState,
    pending: Option<PendingArgument<'a>>,
    decoder: InputDecoder,
    after_cr: bool,
    active: bool,
    _config: PhantomData<C>,
}

impl<C: ShellConfig> core::fmt::Debug for MenuNavigator<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuNavigator")
            .field("title", &self.title())
            .field("index", &self.index)
            .field("scroll", &self.scroll)
            .field("depth", &self.depth())
            .field("state", &self.state)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl<'a, C: ShellConfig> MenuNavigator<'a, C> {
    /// Create an inactive navigator rooted at `root`.
    pub fn new(root: &'a Menu<'a>) -> Self {
        Self {
            root,
            current: MenuRef::Static(root),
            index: 0,
            scroll: 0,
            stack: heapless::Vec::new(),
            pool: SubmenuPool::new(),
            state: MenuState::Browsing,
            pending: None,
            decoder: InputDecoder::new(),
            after_cr: false,
            active: false,
            _config: PhantomData,
        }
    }

    /// Check whether menu mode is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current mode.
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Index of the selected item.
    pub fn selected_index(&self) -> usize {
        self.index
    }

    /// First visible item.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Nesting depth, 1 at the root menu.
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    /// Title of the current menu.
    pub fn title(&self) -> &str {
        match self.current {
            MenuRef::Static(menu) => menu.title,
            MenuRef::Synthesized(slot) => self.pool.get(slot).map_or("", |menu| menu.title.as_str()),
        }
    }

    /// Items of the current menu.
    pub fn items(&self) -> &[MenuItem<'a>] {
        match self.current {
            MenuRef::Static(menu) => &menu.items[..menu.items.len().min(MENU_MAX_ITEMS)],
            MenuRef::Synthesized(slot) => self.pool.get(slot).map(|menu| menu.items.as_slice()).unwrap_or(&[]),
        }
    }

    /// Enter menu mode at the root menu and draw it.
    pub fn enter<IO: CharIo>(&mut self, io: &mut IO, tree: &CommandTree<'a>) -> Result<(), IO::Error> {
        if self.active {
            return Ok(());
        }
        self.reset();
        self.active = true;
        log::debug!("entering menu mode");
        self.render(io, tree)
    }

    /// Leave menu mode.
    pub fn exit(&mut self) {
        if self.active {
            log::debug!("leaving menu mode");
        }
        self.reset();
        self.active = false;
    }

    /// Ask for a key press before the menu is redrawn.
    pub fn await_ack<IO: CharIo>(&mut self, io: &mut IO) -> Result<(), IO::Error> {
        self.state = MenuState::AwaitingAck;
        io.write_str("\r\nPress any key to return to menu...")
    }

    /// Process one input character.
    pub fn process_char<IO: CharIo>(
        &mut self,
        c: char,
        io: &mut IO,
        tree: &CommandTree<'a>,
        privilege: Privilege,
    ) -> Result<MenuOutcome<'a>, IO::Error> {
        if !self.active {
            return Ok(MenuOutcome::Handled);
        }

        // Only CR selects; the LF of a CRLF pair never counts as a key
        let after_cr = core::mem::replace(&mut self.after_cr, c == '\r');
        if c == '\n' && (after_cr || self.state == MenuState::Browsing) {
            return Ok(MenuOutcome::Handled);
        }

        match self.state {
            MenuState::AwaitingAck => {
                self.state = MenuState::Browsing;
                self.decoder.reset();
                self.render(io, tree)?;
                Ok(MenuOutcome::Handled)
            }
            MenuState::CollectingArgument => self.collect(c, io),
            MenuState::Browsing => {
                let event = self.decoder.decode_char(c);
                self.browse(event, io, tree, privilege)
            }
        }
    }

    fn reset(&mut self) {
        self.current = MenuRef::Static(self.root);
        self.index = 0;
        self.scroll = 0;
        self.stack.clear();
        self.state = MenuState::Browsing;
        self.pending = None;
        self.decoder.reset();
        self.after_cr = false;
    }

    fn browse<IO: CharIo>(
        &mut self,
        event: InputEvent,
        io: &mut IO,
        tree: &CommandTree<'a>,
        privilege: Privilege,
    ) -> Result<MenuOutcome<'a>, IO::Error> {
        let count = self.items().len();

        match event {
            InputEvent::UpArrow if count > 0 => {
                self.index = self.index.checked_sub(1).unwrap_or(count - 1);
                self.render(io, tree)?;
                Ok(MenuOutcome::Handled)
            }
            InputEvent::DownArrow if count > 0 => {
                self.index = (self.index + 1) % count;
                self.render(io, tree)?;
                Ok(MenuOutcome::Handled)
            }
            InputEvent::RightArrow | InputEvent::Enter | InputEvent::Char(' ') => self.execute(io, tree, privilege),
            InputEvent::LeftArrow | InputEvent::DoubleEsc | InputEvent::UnknownEscape | InputEvent::Char('q') => {
                self.back(io, tree)
            }
            InputEvent::EscapedChar(c) => match self.back(io, tree)? {
                MenuOutcome::Handled => self.process_char(c, io, tree, privilege),
                outcome => Ok(outcome),
            },
            InputEvent::Char(c) => match c.to_digit(10).map(|digit| digit as usize) {
                Some(index) if index < count => {
                    self.index = index;
                    self.execute(io, tree, privilege)
                }
                _ => Ok(MenuOutcome::Handled),
            },
            _ => Ok(MenuOutcome::Handled),
        }
    }

    fn execute<IO: CharIo>(
        &mut self,
        io: &mut IO,
        tree: &CommandTree<'a>,
        privilege: Privilege,
    ) -> Result<MenuOutcome<'a>, IO::Error> {
        let Some(item) = self.items().get(self.index).copied() else {
            return Ok(MenuOutcome::Handled);
        };

        let target = match item.action {
            MenuAction::Command(command) => match tree.find(command) {
                Some(id) => Some(id),
                None => {
                    log::warn!("menu item '{}' refers to an unregistered command", item.title);
                    return self.notice(io, "Command not registered!");
                }
            },
            _ => None,
        };

        if !privilege.permits(item.requires_admin(tree)) {
            log::debug!("menu item '{}' refused: admin required", item.title);
            return self.notice(io, "Admin rights required for this item!");
        }

        match (item.action, target) {
            (MenuAction::Back, _) => self.back(io, tree),
            (MenuAction::Exit, _) => Ok(MenuOutcome::Exit),
            (MenuAction::Submenu(menu), _) => self.push(MenuRef::Static(menu), io, tree),
            (MenuAction::Commands, _) => match self.pool.commands(tree) {
                Some(slot) => self.push(MenuRef::Synthesized(slot), io, tree),
                None => self.notice(io, "Too many command menus!"),
            },
            (MenuAction::Command(_), Some(id)) => self.open_command(id, io, tree),
            (MenuAction::Command(_), None) => Ok(MenuOutcome::Handled),
            (MenuAction::Shell(line), _) => Ok(MenuOutcome::RunShellLine(line)),
            (MenuAction::Function(function), _) => Ok(MenuOutcome::CallFunction(function)),
            (MenuAction::FunctionArgs { function, params }, _) => {
                self.start_collecting(item.title, params, PendingTarget::Function(function), io)
            }
        }
    }

    /// Open a command's children as a menu, or run it.
    fn open_command<IO: CharIo>(
        &mut self,
        id: CommandId,
        io: &mut IO,
        tree: &CommandTree<'a>,
    ) -> Result<MenuOutcome<'a>, IO::Error> {
        if tree.has_children(id) {
            return match self.pool.children_of(tree, id) {
                Some(slot) => self.push(MenuRef::Synthesized(slot), io, tree),
                None => self.notice(io, "Too many command menus!"),
            };
        }

        let command = tree.command(id);
        if command.handler.is_none() {
            return Ok(MenuOutcome::Handled);
        }
        if command.expects_args() {
            let params = command.usage.unwrap_or("");
            return self.start_collecting(command.name, params, PendingTarget::Command(id), io);
        }
        Ok(MenuOutcome::RunCommand {
            id,
            args: heapless::String::new(),
        })
    }

    fn push<IO: CharIo>(
        &mut self,
        menu: MenuRef<'a>,
        io: &mut IO,
        tree: &CommandTree<'a>,
    ) -> Result<MenuOutcome<'a>, IO::Error> {
        let limit = C::MENU_MAX_DEPTH.min(MENU_STACK_CAPACITY + 1);
        let frame = Frame {
            menu: self.current,
            index: self.index,
            scroll: self.scroll,
        };
        if self.depth() >= limit || self.stack.push(frame).is_err() {
            log::warn!("menu depth limit {} reached", limit);
            return Ok(MenuOutcome::Handled);
        }

        self.current = menu;
        self.index = 0;
        self.scroll = 0;
        log::debug!("menu '{}' opened at depth {}", self.title(), self.depth());
        self.render(io, tree)?;
        Ok(MenuOutcome::Handled)
    }

    fn back<IO: CharIo>(&mut self, io: &mut IO, tree: &CommandTree<'a>) -> Result<MenuOutcome<'a>, IO::Error> {
        let Some(frame) = self.stack.pop() else {
            return Ok(MenuOutcome::Exit);
        };
        self.current = frame.menu;
        self.index = frame.index;
        self.scroll = frame.scroll;
        self.render(io, tree)?;
        Ok(MenuOutcome::Handled)
    }

    fn start_collecting<IO: CharIo>(
        &mut self,
        title: &'a str,
        params: &str,
        target: PendingTarget,
        io: &mut IO,
    ) -> Result<MenuOutcome<'a>, IO::Error> {
        self.pending = Some(PendingArgument {
            title,
            target,
            line: heapless::String::new(),
        });
        self.state = MenuState::CollectingArgument;
        render::argument_prompt::<IO, C>(io, title, params)?;
        Ok(MenuOutcome::Handled)
    }

    fn collect<IO: CharIo>(&mut self, c: char, io: &mut IO) -> Result<MenuOutcome<'a>, IO::Error> {
        if c == '\r' || c == '\n' {
            io.write_str("\r\n")?;
            self.state = MenuState::Browsing;
            let Some(pending) = self.pending.take() else {
                return Ok(MenuOutcome::Handled);
            };
            return Ok(match pending.target {
                PendingTarget::Command(id) => MenuOutcome::RunCommand { id, args: pending.line },
                PendingTarget::Function(function) => MenuOutcome::RunWithArguments {
                    title: pending.title,
                    function,
                    line: pending.line,
                },
            });
        }

        let Some(pending) = self.pending.as_mut() else {
            self.state = MenuState::Browsing;
            return Ok(MenuOutcome::Handled);
        };
        match c {
            '\x08' | '\x7f' => {
                if pending.line.pop().is_some() {
                    io.write_str("\x08 \x08")?;
                }
            }
            ' '..='~' => {
                if pending.line.push(c).is_ok() {
                    io.put_char(c)?;
                }
            }
            _ => {}
        }
        Ok(MenuOutcome::Handled)
    }

    fn notice<IO: CharIo>(&mut self, io: &mut IO, message: &str) -> Result<MenuOutcome<'a>, IO::Error> {
        self.state = MenuState::AwaitingAck;
        render::notice(io, message)?;
        Ok(MenuOutcome::Handled)
    }

    fn render<IO: CharIo>(&mut self, io: &mut IO, tree: &CommandTree<'a>) -> Result<(), IO::Error> {
        self.scroll = clamp_scroll(self.index, self.scroll, C::MENU_DISPLAY_ITEMS);
        render::menu::<IO, C>(io, tree, self.title(), self.items(), self.index, self.scroll)
    }
}
