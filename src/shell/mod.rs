//! Shell orchestration and command processing.
//!
//! The `Shell` struct owns every piece of per-session state: the command tree, the
//! live input line, the dispatch context, history, the escape decoder and the
//! optional menu navigator. Input arrives one character at a time through
//! [`Shell::process_char`]; while menu mode is active the navigator sees every
//! character, otherwise the line editor does.

use crate::auth::{Privilege, SecretVerifier};
use crate::config::{ARGS_CAPACITY, HISTORY_CAPACITY, MAX_INPUT, MAX_PROMPT, ShellConfig};
use crate::error::CliError;
use crate::io::CharIo;
use crate::menu::{Menu, MenuNavigator, MenuOutcome};
use crate::response::Response;
use crate::tree::{Command, CommandFn, CommandId, CommandTree, HelpTopic, Resolution, help_topic, resolve};
use crate::util::{push_bounded, tokenize};
use core::marker::PhantomData;

// Sub-modules
pub mod builtins;
pub mod decoder;
pub mod history;
pub mod session;

// Re-export key types
pub use decoder::{InputDecoder, InputEvent};
pub use history::CommandHistory;
pub use session::{Invocation, Session};

/// History navigation direction.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Up arrow / CTRL-P (navigate to older line)
    Previous = 0,

    /// Down arrow / CTRL-N (navigate to newer line or restore the live one)
    Next = 1,
}

/// Shell orchestration struct.
///
/// Generic over:
/// - `'a`: Lifetime of command descriptors, menus and the secret verifier
///   (typically `'static`)
/// - `IO`: CharIo implementation
/// - `C`: ShellConfig implementation
pub struct Shell<'a, IO, C>
where
    IO: CharIo,
    C: ShellConfig,
{
    /// Registered commands
    tree: CommandTree<'a>,

    /// Privilege level, active flag and pending menu request
    session: Session,

    /// Checks secrets submitted to `auth`
    verifier: Option<&'a dyn SecretVerifier>,

    /// Live input line
    input_buffer: heapless::String<MAX_INPUT>,

    /// Prompt text
    prompt: heapless::String<MAX_PROMPT>,

    /// Command whose children bare input is matched against
    context: Option<CommandId>,

    /// Lines that established the current context
    breadcrumb: heapless::String<MAX_INPUT>,

    /// Input decoder (escape sequence state machine)
    decoder: InputDecoder,

    /// Submitted lines
    history: CommandHistory<HISTORY_CAPACITY, MAX_INPUT>,

    /// Menu mode, when a root menu is attached
    menu: Option<MenuNavigator<'a, C>>,

    /// I/O interface
    io: IO,

    /// Config type marker (zero-size)
    _config: PhantomData<C>,
}

// ============================================================================
// Debug implementation
// ============================================================================

impl<IO, C> core::fmt::Debug for Shell<'_, IO, C>
where
    IO: CharIo,
    C: ShellConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shell")
            .field("session", &self.session)
            .field("input_buffer", &self.input_buffer.as_str())
            .field("prompt", &self.prompt.as_str())
            .field("breadcrumb", &self.breadcrumb.as_str())
            .field("commands", &self.tree.len())
            .field("verifier", &self.verifier.map(|_| "<dyn SecretVerifier>"))
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Construction and host API
// ============================================================================

impl<'a, IO, C> Shell<'a, IO, C>
where
    IO: CharIo,
    C: ShellConfig,
{
    /// Create a shell over `tree`, registering the `help` and `quit` built-ins.
    ///
    /// Starts inactive. Call [`activate()`](Self::activate) to print the prompt.
    ///
    /// # Errors
    ///
    /// Fails if the tree already holds a different `help` or `quit` command or has
    /// no room left for them.
    pub fn new(tree: CommandTree<'a>, io: IO) -> Result<Self, CliError> {
        let mut prompt = heapless::String::new();
        push_bounded(&mut prompt, C::PROMPT);

        let mut shell = Self {
            tree,
            session: Session::new(),
            verifier: None,
            input_buffer: heapless::String::new(),
            prompt,
            context: None,
            breadcrumb: heapless::String::new(),
            decoder: InputDecoder::new(),
            history: CommandHistory::with_depth(C::HISTORY_DEPTH),
            menu: None,
            io,
            _config: PhantomData,
        };
        shell.tree.add(&builtins::HELP, None)?;
        shell.tree.add(&builtins::QUIT, None)?;
        Ok(shell)
    }

    /// Attach the admin secret verifier and register the `auth` command.
    pub fn set_secret(&mut self, verifier: &'a dyn SecretVerifier) -> Result<(), CliError> {
        self.tree.add(&builtins::AUTH, None)?;
        self.verifier = Some(verifier);
        Ok(())
    }

    /// Attach the root menu and register the `menu` command.
    pub fn attach_menu(&mut self, root: &'a Menu<'a>) -> Result<(), CliError> {
        self.tree.add(&builtins::MENU, None)?;
        self.menu = Some(MenuNavigator::new(root));
        Ok(())
    }

    /// Register a command after construction.
    pub fn add_command(&mut self, command: &'a Command, parent: Option<CommandId>) -> Result<CommandId, CliError> {
        self.tree.add(command, parent)
    }

    /// Start accepting input and print the prompt.
    pub fn activate(&mut self) -> Result<(), IO::Error> {
        self.session.activate();
        log::debug!("shell activated");
        self.write_prompt()
    }

    /// Stop accepting input.
    ///
    /// Drops privileges, the live line, the dispatch context and menu mode. The
    /// shell ignores all input until [`activate()`](Self::activate) is called again.
    pub fn deactivate(&mut self) {
        self.session.quit();
        self.input_buffer.clear();
        self.reset_context();
        self.history.reset_position();
        self.decoder.reset();
        if let Some(menu) = self.menu.as_mut() {
            menu.exit();
        }
    }

    /// Process a single character of input.
    ///
    /// Main entry point for character-by-character processing. Returns Err only on
    /// I/O error.
    pub fn process_char(&mut self, c: char) -> Result<(), IO::Error> {
        if !self.session.is_active() {
            return Ok(());
        }
        if self.menu_hook(c)? {
            return Ok(());
        }
        self.editor_input(c)
    }

    /// Poll for incoming characters and process them.
    ///
    /// Convenience method for simple polling loops where the Shell actively reads
    /// from its I/O. Interrupt- or DMA-driven hosts should feed
    /// [`process_char()`](Self::process_char) themselves.
    pub fn poll(&mut self) -> Result<(), IO::Error> {
        if let Some(c) = self.io.get_char()? {
            self.process_char(c)?;
        }
        Ok(())
    }

    /// Offer `c` to the menu navigator.
    ///
    /// Returns `true` when menu mode is active and consumed the character.
    pub fn menu_hook(&mut self, c: char) -> Result<bool, IO::Error> {
        let privilege = self.session.privilege();
        let Some(menu) = self.menu.as_mut().filter(|menu| menu.is_active()) else {
            return Ok(false);
        };
        let outcome = menu.process_char(c, &mut self.io, &self.tree, privilege)?;
        self.apply_menu_outcome(outcome)?;
        Ok(true)
    }

    /// Enter menu mode (no-op without an attached menu).
    pub fn enter_menu(&mut self) -> Result<(), IO::Error> {
        match self.menu.as_mut() {
            Some(menu) => menu.enter(&mut self.io, &self.tree),
            None => Ok(()),
        }
    }

    /// Leave menu mode, reset the dispatch context and redraw the prompt.
    ///
    /// The pending input line is kept and redrawn, not submitted.
    pub fn exit_menu(&mut self) -> Result<(), IO::Error> {
        let Some(menu) = self.menu.as_mut().filter(|menu| menu.is_active()) else {
            return Ok(());
        };
        menu.exit();
        self.reset_context();
        self.io.write_str("\r\n")?;
        self.write_prompt()?;
        self.io.write_str(&self.input_buffer)
    }

    /// Replace the prompt (truncated to `MAX_PROMPT`) and redraw the line.
    pub fn set_prompt(&mut self, prompt: &str) -> Result<(), IO::Error> {
        self.prompt.clear();
        if !push_bounded(&mut self.prompt, prompt) {
            log::warn!("prompt truncated to {} bytes", MAX_PROMPT);
        }
        self.io.write_str("\r\n")?;
        self.write_prompt()?;
        self.io.write_str(&self.input_buffer)
    }

    /// Return to the top of the command tree.
    pub fn reset_context(&mut self) {
        self.context = None;
        self.breadcrumb.clear();
    }

    /// Current privilege level.
    pub fn privilege(&self) -> Privilege {
        self.session.privilege()
    }

    /// Check whether the shell accepts input.
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Check whether menu mode is active.
    pub fn in_menu(&self) -> bool {
        self.menu.as_ref().is_some_and(|menu| menu.is_active())
    }

    /// Command whose children bare input is matched against.
    pub fn context(&self) -> Option<CommandId> {
        self.context
    }

    /// Text shown in the prompt for the current context.
    pub fn breadcrumb(&self) -> &str {
        &self.breadcrumb
    }

    /// Live input line.
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Registered commands.
    pub fn tree(&self) -> &CommandTree<'a> {
        &self.tree
    }

    /// Mutable access to the registered commands (e.g. to change admin flags).
    pub fn tree_mut(&mut self) -> &mut CommandTree<'a> {
        &mut self.tree
    }

    /// I/O interface.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutable I/O interface.
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }
}

// ============================================================================
// Line editor
// ============================================================================

impl<'a, IO, C> Shell<'a, IO, C>
where
    IO: CharIo,
    C: ShellConfig,
{
    /// Feed one character to the line editor.
    fn editor_input(&mut self, c: char) -> Result<(), IO::Error> {
        match self.decoder.decode_char(c) {
            InputEvent::None | InputEvent::LeftArrow | InputEvent::RightArrow | InputEvent::UnknownEscape => Ok(()),

            InputEvent::Enter => self.handle_enter(),

            InputEvent::Backspace => {
                if self.input_buffer.pop().is_some() && C::ECHO {
                    self.io.write_str("\x08 \x08")?;
                }
                Ok(())
            }

            InputEvent::Tab => self.handle_tab(),

            InputEvent::UpArrow => self.handle_history(HistoryDirection::Previous),

            InputEvent::DownArrow => self.handle_history(HistoryDirection::Next),

            InputEvent::DoubleEsc => {
                self.input_buffer.clear();
                self.clear_line_and_redraw()
            }

            InputEvent::EndOfTransmission => {
                if C::ECHO {
                    self.io.write_str("\r\nQuit shell...\r\n")?;
                }
                log::debug!("end of transmission");
                self.deactivate();
                Ok(())
            }

            InputEvent::Char(ch) | InputEvent::EscapedChar(ch) => self.handle_char(ch),
        }
    }

    fn handle_char(&mut self, ch: char) -> Result<(), IO::Error> {
        if ch == C::TOP_CHAR {
            self.reset_context();
            return if C::ECHO { self.clear_line_and_redraw() } else { Ok(()) };
        }
        match ch {
            '?' => self.show_help(),
            '!' if cfg!(feature = "completion") => self.handle_tab(),
            _ => self.insert_char(ch),
        }
    }

    /// Append a character to the live line, ringing the bell when full.
    fn insert_char(&mut self, ch: char) -> Result<(), IO::Error> {
        match self.input_buffer.push(ch) {
            Ok(()) if C::ECHO => self.io.put_char(ch),
            Err(_) if C::ECHO => self.io.put_char('\x07'),
            _ => Ok(()),
        }
    }

    /// Handle Enter key (submit the line).
    fn handle_enter(&mut self) -> Result<(), IO::Error> {
        if C::ECHO {
            self.io.write_str("\r\n")?;
        }

        let line = core::mem::take(&mut self.input_buffer);
        let trimmed = line.trim_start_matches(' ');
        if !trimmed.is_empty() && self.execute_line(trimmed)? {
            self.history.add(trimmed);
        }
        self.history.reset_position();

        if C::ECHO && self.session.is_active() && !self.in_menu() {
            self.write_prompt()?;
        }
        Ok(())
    }

    /// Dispatch a submitted line.
    ///
    /// Returns whether the line belongs in history.
    fn execute_line(&mut self, line: &str) -> Result<bool, IO::Error> {
        match resolve(&self.tree, self.chain_start(), line, C::PARTIAL_MATCH) {
            Resolution::Nothing => Ok(false),
            Resolution::Execute { id, args } => self.invoke(id, args),
            Resolution::Context(id) => {
                self.enter_context(id, line);
                Ok(true)
            }
            Resolution::Ambiguous { rest } => {
                log::debug!("ambiguous input: {}", rest);
                write!(self.io, "{}: {}\r\n", CliError::Ambiguous, rest)?;
                Ok(true)
            }
            Resolution::Unmatched { rest } => {
                log::debug!("unmatched input: {}", rest);
                write!(self.io, "{}: {}\r\n", CliError::NoMatch, rest)?;
                Ok(true)
            }
        }
    }

    /// Make `id` the dispatch context, appending `line` to the breadcrumb.
    fn enter_context(&mut self, id: CommandId, line: &str) {
        if self.context.is_none() {
            self.breadcrumb.clear();
        } else {
            let _ = self.breadcrumb.push(' ');
        }
        if !push_bounded(&mut self.breadcrumb, line.trim_end_matches(' ')) {
            log::warn!("breadcrumb truncated to {} bytes", MAX_INPUT);
        }
        self.context = Some(id);
        log::debug!("context now '{}'", self.tree.name(id));
    }

    /// Head of the chain bare input is matched against.
    fn chain_start(&self) -> Option<CommandId> {
        match self.context {
            Some(id) => self.tree.first_child(id),
            None => self.tree.root(),
        }
    }

    /// Execute a leaf command with its unparsed argument text.
    fn invoke(&mut self, id: CommandId, args: &str) -> Result<bool, IO::Error> {
        if !self.session.privilege().permits(self.tree.is_admin(id)) {
            log::debug!("'{}' refused: admin required", self.tree.name(id));
            write!(self.io, "Error: {}\r\n", CliError::InsufficientPrivilege)?;
            self.io.write_str("Use 'auth <password>' to authenticate\r\n")?;
            return Ok(true);
        }

        let command = self.tree.command(id);
        let Some(handler) = command.handler else {
            return Ok(true);
        };

        let mut argv = [""; ARGS_CAPACITY];
        argv[0] = command.name;
        let argc = Self::fill_args(args, &mut argv);
        log::debug!("executing '{}' with {} arguments", command.name, argc - 1);
        self.call(handler, command.arg, &argv[..argc])
    }

    /// Tokenize `args` into `argv[1..]`, bounded by `MAX_ARGS`.
    ///
    /// Returns argc (argv[0] included).
    fn fill_args<'s>(args: &'s str, argv: &mut [&'s str]) -> usize {
        let limit = C::MAX_ARGS.clamp(1, argv.len());
        let tokens = tokenize(Some(args), ' ', Some(&mut argv[1..limit]));
        if tokens.truncated {
            log::warn!("argument list truncated to {} entries", limit);
        }
        tokens.count + 1
    }

    /// Run a handler and print its result.
    ///
    /// Returns whether the line belongs in history.
    fn call(&mut self, handler: CommandFn, arg: usize, argv: &[&str]) -> Result<bool, IO::Error> {
        let result = handler(&mut Invocation::new(argv, arg, &mut self.session, self.verifier));
        let record = !matches!(&result, Ok(response) if response.exclude_from_history);
        self.write_result(result)?;

        if !self.session.is_active() {
            self.deactivate();
            return Ok(record);
        }
        if self.session.take_menu_request() {
            self.enter_menu()?;
        }
        Ok(record)
    }

    fn write_result(&mut self, result: Result<Response, CliError>) -> Result<(), IO::Error> {
        match result {
            Ok(response) => self.write_formatted_response(&response),
            Err(err) => write!(self.io, "Error: {}\r\n", err),
        }
    }

    /// Write formatted response to I/O, applying all Response formatting flags.
    ///
    /// - `prefix_newline`: Adds blank line before message
    /// - `indent_message`: Indents all lines with 2 spaces
    /// - `postfix_newline`: Adds newline after message
    ///
    /// An empty message prints nothing at all.
    fn write_formatted_response(&mut self, response: &Response) -> Result<(), IO::Error> {
        if response.message.is_empty() {
            return Ok(());
        }

        if response.prefix_newline {
            self.io.write_str("\r\n")?;
        }

        if response.indent_message {
            for (i, line) in response.message.split("\r\n").enumerate() {
                if i > 0 {
                    self.io.write_str("\r\n")?;
                }
                self.io.write_str("  ")?;
                self.io.write_str(line)?;
            }
        } else {
            self.io.write_str(&response.message)?;
        }

        if response.postfix_newline {
            self.io.write_str("\r\n")?;
        }

        Ok(())
    }

    /// Handle Tab (or `!`) completion.
    fn handle_tab(&mut self) -> Result<(), IO::Error> {
        #[cfg(feature = "completion")]
        {
            let result = crate::tree::complete(&self.tree, self.chain_start(), &self.input_buffer, C::PARTIAL_MATCH);
            if result.is_empty() {
                return self.io.put_char('\x07');
            }

            for ch in result.insert.chars() {
                self.insert_char(ch)?;
            }

            if !result.candidates.is_empty() {
                self.io.write_str("\r\n")?;
                for name in &result.candidates {
                    write!(self.io, "{}\r\n", name)?;
                }
                self.redraw_line()?;
            } else if let Some(usage) = result.usage {
                write!(self.io, "\r\n{}\r\n", usage)?;
                self.redraw_line()?;
            }
            Ok(())
        }

        #[cfg(not(feature = "completion"))]
        {
            // Completion disabled - just beep
            self.io.put_char('\x07')
        }
    }

    /// Handle history navigation.
    ///
    /// Recall needs at least two history lines.
    fn handle_history(&mut self, direction: HistoryDirection) -> Result<(), IO::Error> {
        if C::HISTORY_DEPTH <= 1 {
            return Ok(());
        }
        let entry = match direction {
            HistoryDirection::Previous => self.history.previous(&self.input_buffer),
            HistoryDirection::Next => self.history.next(),
        };

        if let Some(entry) = entry {
            self.input_buffer = entry;
            self.clear_line_and_redraw()?;
        }
        Ok(())
    }

    /// Show help (`?` key) for the line typed so far.
    fn show_help(&mut self) -> Result<(), IO::Error> {
        let line = self.input_buffer.clone();
        let start = self.chain_start();

        match help_topic(&self.tree, start, &line, C::PARTIAL_MATCH) {
            HelpTopic::Overview => self.list_commands(start)?,
            HelpTopic::Children(first) => self.list_commands(Some(first))?,
            HelpTopic::Command(id) => {
                let command = self.tree.command(id);
                if !line.ends_with(' ') {
                    self.io.put_char(' ')?;
                }
                write!(
                    self.io,
                    "{}: {}\r\n",
                    command.usage.unwrap_or(""),
                    command.help.unwrap_or("no help available")
                )?;
            }
            HelpTopic::Ambiguous { rest } => write!(self.io, "\r\n{}: {}\r\n", CliError::Ambiguous, rest)?,
            HelpTopic::Unmatched { rest } => write!(self.io, "\r\n{}: {}\r\n", CliError::NoMatch, rest)?,
        }

        self.redraw_line()
    }

    /// List a sibling chain: aligned names, admin marker, help text.
    ///
    /// Commands without help text are not listed.
    fn list_commands(&mut self, first: Option<CommandId>) -> Result<(), IO::Error> {
        let width = self.tree.siblings(first).map(|id| self.tree.name(id).len()).max().unwrap_or(0);

        self.io.write_str("\r\n")?;
        for id in self.tree.siblings(first) {
            let command = self.tree.command(id);
            let Some(help) = command.help else {
                continue;
            };
            let marker = if self.tree.is_admin(id) { '*' } else { ' ' };
            write!(self.io, "{:<width$} {} {}\r\n", command.name, marker, help, width = width)?;
        }
        Ok(())
    }

    // ========================================
    // Menu outcomes
    // ========================================

    fn apply_menu_outcome(&mut self, outcome: MenuOutcome<'a>) -> Result<(), IO::Error> {
        match outcome {
            MenuOutcome::Handled => return Ok(()),
            MenuOutcome::Exit => return self.exit_menu(),
            MenuOutcome::RunShellLine(line) => {
                self.input_buffer.clear();
                self.io.write_str("\r\n")?;
                for c in line.chars() {
                    self.editor_input(c)?;
                }
                self.editor_input('\r')?;
            }
            MenuOutcome::CallFunction(function) => {
                self.io.write_str("\r\n")?;
                let result = function();
                self.write_result(result)?;
            }
            MenuOutcome::RunCommand { id, args } => {
                self.io.write_str("\r\n")?;
                self.invoke(id, &args)?;
            }
            MenuOutcome::RunWithArguments { title, function, line } => {
                let mut argv = [""; ARGS_CAPACITY];
                argv[0] = title;
                let argc = Self::fill_args(&line, &mut argv);
                self.call(function, 0, &argv[..argc])?;
            }
        }

        if !self.session.is_active() {
            self.deactivate();
            return Ok(());
        }
        match self.menu.as_mut() {
            Some(menu) if menu.is_active() => menu.await_ack(&mut self.io),
            _ => Ok(()),
        }
    }

    // ========================================
    // Prompt and redraw
    // ========================================

    /// Write the prompt, with the breadcrumb inside a context.
    fn write_prompt(&mut self) -> Result<(), IO::Error> {
        self.io.write_str(&self.prompt)?;
        if self.context.is_some() {
            self.io.write_str(&self.breadcrumb)?;
            self.io.write_str("> ")?;
        }
        Ok(())
    }

    /// Write prompt and the live line.
    fn redraw_line(&mut self) -> Result<(), IO::Error> {
        self.write_prompt()?;
        self.io.write_str(&self.input_buffer)
    }

    /// Clear current line and redraw with prompt and buffer.
    fn clear_line_and_redraw(&mut self) -> Result<(), IO::Error> {
        self.io.write_str("\r\x1b[K")?; // CR + clear to end of line
        self.redraw_line()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PlainSecret;
    use crate::config::{DefaultConfig, MinimalConfig};
    use crate::tree::NO_ARGS;
    extern crate std;
    use std::string::String;

    #[derive(Default)]
    struct MockIo {
        output: String,
    }

    impl MockIo {
        fn take(&mut self) -> String {
            core::mem::take(&mut self.output)
        }
    }

    impl CharIo for MockIo {
        type Error = ();

        fn get_char(&mut self) -> Result<Option<char>, ()> {
            Ok(None)
        }

        fn put_char(&mut self, c: char) -> Result<(), ()> {
            self.output.push(c);
            Ok(())
        }
    }

    fn echo(inv: &mut Invocation<'_>) -> Result<Response, CliError> {
        let mut response = Response::success("");
        for (i, arg) in inv.argv().iter().enumerate() {
            if i > 0 {
                let _ = response.message.push('|');
            }
            let _ = response.message.push_str(arg);
        }
        Ok(response)
    }

    static ECHO: Command = Command::new("echo").help("print arguments").handler(echo);
    static NET: Command = Command::new("net").help("network");
    static PING: Command = Command::new("ping").help("ping a host").usage("<host>").handler(echo);
    static WIPE: Command = Command::new("wipe").help("erase flash").usage(NO_ARGS).handler(echo).admin();

    fn shell<C: ShellConfig>() -> Shell<'static, MockIo, C> {
        let mut tree = CommandTree::new();
        tree.add(&ECHO, None).unwrap();
        let net = tree.add(&NET, None).unwrap();
        tree.add(&PING, Some(net)).unwrap();
        tree.add(&WIPE, None).unwrap();

        let mut shell = Shell::new(tree, MockIo::default()).unwrap();
        shell.activate().unwrap();
        shell.io_mut().take();
        shell
    }

    fn type_str<C: ShellConfig>(shell: &mut Shell<'static, MockIo, C>, input: &str) -> String {
        for c in input.chars() {
            shell.process_char(c).unwrap();
        }
        shell.io_mut().take()
    }

    #[test]
    fn test_history_direction() {
        assert_eq!(HistoryDirection::Previous as u8, 0);
        assert_eq!(HistoryDirection::Next as u8, 1);
    }

    #[test]
    fn test_activate_deactivate_lifecycle() {
        let mut shell = shell::<DefaultConfig>();
        assert!(shell.is_active());

        type_str(&mut shell, "net\rpi");
        assert!(shell.context().is_some());

        shell.deactivate();
        assert!(!shell.is_active());
        assert!(shell.context().is_none());
        assert!(shell.input_buffer().is_empty());
        assert_eq!(type_str(&mut shell, "echo\r"), "");
    }

    #[test]
    fn test_argv_uses_canonical_name() {
        let mut shell = shell::<DefaultConfig>();
        let out = type_str(&mut shell, "ec  a  b\r");
        assert_eq!(out, "ec  a  b\r\necho|a|b\r\nsprig> ");
    }

    #[test]
    fn test_argument_count_capped() {
        let mut shell = shell::<MinimalConfig>();
        let out = type_str(&mut shell, "echo 1 2 3 4 5\r");
        assert!(out.contains("echo|1|2|3\r\n"));
    }

    #[test]
    fn test_builtins_registered() {
        let shell = shell::<DefaultConfig>();
        assert!(shell.tree().lookup("help").is_some());
        assert!(shell.tree().lookup("quit").is_some());
        assert!(shell.tree().lookup("auth").is_none());
    }

    #[test]
    fn test_set_secret_registers_auth() {
        static SECRET: PlainSecret = PlainSecret::new("pw");
        let mut shell = shell::<DefaultConfig>();
        shell.set_secret(&SECRET).unwrap();

        type_str(&mut shell, "auth pw\r");
        assert_eq!(shell.privilege(), Privilege::Admin);
    }

    #[test]
    fn test_write_formatted_response_flags() {
        let mut shell = shell::<DefaultConfig>();

        let response = Response::success("A\r\nB").with_prefix_newline().indented();
        shell.write_formatted_response(&response).unwrap();
        assert_eq!(shell.io_mut().take(), "\r\n  A\r\n  B\r\n");

        let response = Response::success("Raw").without_postfix_newline();
        shell.write_formatted_response(&response).unwrap();
        assert_eq!(shell.io_mut().take(), "Raw");

        shell.write_formatted_response(&Response::success("")).unwrap();
        assert_eq!(shell.io_mut().take(), "");
    }

    #[test]
    fn test_set_prompt_truncates_and_redraws() {
        let mut shell = shell::<DefaultConfig>();
        type_str(&mut shell, "ec");
        shell.set_prompt("dev$ ").unwrap();
        assert_eq!(shell.io_mut().take(), "\r\ndev$ ec");

        shell.set_prompt(&"x".repeat(MAX_PROMPT + 10)).unwrap();
        assert_eq!(shell.prompt.len(), MAX_PROMPT);
    }

    #[test]
    fn test_top_char_clears_context() {
        let mut shell = shell::<DefaultConfig>();
        let out = type_str(&mut shell, "net\r");
        assert!(out.ends_with("sprig> net> "));
        assert_eq!(shell.breadcrumb(), "net");

        let out = type_str(&mut shell, "/");
        assert_eq!(out, "\r\x1b[Ksprig> ");
        assert!(shell.context().is_none());
    }
}
