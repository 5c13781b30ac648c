//! Test fixtures and utilities for sprig-shell testing.
//!
//! Provides:
//! - `MockIo`: Test implementation of CharIo trait
//! - `PlainConfig`: Colourless menu configuration for screen assertions
//! - Fixture commands, menus and `build_tree()`

#![allow(dead_code)]

use sprig_shell::config::ShellConfig;
use sprig_shell::shell::Invocation;
use sprig_shell::tree::{Command, CommandTree, NO_ARGS};
use sprig_shell::{CharIo, CliError, Menu, MenuItem, PlainSecret, Response};
use std::collections::VecDeque;

// ============================================================================
// MockIo - Test I/O Implementation
// ============================================================================

/// Mock I/O for testing.
///
/// Provides in-memory character I/O with input queue and output capture.
#[derive(Debug)]
pub struct MockIo {
    /// Input queue (simulates user typing)
    input: VecDeque<char>,

    /// Output capture (collects all output)
    output: String,
}

impl MockIo {
    /// Create new MockIo with empty buffers.
    pub fn new() -> Self {
        Self {
            input: VecDeque::new(),
            output: String::new(),
        }
    }

    /// Add input to queue (simulates user typing).
    pub fn push_input(&mut self, s: &str) {
        self.input.extend(s.chars());
    }

    /// Get captured output as string.
    pub fn output(&self) -> String {
        self.output.clone()
    }

    /// Clear output buffer.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Check if input queue is empty.
    pub fn input_empty(&self) -> bool {
        self.input.is_empty()
    }
}

impl Default for MockIo {
    fn default() -> Self {
        Self::new()
    }
}

impl CharIo for MockIo {
    type Error = ();

    fn get_char(&mut self) -> Result<Option<char>, Self::Error> {
        Ok(self.input.pop_front())
    }

    fn put_char(&mut self, c: char) -> Result<(), Self::Error> {
        self.output.push(c);
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.output.push_str(s);
        Ok(())
    }
}

// ============================================================================
// PlainConfig - Shell configuration without menu colours
// ============================================================================

/// Default behaviour, uncoloured menus showing four rows, three menu levels.
#[derive(Debug, Copy, Clone)]
pub struct PlainConfig;

impl ShellConfig for PlainConfig {
    const PROMPT: &'static str = "sprig> ";
    const ECHO: bool = true;
    const PARTIAL_MATCH: bool = true;
    const TOP_CHAR: char = '/';
    const HISTORY_DEPTH: usize = 4;
    const MAX_ARGS: usize = 8;
    const MENU_MAX_DEPTH: usize = 3;
    const MENU_DISPLAY_ITEMS: usize = 4;
    const MENU_COLORS: bool = false;
}

// ============================================================================
// Handlers
// ============================================================================

fn echo(inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    let mut response = Response::success("");
    for (i, arg) in inv.argv().iter().skip(1).enumerate() {
        if i > 0 {
            let _ = response.message.push(' ');
        }
        let _ = response.message.push_str(arg);
    }
    Ok(response)
}

fn status(_inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    Ok(Response::success("System OK"))
}

fn uptime(_inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    Ok(Response::success("up 42s"))
}

fn reboot(_inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    Ok(Response::success("Rebooting..."))
}

fn led(inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    Ok(Response::success(if inv.arg() == 1 { "LED on" } else { "LED off" }))
}

fn fail(_inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    let mut msg = heapless::String::new();
    let _ = msg.push_str("sensor offline");
    Err(CliError::CommandFailed(msg))
}

fn setkey(_inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    Ok(Response::success("Key stored").without_history())
}

fn set_name(inv: &mut Invocation<'_>) -> Result<Response, CliError> {
    Ok(Response::formatted(format_args!(
        "{}: name set to {}",
        inv.argv()[0],
        inv.get(1).unwrap_or("<none>")
    )))
}

fn version() -> Result<Response, CliError> {
    Ok(Response::success("sprig 1.0"))
}

// ============================================================================
// Commands
// ============================================================================

/// `echo <text>`: prints its arguments separated by single spaces
pub static CMD_ECHO: Command = Command::new("echo").help("echo arguments").usage("<text>").handler(echo);

/// `status`
pub static CMD_STATUS: Command = Command::new("status").help("show system status").usage(NO_ARGS).handler(status);

/// `system` (children: reboot, uptime)
pub static CMD_SYSTEM: Command = Command::new("system").help("system commands");

/// `system reboot` (admin)
pub static CMD_REBOOT: Command = Command::new("reboot")
    .help("restart the device")
    .usage(NO_ARGS)
    .handler(reboot)
    .admin();

/// `system uptime`
pub static CMD_UPTIME: Command = Command::new("uptime").help("time since boot").usage(NO_ARGS).handler(uptime);

/// `led` (children: on, off)
pub static CMD_LED: Command = Command::new("led").help("led control");

/// `led on`: shares the handler with `led off`, told apart by the opaque argument
pub static CMD_LED_ON: Command = Command::new("on").help("switch on").usage(NO_ARGS).handler(led).arg(1);

/// `led off`
pub static CMD_LED_OFF: Command = Command::new("off").help("switch off").usage(NO_ARGS).handler(led).arg(0);

/// `fail`: handler always reports an error
pub static CMD_FAIL: Command = Command::new("fail").help("always fails").handler(fail);

/// `setkey <key>`: excluded from history
pub static CMD_SETKEY: Command = Command::new("setkey").help("store api key").usage("<key>").handler(setkey);

/// `hidden`: no help text, never listed
pub static CMD_HIDDEN: Command = Command::new("hidden").handler(status);

/// Never registered; referenced by a menu item
pub static CMD_ORPHAN: Command = Command::new("orphan").handler(status);

/// Build the fixture tree.
///
/// Root chain: echo, status, system, led, fail, setkey, hidden.
pub fn build_tree() -> CommandTree<'static> {
    let mut tree = CommandTree::new();
    tree.add(&CMD_ECHO, None).unwrap();
    tree.add(&CMD_STATUS, None).unwrap();
    let system = tree.add(&CMD_SYSTEM, None).unwrap();
    tree.add(&CMD_REBOOT, Some(system)).unwrap();
    tree.add(&CMD_UPTIME, Some(system)).unwrap();
    let led = tree.add(&CMD_LED, None).unwrap();
    tree.add(&CMD_LED_ON, Some(led)).unwrap();
    tree.add(&CMD_LED_OFF, Some(led)).unwrap();
    tree.add(&CMD_FAIL, None).unwrap();
    tree.add(&CMD_SETKEY, None).unwrap();
    tree.add(&CMD_HIDDEN, None).unwrap();
    tree
}

/// Admin secret of the fixture shells.
pub static SECRET: PlainSecret = PlainSecret::new("admin123");

// ============================================================================
// Menus
// ============================================================================

/// Settings submenu
pub static SETTINGS_MENU: Menu<'static> = Menu::new(
    "Settings",
    &[
        MenuItem::function("Show Version", version),
        MenuItem::function_with_args("Set Name", set_name, "<name>"),
        MenuItem::shell("Echo Hello", "echo hello"),
        MenuItem::command("Orphan", &CMD_ORPHAN),
        MenuItem::back("Back"),
    ],
);

/// Root menu
pub static MAIN_MENU: Menu<'static> = Menu::new(
    "Main Menu",
    &[
        MenuItem::command("System Status", &CMD_STATUS),
        MenuItem::command("LED", &CMD_LED),
        MenuItem::submenu("Settings", &SETTINGS_MENU),
        MenuItem::command("Reboot", &CMD_REBOOT),
        MenuItem::commands("All Commands"),
        MenuItem::exit("Exit"),
    ],
);
