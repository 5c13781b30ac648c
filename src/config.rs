//! Configuration traits and implementations.
//!
//! The `ShellConfig` trait carries the behaviour knobs of a shell instance as
//! associated consts. Fixed storage is sized by the crate-level capacity constants
//! below; every runtime knob is clamped to the storage that backs it.

/// Maximum input line length in bytes.
pub const MAX_INPUT: usize = 256;

/// Maximum prompt length in bytes.
pub const MAX_PROMPT: usize = 32;

/// Maximum response message length in bytes.
pub const MAX_RESPONSE: usize = 256;

/// Storage for argv entries (argv[0] included).
pub const ARGS_CAPACITY: usize = 16;

/// Storage for remembered history lines.
pub const HISTORY_CAPACITY: usize = 8;

/// Command tree arena capacity.
pub const MAX_COMMANDS: usize = 64;

/// Maximum candidates listed by a single completion.
pub const MAX_CANDIDATES: usize = 16;

/// Maximum items shown by a menu (static menus are truncated to this).
pub const MENU_MAX_ITEMS: usize = 16;

/// Storage for menu navigation frames (ancestors of the current menu).
pub const MENU_STACK_CAPACITY: usize = 8;

/// Number of synthesized submenus the navigator can hold.
pub const MAX_SYNTH_MENUS: usize = 8;

/// Shell configuration trait.
///
/// All values are const (zero runtime cost).
pub trait ShellConfig {
    /// Initial prompt text (truncated to [`MAX_PROMPT`])
    const PROMPT: &'static str;

    /// Echo typed characters and redraw the prompt after each line
    const ECHO: bool;

    /// Accept unambiguous abbreviations of command names
    const PARTIAL_MATCH: bool;

    /// Key that returns the shell to the top of the command tree
    const TOP_CHAR: char;

    /// Number of remembered history lines (clamped to [`HISTORY_CAPACITY`])
    const HISTORY_DEPTH: usize;

    /// Maximum argv entries including argv[0] (clamped to [`ARGS_CAPACITY`])
    const MAX_ARGS: usize;

    /// Maximum menu nesting including the root menu
    const MENU_MAX_DEPTH: usize;

    /// Number of menu items visible at once
    const MENU_DISPLAY_ITEMS: usize;

    /// Render menus with ANSI colours
    const MENU_COLORS: bool;
}

/// Default configuration for typical embedded systems.
///
/// - PROMPT: `"sprig> "`
/// - PARTIAL_MATCH: enabled
/// - HISTORY_DEPTH: 4 lines
/// - MAX_ARGS: 8
/// - MENU_MAX_DEPTH: 5, MENU_DISPLAY_ITEMS: 5
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ShellConfig for DefaultConfig {
    const PROMPT: &'static str = "sprig> ";
    const ECHO: bool = true;
    const PARTIAL_MATCH: bool = true;
    const TOP_CHAR: char = '/';
    const HISTORY_DEPTH: usize = 4;
    const MAX_ARGS: usize = 8;
    const MENU_MAX_DEPTH: usize = 5;
    const MENU_DISPLAY_ITEMS: usize = 5;
    const MENU_COLORS: bool = true;
}

/// Minimal configuration for resource-constrained systems.
///
/// Exact command names only, two history lines, no menu colours.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MinimalConfig;

impl ShellConfig for MinimalConfig {
    const PROMPT: &'static str = "> ";
    const ECHO: bool = true;
    const PARTIAL_MATCH: bool = false;
    const TOP_CHAR: char = '/';
    const HISTORY_DEPTH: usize = 2;
    const MAX_ARGS: usize = 4;
    const MENU_MAX_DEPTH: usize = 3;
    const MENU_DISPLAY_ITEMS: usize = 4;
    const MENU_COLORS: bool = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(DefaultConfig::PROMPT, "sprig> ");
        assert!(DefaultConfig::PARTIAL_MATCH);
        assert_eq!(DefaultConfig::TOP_CHAR, '/');
        assert_eq!(DefaultConfig::HISTORY_DEPTH, 4);
        assert_eq!(DefaultConfig::MAX_ARGS, 8);
        assert_eq!(DefaultConfig::MENU_MAX_DEPTH, 5);
    }

    #[test]
    fn test_minimal_config() {
        assert!(!MinimalConfig::PARTIAL_MATCH);
        assert_eq!(MinimalConfig::HISTORY_DEPTH, 2);
        assert!(!MinimalConfig::MENU_COLORS);
    }

    #[test]
    fn test_knobs_fit_storage() {
        assert!(DefaultConfig::HISTORY_DEPTH <= HISTORY_CAPACITY);
        assert!(DefaultConfig::MAX_ARGS <= ARGS_CAPACITY);
        assert!(DefaultConfig::MENU_MAX_DEPTH <= MENU_STACK_CAPACITY + 1);
        assert!(DefaultConfig::PROMPT.len() <= MAX_PROMPT);
    }
}
