//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
pub mod fixtures;

use fixtures::{MAIN_MENU, MockIo, PlainConfig, SECRET, build_tree};
use sprig_shell::config::{DefaultConfig, ShellConfig};
use sprig_shell::Shell;

/// Shell type used by most integration tests.
pub type TestShell<C = DefaultConfig> = Shell<'static, MockIo, C>;

// ============================================================================
// Shell Creation Helpers
// ============================================================================

/// Create an active shell over the fixture tree with empty output.
pub fn create_shell<C: ShellConfig>() -> TestShell<C> {
    let mut shell = Shell::new(build_tree(), MockIo::new()).unwrap();
    shell.activate().unwrap();
    shell.io_mut().clear_output();
    shell
}

/// Create a shell with the default configuration.
pub fn create_test_shell() -> TestShell {
    create_shell::<DefaultConfig>()
}

/// Create a shell with `auth` registered.
pub fn create_auth_shell() -> TestShell {
    let mut shell = create_test_shell();
    shell.set_secret(&SECRET).unwrap();
    shell
}

/// Create a shell with `auth` and `menu` registered and uncoloured menus.
pub fn create_menu_shell() -> TestShell<PlainConfig> {
    let mut shell = create_shell::<PlainConfig>();
    shell.set_secret(&SECRET).unwrap();
    shell.attach_menu(&MAIN_MENU).unwrap();
    shell
}

// ============================================================================
// Input Helpers
// ============================================================================

/// Execute a command string and return the output.
pub fn execute_command<C: ShellConfig>(shell: &mut TestShell<C>, cmd: &str) -> String {
    shell.io_mut().clear_output();
    type_input(shell, cmd);
    shell.process_char('\n').unwrap();
    shell.io_mut().output()
}

/// Type input without executing (no trailing newline).
pub fn type_input<C: ShellConfig>(shell: &mut TestShell<C>, input: &str) {
    for c in input.chars() {
        shell.process_char(c).unwrap();
    }
}

/// Send keys and return only the output they produced.
pub fn press<C: ShellConfig>(shell: &mut TestShell<C>, keys: &str) -> String {
    shell.io_mut().clear_output();
    type_input(shell, keys);
    shell.io_mut().output()
}

/// Press Enter.
pub fn press_enter<C: ShellConfig>(shell: &mut TestShell<C>) {
    shell.process_char('\n').unwrap();
}

/// Press Backspace `n` times.
pub fn press_backspace_n<C: ShellConfig>(shell: &mut TestShell<C>, n: usize) {
    for _ in 0..n {
        shell.process_char('\x08').unwrap();
    }
}

// ============================================================================
// Key Sequences
// ============================================================================

/// VT100 up arrow
pub const UP: &str = "\x1b[A";

/// VT100 down arrow
pub const DOWN: &str = "\x1b[B";

/// VT100 right arrow
pub const RIGHT: &str = "\x1b[C";

/// VT100 left arrow
pub const LEFT: &str = "\x1b[D";

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that output contains all expected strings.
pub fn assert_contains_all(output: &str, expected: &[&str]) {
    for exp in expected {
        assert!(output.contains(exp), "Expected '{}' in output, got: {:?}", exp, output);
    }
}

/// Assert that output does NOT contain any of the strings.
pub fn assert_contains_none(output: &str, forbidden: &[&str]) {
    for forbid in forbidden {
        assert!(!output.contains(forbid), "Did not expect '{}' in output, got: {:?}", forbid, output);
    }
}
