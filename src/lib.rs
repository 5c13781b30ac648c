//! # sprig-shell
//!
//! Command-tree shell and menu navigator for embedded systems with zero heap
//! allocation.
//!
//! **Key features:**
//! - **Static allocation** - Command descriptors and menus are const-initialized
//! - **Hierarchical commands** - Abbreviated names, nested dispatch contexts
//! - **Menu mode** - Arrow-key navigation over static menus and the command tree
//! - **Flexible I/O** - Platform-agnostic character I/O trait
//! - **Admin privilege** - Commands and menu items can require an admin secret
//!
//! ## Optional Features
//!
//! - `authentication` - Salted SHA-256 secret verification
//! - `completion` - Tab completion for command names
//! - `history` - Line history with CTRL-P/CTRL-N and arrow navigation
//! - `secretgen` - Host tool generating salted secret constants
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::result_large_err)]

extern crate heapless;

// Optional dependencies (feature-gated)
#[cfg(feature = "authentication")]
extern crate sha2;

#[cfg(feature = "authentication")]
extern crate subtle;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod io;

// Privilege levels and secret verification
pub mod auth;

pub mod error;
pub mod util;

// Command descriptors, matching and completion
pub mod tree;

pub mod response;

// Line editor and dispatch
pub mod shell;

// Menu navigation
pub mod menu;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::CharIo;

// Configuration
pub use config::{DefaultConfig, MinimalConfig, ShellConfig};

// Error types
pub use error::CliError;

// Tree types
pub use tree::{Command, CommandFn, CommandId, CommandTree, NO_ARGS};

// Privilege (always available, even without authentication feature)
pub use auth::{PlainSecret, Privilege, SecretVerifier};

// Response types
pub use response::Response;

// Shell types
pub use shell::{HistoryDirection, Invocation, Shell};

// Menu types
pub use menu::{Menu, MenuAction, MenuFn, MenuItem, MenuNavigator};

// Optional feature re-exports (authentication-only types)
#[cfg(feature = "authentication")]
pub use auth::{HashedSecret, PasswordHasher, Sha256Hasher};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
