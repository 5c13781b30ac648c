//! Token matching and multi-level command resolution.
//!
//! Everything here is a pure function over a [`CommandTree`]: the shell decides how
//! to render or execute the results.
//!
//! A line is resolved one token per tree level. At each level the token is compared
//! against every sibling with [`match_prefix`]; an exact name wins outright, otherwise
//! a single abbreviation is accepted (when the partial-match policy allows it) and
//! several abbreviations are ambiguous.

use super::{CommandId, CommandTree};

/// Result of comparing one input token against one command name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenMatch {
    /// Token equals the name
    Full,

    /// Token is a proper prefix of the name
    Partial,

    /// Token differs from the name
    None,
}

/// Compare the first token of `input` with `name`.
///
/// The token ends at the first space or at the end of `input`. A proper prefix of
/// the name is [`TokenMatch::Partial`] only when `partial` is true.
pub fn match_prefix(name: &str, input: &str, partial: bool) -> TokenMatch {
    let name = name.as_bytes();
    let input = input.as_bytes();

    let mut i = 0;
    while i < name.len() && i < input.len() && name[i] == input[i] {
        i += 1;
    }

    let at_terminator = i == input.len() || input[i] == b' ';
    if !at_terminator {
        TokenMatch::None
    } else if i == name.len() {
        TokenMatch::Full
    } else if partial {
        TokenMatch::Partial
    } else {
        TokenMatch::None
    }
}

/// Result of matching one token against one sibling chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LevelMatch {
    /// No token left on the line
    EndOfInput,

    /// Token equals a sibling's name
    Full(CommandId),

    /// Token abbreviates exactly one sibling
    Unique(CommandId),

    /// Token abbreviates several siblings
    Ambiguous,

    /// Token matches no sibling
    Unmatched,
}

impl LevelMatch {
    /// Matched command, for both exact and abbreviated matches.
    pub fn matched(self) -> Option<CommandId> {
        match self {
            LevelMatch::Full(id) | LevelMatch::Unique(id) => Some(id),
            _ => None,
        }
    }
}

/// Match the next token of `input` against the chain starting at `first`.
///
/// Returns the match and the rest of the line: past the token and its trailing
/// spaces on a match, or the unconsumed remainder (leading spaces skipped)
/// otherwise.
pub fn parse_level<'i>(
    tree: &CommandTree<'_>,
    first: Option<CommandId>,
    input: &'i str,
    partial: bool,
) -> (LevelMatch, &'i str) {
    let input = input.trim_start_matches(' ');
    if input.is_empty() {
        return (LevelMatch::EndOfInput, input);
    }

    let mut candidate = None;
    let mut ambiguous = false;
    for id in tree.siblings(first) {
        match match_prefix(tree.name(id), input, partial) {
            TokenMatch::Full => return (LevelMatch::Full(id), skip_token(input)),
            TokenMatch::Partial => match candidate {
                None => candidate = Some(id),
                Some(seen) if seen != id => ambiguous = true,
                Some(_) => {}
            },
            TokenMatch::None => {}
        }
    }

    match candidate {
        _ if ambiguous => (LevelMatch::Ambiguous, input),
        Some(id) => (LevelMatch::Unique(id), skip_token(input)),
        None => (LevelMatch::Unmatched, input),
    }
}

/// Skip the first token and the spaces after it.
fn skip_token(input: &str) -> &str {
    let end = input.find(' ').unwrap_or(input.len());
    input[end..].trim_start_matches(' ')
}

/// Outcome of resolving a submitted line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resolution<'i> {
    /// Line held no token
    Nothing,

    /// Execute a leaf command with the remaining argument text
    Execute {
        /// Command to execute
        id: CommandId,
        /// Unparsed argument text
        args: &'i str,
    },

    /// A command with children was named without further input
    Context(CommandId),

    /// A token abbreviates several commands
    Ambiguous {
        /// Line remainder starting at the offending token
        rest: &'i str,
    },

    /// A token matches no command
    Unmatched {
        /// Line remainder starting at the offending token
        rest: &'i str,
    },
}

/// Resolve a submitted line starting at the chain `start`.
///
/// Descends while matched commands have children and input remains.
pub fn resolve<'i>(tree: &CommandTree<'_>, start: Option<CommandId>, line: &'i str, partial: bool) -> Resolution<'i> {
    let mut chain = start;
    let mut rest = line;

    loop {
        let (level, remaining) = parse_level(tree, chain, rest, partial);
        match level {
            LevelMatch::Full(id) | LevelMatch::Unique(id) => match tree.first_child(id) {
                None => return Resolution::Execute { id, args: remaining },
                Some(_) if remaining.is_empty() => return Resolution::Context(id),
                Some(child) => {
                    chain = Some(child);
                    rest = remaining;
                }
            },
            LevelMatch::Ambiguous => return Resolution::Ambiguous { rest: remaining },
            LevelMatch::Unmatched => return Resolution::Unmatched { rest: remaining },
            LevelMatch::EndOfInput => return Resolution::Nothing,
        }
    }
}

/// What the help key should describe for a partially typed line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HelpTopic<'i> {
    /// Nothing typed: list the starting chain
    Overview,

    /// A command with children: list the chain starting at this child
    Children(CommandId),

    /// A leaf command: show its usage and help text
    Command(CommandId),

    /// A token abbreviates several commands
    Ambiguous {
        /// Line remainder starting at the offending token
        rest: &'i str,
    },

    /// A token matches no command
    Unmatched {
        /// Line remainder starting at the offending token
        rest: &'i str,
    },
}

/// Resolve the help topic for `line` starting at the chain `start`.
///
/// A leaf is described even when argument text follows it.
pub fn help_topic<'i>(tree: &CommandTree<'_>, start: Option<CommandId>, line: &'i str, partial: bool) -> HelpTopic<'i> {
    let mut chain = start;
    let mut rest = line;

    loop {
        let (level, remaining) = parse_level(tree, chain, rest, partial);
        match level {
            LevelMatch::Full(id) | LevelMatch::Unique(id) => match tree.first_child(id) {
                None => return HelpTopic::Command(id),
                Some(child) if remaining.is_empty() => return HelpTopic::Children(child),
                Some(child) => {
                    chain = Some(child);
                    rest = remaining;
                }
            },
            LevelMatch::Ambiguous => return HelpTopic::Ambiguous { rest: remaining },
            LevelMatch::Unmatched => return HelpTopic::Unmatched { rest: remaining },
            LevelMatch::EndOfInput => return HelpTopic::Overview,
        }
    }
}
