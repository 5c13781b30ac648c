//! Completion of partially typed command lines.
//!
//! Uses stub function pattern - module always exists, `complete` returns an empty
//! result when the `completion` feature is disabled.
//!
//! Completion walks the line like the dispatcher does, then works on the last
//! unresolved token: it extends the token to the longest prefix shared by all
//! candidates, or lists the candidates when nothing more can be added. Candidates
//! are matched by prefix regardless of the partial-match policy.

#![cfg_attr(not(feature = "completion"), allow(unused_variables))]

use super::{CommandId, CommandTree};
use crate::config::{MAX_CANDIDATES, MAX_INPUT};

#[cfg(feature = "completion")]
use super::matching::parse_level;

/// Completion result, applied by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    /// Text to append to the line, character by character
    pub insert: heapless::String<MAX_INPUT>,

    /// Candidate names to list (empty unless the token cannot be extended)
    pub candidates: heapless::Vec<&'static str, MAX_CANDIDATES>,

    /// Usage text of the completed leaf command
    pub usage: Option<&'static str>,
}

impl Completion {
    /// Create empty completion result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether the line must be redrawn after applying the result.
    pub fn needs_redraw(&self) -> bool {
        !self.candidates.is_empty() || self.usage.is_some()
    }

    /// Check whether the result changes nothing.
    pub fn is_empty(&self) -> bool {
        self.insert.is_empty() && !self.needs_redraw()
    }
}

// ============================================================================
// Feature-enabled implementation
// ============================================================================

/// Complete `line` against the chain starting at `start`.
///
/// Every token but the last must resolve under the `partial` policy. The last
/// token is always matched by prefix.
///
/// - A fully typed name gets a trailing space; a leaf then reports its usage,
///   a command with children continues with its child chain.
/// - A single candidate is completed and followed by a space, unless it is a leaf
///   with usage text, in which case the usage is reported instead of the space.
/// - Several candidates extend the token by their common prefix, or are listed
///   when the token already equals that prefix.
#[cfg(feature = "completion")]
pub fn complete(tree: &CommandTree<'_>, start: Option<CommandId>, line: &str, partial: bool) -> Completion {
    let mut out = Completion::empty();
    let mut chain = start;
    let mut rest = line;
    let mut spaced = line.is_empty() || line.ends_with(' ');

    loop {
        let trimmed = rest.trim_start_matches(' ');
        let token = trimmed.split(' ').next().unwrap_or("");

        // Tokens before the last one resolve exactly as the dispatcher resolves them
        if !trimmed[token.len()..].trim_start_matches(' ').is_empty() {
            let (level, remaining) = parse_level(tree, chain, rest, partial);
            let Some(id) = level.matched() else {
                return out;
            };
            match tree.first_child(id) {
                Some(child) => {
                    chain = Some(child);
                    rest = remaining;
                    continue;
                }
                None => return out,
            }
        }

        if !token.is_empty()
            && let Some(id) = tree.siblings(chain).find(|&id| tree.name(id) == token)
        {
            if !spaced {
                let _ = out.insert.push(' ');
                spaced = true;
            }
            match tree.first_child(id) {
                None => {
                    out.usage = tree.command(id).usage;
                    return out;
                }
                Some(child) => {
                    chain = Some(child);
                    rest = "";
                    continue;
                }
            }
        }

        let mut matches = tree.siblings(chain).filter(|&id| tree.name(id).starts_with(token));
        let Some(first_id) = matches.next() else {
            return out;
        };
        let first = tree.name(first_id);
        let mut common = first.len();
        let mut count = 1;
        for id in matches {
            common = common.min(common_prefix_len(first, tree.name(id)));
            count += 1;
        }

        if common == token.len() {
            for id in tree.siblings(chain).filter(|&id| tree.name(id).starts_with(token)) {
                if out.candidates.push(tree.name(id)).is_err() {
                    break;
                }
            }
            return out;
        }

        let _ = out.insert.push_str(&first[token.len()..common]);
        if count == 1 {
            let command = tree.command(first_id);
            if command.usage.is_some() && !tree.has_children(first_id) {
                out.usage = command.usage;
            } else {
                let _ = out.insert.push(' ');
            }
        }
        return out;
    }
}

/// Length in bytes of the common prefix of `a` and `b`, on a char boundary.
#[cfg(feature = "completion")]
fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(len) {
        len -= 1;
    }
    len
}

// ============================================================================
// Feature-disabled stub implementation
// ============================================================================

/// Stub implementation when completion feature is disabled.
///
/// Always returns an empty result.
#[cfg(not(feature = "completion"))]
pub fn complete(tree: &CommandTree<'_>, start: Option<CommandId>, line: &str, partial: bool) -> Completion {
    Completion::empty()
}

// ============================================================================
// Tests
// ============================================================================
