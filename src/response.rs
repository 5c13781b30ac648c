//! Response types for command execution.
//!
//! `Response` represents successful execution with message and formatting flags.

use crate::config::MAX_RESPONSE;
use crate::util::push_bounded;
use core::fmt;

/// Command execution response with message and formatting flags.
/// Command failures return `Err(CliError::CommandFailed(msg))`, not `Response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response message (truncated to `MAX_RESPONSE`)
    pub message: heapless::String<MAX_RESPONSE>,

    /// Add newline before message (in response formatter)
    pub prefix_newline: bool,

    /// Indent output (2 spaces)
    pub indent_message: bool,

    /// Add newline after message
    pub postfix_newline: bool,

    /// Prevent input from being saved to history
    pub exclude_from_history: bool,
}

impl Response {
    /// Create success response with default formatting.
    ///
    /// Default: include in history, add postfix newline.
    pub fn success(message: &str) -> Self {
        let mut msg = heapless::String::new();
        push_bounded(&mut msg, message);

        Self {
            message: msg,
            prefix_newline: false,
            indent_message: false,
            postfix_newline: true,
            exclude_from_history: false,
        }
    }

    /// Create success response from format arguments.
    ///
    /// Output that does not fit is truncated.
    pub fn formatted(args: fmt::Arguments<'_>) -> Self {
        let mut response = Self::success("");
        let _ = fmt::Write::write_fmt(&mut response.message, args);
        response
    }

    /// Response that prints nothing.
    pub fn empty() -> Self {
        Self::success("").without_postfix_newline()
    }

    /// Builder method to exclude command from history (chainable).
    ///
    /// Use for commands handling sensitive data (secrets).
    pub fn without_history(mut self) -> Self {
        self.exclude_from_history = true;
        self
    }

    /// Builder method to add blank line before response.
    pub fn with_prefix_newline(mut self) -> Self {
        self.prefix_newline = true;
        self
    }

    /// Builder method to indent response (2 spaces per line).
    pub fn indented(mut self) -> Self {
        self.indent_message = true;
        self
    }

    /// Builder method to suppress newline after response.
    pub fn without_postfix_newline(mut self) -> Self {
        self.postfix_newline = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::String;

    #[test]
    fn test_success_response() {
        let response = Response::success("OK");
        assert_eq!(response.message.as_str(), "OK");
        assert!(!response.prefix_newline);
        assert!(!response.indent_message);
        assert!(response.postfix_newline);
        assert!(!response.exclude_from_history);
    }

    #[test]
    fn test_response_long_message_truncated() {
        let long_msg: String = core::iter::repeat_n('A', 300).collect();
        let response = Response::success(&long_msg);
        assert_eq!(response.message.len(), MAX_RESPONSE);
    }

    #[test]
    fn test_formatted_response() {
        let response = Response::formatted(format_args!("temp={} C", 21));
        assert_eq!(response.message.as_str(), "temp=21 C");
    }

    #[test]
    fn test_empty_response() {
        let response = Response::empty();
        assert!(response.message.is_empty());
        assert!(!response.postfix_newline);
    }

    #[test]
    fn test_builder_chaining() {
        let response = Response::success("OK")
            .with_prefix_newline()
            .indented()
            .without_postfix_newline()
            .without_history();

        assert_eq!(response.message.as_str(), "OK");
        assert!(response.prefix_newline);
        assert!(response.indent_message);
        assert!(!response.postfix_newline);
        assert!(response.exclude_from_history);
    }
}
