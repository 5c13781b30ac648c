//! Input decoder for terminal character sequences.
//!
//! Provides state machine for interpreting ANSI escape sequences (arrow keys),
//! control keys (CTRL-P, CTRL-N, CTRL-D) and double-ESC.
//!
//! This is a pure decoder - it doesn't manage buffers or I/O. The line editor and
//! the menu navigator each own one and interpret the events differently.

/// Decoder state for escape sequence handling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputState {
    /// Normal input mode
    Normal,

    /// Saw first ESC character
    EscapeStart,

    /// Saw ESC [ (start of escape sequence)
    EscapeSequence,
}

/// Logical input event from terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// No event (accumulating sequence or ignored control character)
    None,

    /// Regular character typed
    Char(char),

    /// Backspace key (ASCII BS or DEL)
    Backspace,

    /// Enter key (line feed or carriage return)
    Enter,

    /// Tab key
    Tab,

    /// Up arrow key or CTRL-P
    UpArrow,

    /// Down arrow key or CTRL-N
    DownArrow,

    /// Right arrow key
    RightArrow,

    /// Left arrow key
    LeftArrow,

    /// Double ESC pressed
    DoubleEsc,

    /// ESC followed by a character that does not start a sequence
    EscapedChar(char),

    /// ESC [ followed by an unsupported final character
    UnknownEscape,

    /// CTRL-D
    EndOfTransmission,
}

/// Terminal input decoder with escape sequence handling.
#[derive(Debug)]
pub struct InputDecoder {
    /// Current decoder state
    state: InputState,
}

impl InputDecoder {
    /// Create new decoder in Normal state.
    pub const fn new() -> Self {
        Self {
            state: InputState::Normal,
        }
    }

    /// Decode single character into input event.
    ///
    /// ```rust,ignore
    /// // Up arrow (ESC [ A)
    /// decoder.decode_char('\x1b');
    /// decoder.decode_char('[');
    /// assert_eq!(decoder.decode_char('A'), InputEvent::UpArrow);
    ///
    /// // CTRL-P recalls history like the up arrow
    /// assert_eq!(decoder.decode_char('\x10'), InputEvent::UpArrow);
    /// ```
    pub fn decode_char(&mut self, c: char) -> InputEvent {
        match self.state {
            InputState::Normal => self.decode_normal(c),
            InputState::EscapeStart => self.decode_escape_start(c),
            InputState::EscapeSequence => self.decode_escape_sequence(c),
        }
    }

    /// Decode character in Normal state.
    fn decode_normal(&mut self, c: char) -> InputEvent {
        match c {
            '\x1b' => {
                self.state = InputState::EscapeStart;
                InputEvent::None
            }

            '\n' | '\r' => InputEvent::Enter,
            '\t' => InputEvent::Tab,
            '\x08' | '\x7f' => InputEvent::Backspace,
            '\x10' => InputEvent::UpArrow,
            '\x0e' => InputEvent::DownArrow,
            '\x04' => InputEvent::EndOfTransmission,

            // Remaining control characters are ignored
            c if c.is_control() => InputEvent::None,

            _ => InputEvent::Char(c),
        }
    }

    /// Decode character after seeing ESC.
    fn decode_escape_start(&mut self, c: char) -> InputEvent {
        match c {
            '\x1b' => {
                self.state = InputState::Normal;
                InputEvent::DoubleEsc
            }

            '[' => {
                self.state = InputState::EscapeSequence;
                InputEvent::None
            }

            _ => {
                self.state = InputState::Normal;
                InputEvent::EscapedChar(c)
            }
        }
    }

    /// Decode character in escape sequence (after ESC [).
    fn decode_escape_sequence(&mut self, c: char) -> InputEvent {
        self.state = InputState::Normal;

        match c {
            'A' => InputEvent::UpArrow,
            'B' => InputEvent::DownArrow,
            'C' => InputEvent::RightArrow,
            'D' => InputEvent::LeftArrow,
            _ => InputEvent::UnknownEscape,
        }
    }

    /// Reset decoder state to Normal.
    pub fn reset(&mut self) {
        self.state = InputState::Normal;
    }

    /// Get current decoder state.
    pub fn state(&self) -> InputState {
        self.state
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(decoder: &mut InputDecoder, input: &str) -> InputEvent {
        let mut last = InputEvent::None;
        for c in input.chars() {
            last = decoder.decode_char(c);
        }
        last
    }

    #[test]
    fn test_regular_characters() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.decode_char('h'), InputEvent::Char('h'));
        assert_eq!(decoder.decode_char(' '), InputEvent::Char(' '));
        assert_eq!(decoder.decode_char('ø'), InputEvent::Char('ø'));
    }

    #[test]
    fn test_special_keys() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.decode_char('\n'), InputEvent::Enter);
        assert_eq!(decoder.decode_char('\r'), InputEvent::Enter);
        assert_eq!(decoder.decode_char('\t'), InputEvent::Tab);
        assert_eq!(decoder.decode_char('\x08'), InputEvent::Backspace);
        assert_eq!(decoder.decode_char('\x7f'), InputEvent::Backspace);
    }

    #[test]
    fn test_control_keys() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.decode_char('\x10'), InputEvent::UpArrow);
        assert_eq!(decoder.decode_char('\x0e'), InputEvent::DownArrow);
        assert_eq!(decoder.decode_char('\x04'), InputEvent::EndOfTransmission);
        assert_eq!(decoder.decode_char('\x01'), InputEvent::None);
    }

    #[test]
    fn test_arrow_sequences() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decode_all(&mut decoder, "\x1b[A"), InputEvent::UpArrow);
        assert_eq!(decode_all(&mut decoder, "\x1b[B"), InputEvent::DownArrow);
        assert_eq!(decode_all(&mut decoder, "\x1b[C"), InputEvent::RightArrow);
        assert_eq!(decode_all(&mut decoder, "\x1b[D"), InputEvent::LeftArrow);
        assert_eq!(decoder.state(), InputState::Normal);
    }

    #[test]
    fn test_partial_sequence_yields_none() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decoder.decode_char('\x1b'), InputEvent::None);
        assert_eq!(decoder.state(), InputState::EscapeStart);
        assert_eq!(decoder.decode_char('['), InputEvent::None);
        assert_eq!(decoder.state(), InputState::EscapeSequence);
    }

    #[test]
    fn test_unknown_sequence() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decode_all(&mut decoder, "\x1b[Z"), InputEvent::UnknownEscape);
        assert_eq!(decoder.decode_char('a'), InputEvent::Char('a'));
    }

    #[test]
    fn test_escape_then_char() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decode_all(&mut decoder, "\x1bq"), InputEvent::EscapedChar('q'));
        assert_eq!(decoder.state(), InputState::Normal);
    }

    #[test]
    fn test_double_escape() {
        let mut decoder = InputDecoder::new();
        assert_eq!(decode_all(&mut decoder, "\x1b\x1b"), InputEvent::DoubleEsc);
        assert_eq!(decoder.state(), InputState::Normal);
    }

    #[test]
    fn test_reset() {
        let mut decoder = InputDecoder::new();
        decoder.decode_char('\x1b');
        decoder.reset();
        assert_eq!(decoder.state(), InputState::Normal);
        assert_eq!(decoder.decode_char('A'), InputEvent::Char('A'));
    }
}
