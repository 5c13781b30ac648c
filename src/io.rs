//! Character I/O abstraction for platform-agnostic input/output.
//!
//! The `CharIo` trait provides non-blocking character-level I/O operations that
//! can be implemented for any platform (UART, USB CDC, stdio, etc.). It is both the
//! character sink used for echo and the formatted sink used for diagnostics and
//! menu rendering (`write!(io, ...)` works on any implementation).

use core::fmt;

/// Platform-agnostic character I/O trait.
///
/// Implementations must buffer output internally:
/// - `put_char()` and `write_str()` MUST NOT block indefinitely
/// - Bare-metal targets may flush immediately (blocking acceptable)
pub trait CharIo {
    /// Platform-specific error type
    type Error;

    /// Non-blocking character read.
    ///
    /// Returns:
    /// - `Ok(Some(char))` if character available
    /// - `Ok(None)` if no character available (non-blocking)
    /// - `Err(Self::Error)` on I/O error
    fn get_char(&mut self) -> Result<Option<char>, Self::Error>;

    /// Write character to output buffer.
    fn put_char(&mut self, c: char) -> Result<(), Self::Error>;

    /// Write string to output buffer.
    ///
    /// Default implementation uses `put_char()` repeatedly.
    /// Override for more efficient bulk writes if needed.
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for c in s.chars() {
            self.put_char(c)?;
        }
        Ok(())
    }

    /// Write formatted output (target of the `write!` macro).
    ///
    /// The first I/O error aborts formatting and is returned.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), Self::Error> {
        let mut sink = FmtSink {
            io: self,
            error: None,
        };
        let _ = fmt::Write::write_fmt(&mut sink, args);
        match sink.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Bridges `core::fmt::Write` onto a `CharIo`, keeping the I/O error.
struct FmtSink<'a, T: CharIo + ?Sized> {
    io: &'a mut T,
    error: Option<T::Error>,
}

impl<T: CharIo + ?Sized> fmt::Write for FmtSink<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.io.write_str(s) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.error = Some(err);
                Err(fmt::Error)
            }
        }
    }
}
