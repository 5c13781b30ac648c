//! Small string and number helpers shared by the shell, the menu and command
//! handlers.
//!
//! Everything here works on borrowed slices or bounded `heapless` strings and never
//! allocates. Capacity limits are reported back to the caller instead of being
//! silently overrun.

use core::fmt::Write;

/// Result of [`tokenize`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Tokenized {
    /// Number of tokens stored in the output vector
    pub count: usize,

    /// More tokens were present than the output vector could hold
    pub truncated: bool,
}

/// Split `input` on `delim` into `vector`.
///
/// Runs of delimiters (including leading and trailing ones) never produce empty
/// tokens. Tokens beyond the vector length are dropped and reported through
/// [`Tokenized::truncated`]. An absent input or absent vector yields zero tokens.
///
/// ```rust
/// use sprig_shell::util::tokenize;
///
/// let mut argv = [""; 4];
/// let result = tokenize(Some("  led  on"), ' ', Some(&mut argv));
/// assert_eq!(result.count, 2);
/// assert_eq!(&argv[..2], &["led", "on"]);
/// ```
pub fn tokenize<'s>(input: Option<&'s str>, delim: char, vector: Option<&mut [&'s str]>) -> Tokenized {
    let (Some(input), Some(vector)) = (input, vector) else {
        return Tokenized::default();
    };

    let mut result = Tokenized::default();
    for token in input.split(delim).filter(|t| !t.is_empty()) {
        match vector.get_mut(result.count) {
            Some(slot) => {
                *slot = token;
                result.count += 1;
            }
            None => {
                result.truncated = true;
                break;
            }
        }
    }
    result
}

/// Parse an unsigned number, decimal or `0x`-prefixed hexadecimal.
///
/// Parsing stops at the first character that is not a digit of the base; the value
/// accumulated so far is returned. Overflow wraps.
pub fn parse_uint(s: &str) -> u32 {
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };

    let mut value: u32 = 0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = value.wrapping_mul(radix).wrapping_add(digit);
    }
    value
}

/// Render `value` with `precision` fractional digits (clamped to 10).
///
/// Fractional digits are truncated, not rounded. Negative values keep their sign.
pub fn format_float(value: f32, precision: usize) -> heapless::String<32> {
    let mut out = heapless::String::new();
    if value.is_nan() {
        let _ = out.push_str("nan");
        return out;
    }

    let precision = precision.min(10);
    let mut magnitude = value;
    if magnitude < 0.0 {
        let _ = out.push('-');
        magnitude = -magnitude;
    }

    // `as` saturates, so infinities render as u64::MAX
    let integral = magnitude as u64;
    let _ = write!(out, "{}", integral);

    if precision > 0 {
        let _ = out.push('.');
        let mut fraction = magnitude - integral as f32;
        for _ in 0..precision {
            fraction *= 10.0;
            let digit = (fraction as u8).min(9);
            let _ = out.push(char::from(b'0' + digit));
            fraction -= f32::from(digit);
        }
    }
    out
}

/// Render the low `bits` bits of `value` in binary, most significant first.
///
/// `bits` is clamped to 1..=32; use 8, 16 or 32 for register dumps.
pub fn format_binary(value: u32, bits: u32) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for i in (0..bits.clamp(1, 32)).rev() {
        let _ = out.push(if (value >> i) & 1 == 1 { '1' } else { '0' });
    }
    out
}

/// Append as much of `src` to `dst` as fits.
///
/// Returns `false` if `src` had to be truncated.
pub fn push_bounded<const N: usize>(dst: &mut heapless::String<N>, src: &str) -> bool {
    for c in src.chars() {
        if dst.push(c).is_err() {
            return false;
        }
    }
    true
}
