//! Round reporting: elapsed-time formatting and output seams.

use core::fmt::Debug;
use core::fmt::Write;

use heapless::String;

/// Formatted elapsed-time text. Sized for the largest representable value
/// (17 whole-second digits, a point and two fraction digits).
pub type ElapsedText = String<24>;

/// Formats elapsed milliseconds as seconds with exactly two fraction digits.
///
/// Computed from integer milliseconds (round-half-up on the dropped digit),
/// so the text never suffers float rounding artifacts: 2500 ms is always
/// `"2.50"`.
pub fn format_elapsed(elapsed_ms: u64) -> ElapsedText {
    let hundredths = elapsed_ms / 10 + u64::from(elapsed_ms % 10 >= 5);
    let mut text = ElapsedText::new();
    write!(text, "{}.{:02}", hundredths / 100, hundredths % 100).unwrap();
    text
}

/// Append-only destination for round results.
///
/// One call per round; entries are never rewritten or removed. Implementations
/// must make each entry durable before returning (the hosted file sink opens,
/// writes and closes per call).
pub trait RoundSink {
    /// Error produced by a failed append.
    type Error: Debug;

    /// Appends one formatted elapsed line. `line` carries no terminator; the
    /// sink supplies it.
    fn append(&mut self, line: &str) -> Result<(), Self::Error>;

    /// Human-readable name of where entries end up, for the exit summary.
    fn destination(&self) -> &str;
}

/// Human-facing status line output.
///
/// Implementations handle any device errors internally - status text is
/// best-effort and must never fail the game loop.
pub trait Console {
    /// Emits one status line.
    fn line(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fraction_digits() {
        assert_eq!(format_elapsed(2500).as_str(), "2.50");
        assert_eq!(format_elapsed(0).as_str(), "0.00");
        assert_eq!(format_elapsed(50).as_str(), "0.05");
        assert_eq!(format_elapsed(151).as_str(), "0.15");
        assert_eq!(format_elapsed(15_000).as_str(), "15.00");
    }

    #[test]
    fn always_exactly_two_fraction_digits() {
        for elapsed_ms in [0u64, 5, 90, 999, 1000, 1001, 59_999, 3_600_000] {
            let text = format_elapsed(elapsed_ms);
            let (_, fraction) = text.split_once('.').unwrap();
            assert_eq!(fraction.len(), 2, "{elapsed_ms} ms -> {text}");
        }
    }

    #[test]
    fn rounds_the_dropped_millisecond_digit_half_up() {
        assert_eq!(format_elapsed(2504).as_str(), "2.50");
        assert_eq!(format_elapsed(2505).as_str(), "2.51");
        assert_eq!(format_elapsed(999).as_str(), "1.00");
    }

    #[test]
    fn largest_counter_value_fits_the_buffer() {
        assert_eq!(format_elapsed(u64::MAX).as_str(), "18446744073709551.62");
    }
}
