//! Stopwatch-style duration formatting.

/// Formats seconds as `HH:MM:SS.cc` (hundredths, truncated).
///
/// Negative and non-finite values render as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_elapsed(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let total_ms = (seconds * 1_000.0).floor() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1_000) % 60;
    let hundredths = (total_ms % 1_000) / 10;
    format!("{hours:02}:{minutes:02}:{secs:02}.{hundredths:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_elapsed(0.0), "00:00:00.00");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_elapsed(3_723.456), "01:02:03.45");
    }

    #[test]
    fn truncates_rather_than_rounds() {
        assert_eq!(format_elapsed(59.999), "00:00:59.99");
    }

    #[test]
    fn clamps_invalid_input() {
        assert_eq!(format_elapsed(-5.0), "00:00:00.00");
        assert_eq!(format_elapsed(f64::NAN), "00:00:00.00");
        assert_eq!(format_elapsed(f64::INFINITY), "00:00:00.00");
    }

    #[test]
    fn hours_are_not_capped_at_a_day() {
        assert_eq!(format_elapsed(100.0 * 3_600.0), "100:00:00.00");
    }
}
