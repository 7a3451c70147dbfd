//! Parsing of the operator's `start:end` frame range answer.

/// Frame bounds as read from operator input.
///
/// A bound is `None` when its text does not start with an integer; such input
/// is still submitted and left for the backend to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub priority: Option<i64>,
}

/// Reads `start:end` (optionally `start:end:priority`).
///
/// Returns `None` when the operator gave no answer, which aborts job creation
/// without a request.
pub fn parse_frame_range(input: Option<&str>) -> Option<FrameRange> {
    let input = input?;
    if input.trim().is_empty() {
        return None;
    }
    let mut parts = input.split(':');
    let start = parts.next().and_then(leading_int);
    let end = parts.next().and_then(leading_int);
    let priority = parts.next().and_then(leading_int);
    Some(FrameRange {
        start,
        end,
        priority,
    })
}

/// Integer prefix of `text`: leading whitespace, an optional sign, then
/// digits up to the first non-digit. `"12abc"` reads as 12, `"abc"` as nothing.
fn leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::{leading_int, parse_frame_range, FrameRange};

    #[test]
    fn plain_range() {
        assert_eq!(
            parse_frame_range(Some("5:10")),
            Some(FrameRange {
                start: Some(5),
                end: Some(10),
                priority: None
            })
        );
    }

    #[test]
    fn missing_or_blank_input_aborts() {
        assert_eq!(parse_frame_range(None), None);
        assert_eq!(parse_frame_range(Some("")), None);
        assert_eq!(parse_frame_range(Some("   ")), None);
    }

    #[test]
    fn malformed_halves_are_passed_through_as_unknown() {
        assert_eq!(
            parse_frame_range(Some("abc")),
            Some(FrameRange {
                start: None,
                end: None,
                priority: None
            })
        );
        assert_eq!(
            parse_frame_range(Some("7:x")),
            Some(FrameRange {
                start: Some(7),
                end: None,
                priority: None
            })
        );
    }

    #[test]
    fn optional_priority_segment() {
        let range = parse_frame_range(Some("1:250:3")).unwrap();
        assert_eq!(range.priority, Some(3));
    }

    #[test]
    fn leading_int_reads_prefix_only() {
        assert_eq!(leading_int(" 12abc"), Some(12));
        assert_eq!(leading_int("-4"), Some(-4));
        assert_eq!(leading_int("+8"), Some(8));
        assert_eq!(leading_int("3.9"), Some(3));
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("99999999999999999999"), None);
    }
}
