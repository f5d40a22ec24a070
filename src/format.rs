//! `MM:SS` clock strings.

/// Formats a millisecond value as minutes-of-hour and seconds (`%M:%S`).
///
/// Values are floored to whole seconds; an hour or more wraps the minute field,
/// which never happens for elapsed race gaps.
pub fn format_clock(ms: f64) -> String {
    if !ms.is_finite() {
        return "00:00".to_string();
    }
    let total = (ms / 1000.0).floor() as i64;
    let total = total.rem_euclid(3600);
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub fn format_seconds(secs: f64) -> String {
    format_clock(secs * 1000.0)
}

/// Parses `MM:SS` into seconds. Minutes may exceed 59.
pub fn parse_clock(s: &str) -> Option<u32> {
    let (m, sec) = s.trim().split_once(':')?;
    let m: u32 = m.parse().ok()?;
    let sec: u32 = sec.parse().ok()?;
    if sec >= 60 {
        return None;
    }
    m.checked_mul(60)?.checked_add(sec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(65_000.0), "01:05");
        assert_eq!(format_seconds(2210.0), "36:50");
    }

    #[test]
    fn sub_second_values_floor() {
        assert_eq!(format_clock(59_999.0), "00:59");
    }

    #[test]
    fn non_finite_is_zero() {
        assert_eq!(format_clock(f64::NAN), "00:00");
    }

    #[test]
    fn parse_accepts_race_times() {
        assert_eq!(parse_clock("36:50"), Some(2210));
        assert_eq!(parse_clock(" 39:50 "), Some(2390));
        assert_eq!(parse_clock("00:07"), Some(7));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_clock("3650"), None);
        assert_eq!(parse_clock("36:61"), None);
        assert_eq!(parse_clock("ab:cd"), None);
    }

    #[test]
    fn parse_then_format_reproduces_time() {
        for t in ["36:50", "37:15", "39:23"] {
            let secs = parse_clock(t).unwrap();
            assert_eq!(format_seconds(f64::from(secs)), t);
        }
    }
}
