//! Time parsing and formatting utilities

/// Parse an encoder `HH:MM:SS.ff` timestamp into elapsed seconds.
///
/// Returns `None` for anything that does not have exactly three
/// colon-separated numeric fields; the progress parser treats that as a
/// value to skip, not an error.
pub fn parse_timestamp(time_str: &str) -> Option<f64> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;

    if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
        return None;
    }

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Format seconds as `HH:MM:SS` for progress display.
pub fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timestamp_with_fraction() {
        assert_eq!(parse_timestamp("01:02:03.50"), Some(3723.5));
    }

    #[test]
    fn parses_zero_padded_timestamp() {
        assert_eq!(parse_timestamp("00:00:04.00"), Some(4.0));
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(parse_timestamp("02:03.50"), None);
        assert_eq!(parse_timestamp("3.5"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert_eq!(parse_timestamp("aa:bb:cc"), None);
        assert_eq!(parse_timestamp("01:02:xx"), None);
    }

    #[test]
    fn formats_seconds() {
        assert_eq!(format_seconds(3723.5), "01:02:03");
        assert_eq!(format_seconds(0.0), "00:00:00");
        assert_eq!(format_seconds(59.9), "00:00:59");
    }
}
