//! Incremental parsing of the encoder's status stream
//!
//! ffmpeg interleaves two kinds of lines on its diagnostic stream:
//! status-update lines starting with the literal `frame` token, and
//! free-form log output. Status lines are tokenized into a fixed record;
//! everything else passes through as raw diagnostic text.

use regex::Regex;

use crate::utils::time::parse_timestamp;

/// Decoded snapshot of one status line
///
/// Produced fresh per parsed line and never merged across lines; each
/// update fully replaces the displayed progress state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressUpdate {
    /// Frames encoded so far
    pub frame: Option<u64>,
    /// Current encoding rate in frames per second
    pub fps: Option<f64>,
    /// Quantizer of the last encoded frame
    pub q: Option<f64>,
    /// Elapsed stream time in seconds, converted from `HH:MM:SS.ff`
    pub time_seconds: Option<f64>,
    /// Output bitrate with the `kbits/s` suffix discarded
    pub bitrate_kbps: Option<f64>,
    /// Encoding speed with the `x` suffix discarded
    pub speed: Option<f64>,
}

impl ProgressUpdate {
    /// True when no key parsed as numeric; the caller skips the display
    /// update for such lines instead of treating them as errors.
    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
            && self.fps.is_none()
            && self.q.is_none()
            && self.time_seconds.is_none()
            && self.bitrate_kbps.is_none()
            && self.speed.is_none()
    }
}

/// Classification of one line from the encoder's diagnostic stream
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// A status-update line, tokenized
    Progress(ProgressUpdate),
    /// Anything else, passed through unparsed
    Diagnostic(String),
}

/// Parser for the encoder's `key=value` status lines
pub struct ProgressParser {
    pattern: Regex,
}

impl ProgressParser {
    pub fn new() -> Self {
        // Values are bare integers, decimals, or HH:MM:SS.ff timestamps,
        // optionally space-padded after the '='. Unit suffixes such as
        // "kbits/s" or "x" fall outside the value match and are dropped.
        let pattern = Regex::new(r"(\w+)=\s*(\d+:\d+:\d+\.\d+|\d+\.\d+|\d+)")
            .expect("progress pattern is a valid regex");
        Self { pattern }
    }

    /// Classify and tokenize a single line
    pub fn parse_line(&self, line: &str) -> ParsedLine {
        if !line.starts_with("frame") {
            return ParsedLine::Diagnostic(line.to_string());
        }

        let mut update = ProgressUpdate::default();
        for caps in self.pattern.captures_iter(line) {
            let value = &caps[2];
            match &caps[1] {
                "frame" => update.frame = value.parse().ok(),
                "fps" => update.fps = value.parse().ok(),
                "q" => update.q = value.parse().ok(),
                "time" => update.time_seconds = parse_timestamp(value),
                "bitrate" => update.bitrate_kbps = value.parse().ok(),
                "speed" => update.speed = value.parse().ok(),
                _ => {}
            }
        }

        ParsedLine::Progress(update)
    }
}

impl Default for ProgressParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_LINE: &str =
        "frame=  120 fps= 30 q=28.0 time=00:00:04.00 bitrate= 512.0kbits/s speed=1.0x";

    #[test]
    fn tokenizes_status_line() {
        let parser = ProgressParser::new();
        let ParsedLine::Progress(update) = parser.parse_line(STATUS_LINE) else {
            panic!("status line not recognized");
        };
        assert_eq!(update.frame, Some(120));
        assert_eq!(update.fps, Some(30.0));
        assert_eq!(update.q, Some(28.0));
        assert_eq!(update.time_seconds, Some(4.0));
        assert_eq!(update.bitrate_kbps, Some(512.0));
        assert_eq!(update.speed, Some(1.0));
    }

    #[test]
    fn log_lines_pass_through_unparsed() {
        let parser = ProgressParser::new();
        let line = "Stream mapping: Stream #0:0 -> #0:0 (prores -> libx265)";
        assert_eq!(
            parser.parse_line(line),
            ParsedLine::Diagnostic(line.to_string())
        );
    }

    #[test]
    fn size_lines_are_diagnostics() {
        // ffmpeg's final summary lines do not start with "frame"
        let parser = ProgressParser::new();
        let line = "video:1024kB audio:0kB subtitle:0kB other streams:0kB";
        assert!(matches!(parser.parse_line(line), ParsedLine::Diagnostic(_)));
    }

    #[test]
    fn malformed_status_line_yields_empty_update() {
        let parser = ProgressParser::new();
        let ParsedLine::Progress(update) = parser.parse_line("frame garbage with no pairs") else {
            panic!("frame-prefixed line not recognized");
        };
        assert!(update.is_empty());
    }

    #[test]
    fn converts_timestamp_to_seconds() {
        let parser = ProgressParser::new();
        let ParsedLine::Progress(update) =
            parser.parse_line("frame=  1 time=01:02:03.50 speed=2.0x")
        else {
            panic!("status line not recognized");
        };
        assert_eq!(update.time_seconds, Some(3723.5));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let parser = ProgressParser::new();
        let ParsedLine::Progress(update) =
            parser.parse_line("frame=   42 Lsize=     256kB dup=0 drop=3")
        else {
            panic!("status line not recognized");
        };
        assert_eq!(update.frame, Some(42));
        assert_eq!(update.bitrate_kbps, None);
    }
}
