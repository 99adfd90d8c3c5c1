//! Time-of-day parsing against a prioritized list of formats.

use chrono::NaiveTime;
use thiserror::Error;

/// Formats tried by [`TimeParser::default`], in priority order.
///
/// Syntax follows `chrono::format::strftime`.
pub const DEFAULT_TIME_FORMATS: &[&str] = &[
    "%I:%M %p", // 01:45 PM, 09:23 AM, 8:55 am
    "%H:%M",    // 13:45, 09:23, 8:55
    "%H.%M",    // 13.45, 09.23, 8.55 (numpad friendly)
];

/// A time string matched none of the configured formats.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("time string {text:?} did not match any time format")]
pub struct TimeFormatError {
    pub text: String,
}

/// Parses times of day, first matching format wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParser {
    formats: Vec<String>,
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMATS.iter().copied())
    }
}

impl TimeParser {
    /// Creates a parser trying `formats` in the given order.
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured formats, in priority order.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Parses `text` with the first format that accepts it.
    ///
    /// Callers trim fields before parsing; untrimmed input is rejected.
    pub fn parse(&self, text: &str) -> Result<NaiveTime, TimeFormatError> {
        if text.is_empty() || text.trim() != text {
            return Err(TimeFormatError {
                text: text.to_string(),
            });
        }

        self.formats
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
            .ok_or_else(|| TimeFormatError {
                text: text.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_twelve_hour_clock() {
        let parser = TimeParser::default();
        assert_eq!(parser.parse("01:45 PM").unwrap(), hm(13, 45));
        assert_eq!(parser.parse("8:55 am").unwrap(), hm(8, 55));
        assert_eq!(parser.parse("12:10 AM").unwrap(), hm(0, 10));
    }

    #[test]
    fn parses_twenty_four_hour_clock() {
        let parser = TimeParser::default();
        assert_eq!(parser.parse("13:45").unwrap(), hm(13, 45));
        assert_eq!(parser.parse("9:00").unwrap(), hm(9, 0));
    }

    #[test]
    fn parses_dotted_clock() {
        let parser = TimeParser::default();
        assert_eq!(parser.parse("13.45").unwrap(), hm(13, 45));
        assert_eq!(parser.parse("08.05").unwrap(), hm(8, 5));
    }

    #[test]
    fn first_matching_format_wins() {
        // Both formats accept "9:15"; the first decides the meaning.
        let parser = TimeParser::new(["%M:%H", "%H:%M"]);
        assert_eq!(parser.parse("9:15").unwrap(), hm(15, 9));

        let parser = TimeParser::new(["%H:%M", "%M:%H"]);
        assert_eq!(parser.parse("9:15").unwrap(), hm(9, 15));
    }

    #[test]
    fn rejects_non_time_text() {
        let parser = TimeParser::default();
        let err = parser.parse("Meeting").unwrap_err();
        assert_eq!(err.text, "Meeting");
        assert!(parser.parse("25:00").is_err());
        assert!(parser.parse("").is_err());
    }

    #[test]
    fn rejects_untrimmed_text() {
        let parser = TimeParser::default();
        assert!(parser.parse(" 9:00").is_err());
        assert!(parser.parse("9:00 ").is_err());
    }

    #[test]
    fn empty_format_list_matches_nothing() {
        let parser = TimeParser::new(Vec::<String>::new());
        assert!(parser.parse("9:00").is_err());
    }
}
