// ABOUTME: RSS 2.0 date handling: RFC822 with 2 or 4 digit years, optional weekday, named or numeric zones.
// ABOUTME: Parsing picks one of 16 strict layouts from shape cues in the input; formatting is canonical.

use std::fmt;
use std::str::FromStr;

use chrono::format::ParseError as ChronoParseError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// A month abbreviation followed by four digits, e.g. "Jul 1974".
static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]{2} [0-9]{4}").expect("valid year regex"));

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Offsets (seconds east of UTC) for zone abbreviations found in feeds.
/// Ambiguous names resolve to their North American meaning, except IST.
const ZONE_OFFSETS: &[(&str, i32)] = &[
    ("GMT", 0),
    ("UTC", 0),
    ("EST", -5 * 3600),
    ("EDT", -4 * 3600),
    ("CST", -6 * 3600),
    ("CDT", -5 * 3600),
    ("MST", -7 * 3600),
    ("MDT", -6 * 3600),
    ("PST", -8 * 3600),
    ("PDT", -7 * 3600),
    ("AKST", -9 * 3600),
    ("AKDT", -8 * 3600),
    ("HST", -10 * 3600),
    ("AST", -4 * 3600),
    ("ADT", -3 * 3600),
    ("NST", -(3 * 3600 + 30 * 60)),
    ("NDT", -(2 * 3600 + 30 * 60)),
    // European
    ("WET", 0),
    ("WEST", 3600),
    ("CET", 3600),
    ("CEST", 2 * 3600),
    ("EET", 2 * 3600),
    ("EEST", 3 * 3600),
    ("BST", 3600),
    // Asia/Pacific
    ("IST", 5 * 3600 + 30 * 60),
    ("JST", 9 * 3600),
    ("KST", 9 * 3600),
    ("AWST", 8 * 3600),
    ("AEST", 10 * 3600),
    ("AEDT", 11 * 3600),
    ("NZST", 12 * 3600),
    ("NZDT", 13 * 3600),
];

/// The trailing zone token a layout expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneStyle {
    /// `UTC`, `GMT`, `EST`, ...
    Abbreviation,
    /// `+0700`, `-0500`
    Offset,
}

#[derive(Debug, Clone, Copy)]
struct DatePattern {
    weekday: bool,
    /// chrono layout for everything between the weekday and the zone.
    layout: &'static str,
    /// Anchored regex the same text must match first. chrono alone takes
    /// one-digit fields and lets a space match zero or more spaces.
    shape: &'static str,
    zone: ZoneStyle,
}

const fn pattern(
    weekday: bool,
    layout: &'static str,
    shape: &'static str,
    zone: ZoneStyle,
) -> DatePattern {
    DatePattern {
        weekday,
        layout,
        shape,
        zone,
    }
}

// Day, minute and second take two digits; the hour takes one or two.
const SHORT_YEAR_HM: &str = r"^[0-9]{2} [A-Z][a-z]{2} [0-9]{2} [0-9]{1,2}:[0-9]{2}$";
const SHORT_YEAR_HMS: &str = r"^[0-9]{2} [A-Z][a-z]{2} [0-9]{2} [0-9]{1,2}:[0-9]{2}:[0-9]{2}$";
const LONG_YEAR_HM: &str = r"^[0-9]{2} [A-Z][a-z]{2} [0-9]{4} [0-9]{1,2}:[0-9]{2}$";
const LONG_YEAR_HMS: &str = r"^[0-9]{2} [A-Z][a-z]{2} [0-9]{4} [0-9]{1,2}:[0-9]{2}:[0-9]{2}$";

use ZoneStyle::{Abbreviation as Abbr, Offset as Num};

/// Indexed by [`ShapeCues::index`]:
/// bit 3 weekday, bit 2 four-digit year, bit 1 seconds, bit 0 numeric offset.
const DATE_PATTERNS: [DatePattern; 16] = [
    pattern(false, "%d %b %y %H:%M", SHORT_YEAR_HM, Abbr),
    pattern(false, "%d %b %y %H:%M", SHORT_YEAR_HM, Num),
    pattern(false, "%d %b %y %H:%M:%S", SHORT_YEAR_HMS, Abbr),
    pattern(false, "%d %b %y %H:%M:%S", SHORT_YEAR_HMS, Num),
    pattern(false, "%d %b %Y %H:%M", LONG_YEAR_HM, Abbr),
    pattern(false, "%d %b %Y %H:%M", LONG_YEAR_HM, Num),
    pattern(false, "%d %b %Y %H:%M:%S", LONG_YEAR_HMS, Abbr),
    pattern(false, "%d %b %Y %H:%M:%S", LONG_YEAR_HMS, Num),
    pattern(true, "%d %b %y %H:%M", SHORT_YEAR_HM, Abbr),
    pattern(true, "%d %b %y %H:%M", SHORT_YEAR_HM, Num),
    pattern(true, "%d %b %y %H:%M:%S", SHORT_YEAR_HMS, Abbr),
    pattern(true, "%d %b %y %H:%M:%S", SHORT_YEAR_HMS, Num),
    pattern(true, "%d %b %Y %H:%M", LONG_YEAR_HM, Abbr),
    pattern(true, "%d %b %Y %H:%M", LONG_YEAR_HM, Num),
    pattern(true, "%d %b %Y %H:%M:%S", LONG_YEAR_HMS, Abbr),
    pattern(true, "%d %b %Y %H:%M:%S", LONG_YEAR_HMS, Num),
];

static BODY_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    DATE_PATTERNS
        .iter()
        .map(|p| Regex::new(p.shape).expect("valid date shape regex"))
        .collect()
});

/// The four yes/no observations that select a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShapeCues {
    weekday: bool,
    four_digit_year: bool,
    seconds: bool,
    numeric_offset: bool,
}

impl ShapeCues {
    fn detect(input: &str) -> Self {
        Self {
            weekday: input.contains(','),
            four_digit_year: FOUR_DIGIT_YEAR.is_match(input),
            seconds: input.matches(':').count() == 2,
            numeric_offset: input.contains('+') || input.contains('-'),
        }
    }

    fn index(self) -> usize {
        (usize::from(self.weekday) << 3)
            | (usize::from(self.four_digit_year) << 2)
            | (usize::from(self.seconds) << 1)
            | usize::from(self.numeric_offset)
    }

    fn pattern(self) -> &'static DatePattern {
        &DATE_PATTERNS[self.index()]
    }

    fn shape(self) -> &'static Regex {
        &BODY_SHAPES[self.index()]
    }
}

/// A date string that does not match any RSS date shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("{input:?}: expected a weekday abbreviation followed by \", \"")]
    Weekday { input: String },

    #[error("{input:?}: expected a time zone after the time")]
    MissingZone { input: String },

    #[error("{input:?}: wrong field widths or spacing for layout {layout:?}")]
    Shape { input: String, layout: &'static str },

    #[error("{input:?}: does not match layout {layout:?} ({source})")]
    Layout {
        input: String,
        layout: &'static str,
        #[source]
        source: ChronoParseError,
    },

    #[error("{input:?}: unrecognized time zone {zone:?}")]
    Zone { input: String, zone: String },
}

impl DateFormatError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            DateFormatError::Weekday { input }
            | DateFormatError::MissingZone { input }
            | DateFormatError::Shape { input, .. }
            | DateFormatError::Layout { input, .. }
            | DateFormatError::Zone { input, .. } => input,
        }
    }
}

/// A point in time as carried by an RSS date field.
///
/// Keeps the zone abbreviation it was parsed or built with so it can be
/// written back out the same way. Without one, the numeric offset is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssDate {
    datetime: DateTime<FixedOffset>,
    zone: Option<String>,
}

impl RssDate {
    /// Parses any of the accepted RSS date shapes:
    ///
    /// - `23 Jul 74 09:10 UTC`
    /// - `Wed, 23 Jul 1974 09:10:30 UTC`
    /// - `23 Jul 1974 09:10:30 +0700`
    ///
    /// Field widths are exact: two-digit day, minute and second, one or two
    /// digit hour, single spaces, nothing before or after.
    ///
    /// The weekday, when present, is only checked for syntax. Two-digit years
    /// follow chrono's `%y` window: 70-99 map to 19xx and 00-69 to 20xx.
    /// Year 69 therefore reads as 2069, not 1969.
    pub fn parse(input: &str) -> Result<Self, DateFormatError> {
        let cues = ShapeCues::detect(input);
        let pattern = cues.pattern();

        let rest = if pattern.weekday {
            strip_weekday(input).ok_or_else(|| DateFormatError::Weekday {
                input: input.to_string(),
            })?
        } else {
            input
        };

        let (body, zone_token) =
            rest.rsplit_once(' ')
                .ok_or_else(|| DateFormatError::MissingZone {
                    input: input.to_string(),
                })?;

        if !cues.shape().is_match(body) {
            return Err(DateFormatError::Shape {
                input: input.to_string(),
                layout: pattern.layout,
            });
        }

        let naive = NaiveDateTime::parse_from_str(body, pattern.layout).map_err(|source| {
            DateFormatError::Layout {
                input: input.to_string(),
                layout: pattern.layout,
                source,
            }
        })?;

        let zone_error = || DateFormatError::Zone {
            input: input.to_string(),
            zone: zone_token.to_string(),
        };
        let (offset, zone) = match pattern.zone {
            ZoneStyle::Abbreviation => (
                abbreviation_offset(zone_token).ok_or_else(zone_error)?,
                Some(zone_token.to_string()),
            ),
            ZoneStyle::Offset => (numeric_offset(zone_token).ok_or_else(zone_error)?, None),
        };

        let datetime = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(zone_error)?;

        Ok(Self { datetime, zone })
    }

    /// A UTC instant, written with the `UTC` abbreviation.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self {
            datetime: datetime.fixed_offset(),
            zone: Some("UTC".to_string()),
        }
    }

    /// An instant in a fixed offset with no zone name, written as `+HHMM`.
    pub fn from_fixed(datetime: DateTime<FixedOffset>) -> Self {
        Self {
            datetime,
            zone: None,
        }
    }

    /// Attaches a zone abbreviation to be used when formatting.
    /// The caller is responsible for it matching the offset.
    pub fn with_zone_name(mut self, name: impl Into<String>) -> Self {
        self.zone = Some(name.into());
        self
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    pub fn offset(&self) -> FixedOffset {
        *self.datetime.offset()
    }

    pub fn zone_name(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }

    /// Formats as `02 Jan 2006 15:04 MST`: no weekday, no seconds, 4-digit year.
    pub fn format(&self) -> String {
        let stamp = self.datetime.format("%d %b %Y %H:%M");
        match &self.zone {
            Some(name) => format!("{stamp} {name}"),
            None => format!("{stamp} {}", self.datetime.format("%z")),
        }
    }
}

impl fmt::Display for RssDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for RssDate {
    type Err = DateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RssDate::parse(s)
    }
}

impl From<DateTime<Utc>> for RssDate {
    fn from(datetime: DateTime<Utc>) -> Self {
        RssDate::from_utc(datetime)
    }
}

/// Parses an RSS date string. See [`RssDate::parse`].
pub fn parse_rss_date(input: &str) -> Result<RssDate, DateFormatError> {
    RssDate::parse(input)
}

/// Formats a UTC instant for use in `pubDate` or `lastBuildDate`.
pub fn compose_rss_date(datetime: DateTime<Utc>) -> String {
    RssDate::from_utc(datetime).format()
}

fn strip_weekday(input: &str) -> Option<&str> {
    let (day, rest) = input.split_once(", ")?;
    WEEKDAYS.contains(&day).then_some(rest)
}

/// Three uppercase letters, or four ending in `T` (CEST, AEDT).
/// Well-formed names missing from the table get a zero offset.
fn abbreviation_offset(token: &str) -> Option<FixedOffset> {
    let well_formed = token.bytes().all(|b| b.is_ascii_uppercase())
        && (token.len() == 3 || (token.len() == 4 && token.ends_with('T')));
    if !well_formed {
        return None;
    }
    let seconds = ZONE_OFFSETS
        .iter()
        .find(|(name, _)| *name == token)
        .map_or(0, |(_, seconds)| *seconds);
    FixedOffset::east_opt(seconds)
}

/// Exactly `+HHMM` or `-HHMM`.
fn numeric_offset(token: &str) -> Option<FixedOffset> {
    let bytes = token.as_bytes();
    if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours: i32 = token[1..3].parse().ok()?;
    let minutes: i32 = token[3..5].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
