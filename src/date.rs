use crate::component::{
    basic_components, check_contiguity, check_range, days_in_month, ordinal_to_month_day,
    ReprArgs, DATE_NAMES,
};
use crate::error::{CompareError, Error, Op, ParseError};
use crate::pattern::{PatternGroup, PatternMatch};
use crate::temporal::{dates_equal, order_dates, unsupported, Components, Kind, Temporal};
use chrono::NaiveDate;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

const WHAT: &str = "ISO 8601 date";

const EXTENDED: &str = r"
    (?P<year>\d{4})
    -
    (?:
        (?P<month>\d{2})
        (?: -(?P<day>\d{2}) | -- )?
      | (?P<ordinal>\d{3})
    )
";

const BASIC_YEAR_MONTH: &str = r"(?P<year>\d{4}) (?P<month>\d{2})";

const BASIC: &str = r"
    (?P<year>-|\d{4})
    (?:
        (?P<month>-|\d{2})
        (?P<day>-|\d{2})?
      | (?P<ordinal>\d{3})
    )?
";

const LEGACY_EXTENDED: &str = r"-- (?: (?P<month>\d{2}) | - ) - (?P<day>\d{2})";

const LEGACY_YEAR: &str = r"(?P<year>\d{4}) ----";

fn patterns() -> &'static PatternGroup {
    static PATTERNS: OnceLock<PatternGroup> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PatternGroup::new(&[
            ("extended", EXTENDED),
            ("basic year-month", BASIC_YEAR_MONTH),
            ("basic", BASIC),
            ("legacy extended", LEGACY_EXTENDED),
            ("legacy year", LEGACY_YEAR),
        ])
    })
}

/// A calendar date that may omit its year, its day, or both its month and day.
///
/// The present components always form a contiguous run that includes the year or the day:
/// `2021`, `2021-12`, `2021-12-06`, `-1206` (month and day), and `--06` (day only) are all
/// representable, but a month on its own or a year and day without a month are not.
///
/// Leap years are the multiples of 4, with no century exception, so `1900-02-29` is a valid
/// date here.
///
/// ```
/// use partialdate::Date;
///
/// let date = Date::new(None, 12, 8)?;
/// assert_eq!(date.to_string(), "-1208");
/// assert_eq!("-1208".parse::<Date>()?, date);
/// assert!(date.is_partial());
/// # Ok::<(), partialdate::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    year: Option<u16>,
    month: Option<u8>,
    day: Option<u8>,
}

impl Date {
    /// Earliest complete date, `0001-01-01`.
    pub const MIN: Date = Date {
        year: Some(1),
        month: Some(1),
        day: Some(1),
    };

    /// Latest complete date, `9999-12-31`.
    pub const MAX: Date = Date {
        year: Some(9999),
        month: Some(12),
        day: Some(31),
    };

    /// Creates a date from its components, any of which may be `None`.
    ///
    /// Fails with [Error::Component] when the present components aren't contiguous, or with
    /// [Error::Range] when one is out of range. The year must lie in `0..=9999`; the largest day
    /// depends on the month and, for February, on the year.
    pub fn new(
        year: impl Into<Option<i32>>,
        month: impl Into<Option<i32>>,
        day: impl Into<Option<i32>>,
    ) -> Result<Self, Error> {
        let (year, month, day) = (year.into(), month.into(), day.into());
        check_contiguity(DATE_NAMES, [year.is_some(), month.is_some(), day.is_some()])?;
        let year = check_range::<u16>("year", year, 0, 9999)?;
        let month = check_range::<u8>("month", month, 1, 12)?;
        let max_day = month.map_or(31, |m| days_in_month(m, year.map(i32::from)));
        let day = check_range::<u8>("day", day, 1, max_day.into())?;
        Ok(Self { year, month, day })
    }

    /// Calendar year, if present.
    pub fn year(&self) -> Option<u16> {
        self.year
    }

    /// Calendar month, if present.
    pub fn month(&self) -> Option<u8> {
        self.month
    }

    /// Day of the month, if present.
    pub fn day(&self) -> Option<u8> {
        self.day
    }

    /// True when the year or the day is absent.
    pub fn is_partial(&self) -> bool {
        self.year.is_none() || self.day.is_none()
    }

    /// Formats the date as ISO 8601.
    ///
    /// Complete dates honor `extended` (`2021-12-06` or `20211206`). Year-month dates are always
    /// `2021-12`; ISO 8601 has no basic year-month form. The remaining partial forms use
    /// the basic format with `-` for each leading absent component (`--06`, `-1206`), and a
    /// year-only date is just `2021`.
    pub fn isoformat(&self, extended: bool) -> String {
        match (self.year, self.month, self.day) {
            (Some(y), Some(m), None) => format!("{y:04}-{m:02}"),
            (Some(y), Some(m), Some(d)) if extended => format!("{y:04}-{m:02}-{d:02}"),
            (Some(y), Some(m), Some(d)) => format!("{y:04}{m:02}{d:02}"),
            (year, month, day) => basic_components(&[
                (year, 4),
                (month.map(u16::from), 2),
                (day.map(u16::from), 2),
            ]),
        }
    }

    /// Parses an ISO 8601 date in the extended (`2021-12-06`, `2021-12`, `2021-340`) or basic
    /// (`20211206`, `202112`, `2021340`, `-1206`, `--06`) format. The older extended forms with
    /// placeholders (`--12-06`, `----06`, `2021-12--`, `2021----`) are accepted too.
    ///
    /// Ordinal dates are converted to month and day. Out-of-range components are reported as
    /// [Error::Range], and anything else that isn't a date as [Error::Parse].
    pub fn isoparse(text: &str) -> Result<Self, Error> {
        let Some(m) = patterns().find(text) else {
            tracing::debug!(text, "no date pattern matched");
            return Err(ParseError::new(WHAT, text).into());
        };
        let (year, month, day) = decode_date(&m, WHAT, text)?;
        Self::new(year, month, day).map_err(|e| e.in_text(WHAT, text))
    }

    /// Compares with another date.
    ///
    /// Absent components order before any present value. When either side is partial, both
    /// must have their most-significant component in the same position; otherwise
    /// [CompareError::IncompatiblePartial] is returned. Values of any other kind can't be
    /// ordered against a date.
    pub fn compare(&self, other: &(impl Temporal + ?Sized)) -> Result<Ordering, CompareError> {
        match other.kind() {
            Kind::Date => order_dates(&self.components(), &other.components()),
            Kind::Time | Kind::Datetime => Err(unsupported(Op::Order, "Date", other)),
        }
    }

    /// Tests equality with another value. Times and datetimes are never equal to a date.
    pub fn equals(&self, other: &(impl Temporal + ?Sized)) -> Result<bool, CompareError> {
        match other.kind() {
            Kind::Date => Ok(dates_equal(&self.components(), &other.components())),
            Kind::Time | Kind::Datetime => Ok(false),
        }
    }
}

/// Reads the date groups of a match, converting an ordinal day to month and day.
pub(crate) fn decode_date(
    m: &PatternMatch<'_>,
    what: &'static str,
    text: &str,
) -> Result<(Option<i32>, Option<i32>, Option<i32>), Error> {
    if m.group("month") == Some("-") && m.group("day").is_none() {
        tracing::debug!(text, pattern = m.label(), "month placeholder without a day");
        return Err(ParseError::new(what, text).into());
    }
    let year = m.number("year");
    match m.number("ordinal") {
        Some(ordinal) => {
            let Some(y) = year else {
                tracing::debug!(text, "ordinal day without a year");
                return Err(ParseError::new(what, text).into());
            };
            let (month, day) = ordinal_to_month_day(y, ordinal)?;
            Ok((year, Some(month), Some(day)))
        }
        None => Ok((year, m.number("month"), m.number("day"))),
    }
}

impl Temporal for Date {
    fn kind(&self) -> Kind {
        Kind::Date
    }

    fn type_name(&self) -> &'static str {
        "Date"
    }

    fn components(&self) -> Components {
        Components {
            year: self.year.map(i32::from),
            month: self.month.map(u32::from),
            day: self.day.map(u32::from),
            ..Default::default()
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat(true))
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut args = ReprArgs::new(f, "Date")?;
        args.arg("year", self.year)?;
        args.arg("month", self.month)?;
        args.arg("day", self.day)?;
        args.finish()
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::isoparse(s)
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialEq<NaiveDate> for Date {
    fn eq(&self, other: &NaiveDate) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialEq<Date> for NaiveDate {
    fn eq(&self, other: &Date) -> bool {
        other == self
    }
}

impl PartialOrd<NaiveDate> for Date {
    fn partial_cmp(&self, other: &NaiveDate) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialOrd<Date> for NaiveDate {
    fn partial_cmp(&self, other: &Date) -> Option<Ordering> {
        other.compare(self).ok().map(Ordering::reverse)
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    /// Fails for years outside `0..=9999`.
    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let c = date.components();
        Self::new(c.year, c.month.map(|m| m as i32), c.day.map(|d| d as i32))
    }
}

impl TryFrom<Date> for NaiveDate {
    type Error = Error;

    /// Fails for partial dates and for leap days chrono doesn't have, like `1900-02-29`.
    fn try_from(date: Date) -> Result<Self, Self::Error> {
        match (date.year, date.month, date.day) {
            (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y.into(), m.into(), d.into()),
            _ => None,
        }
        .ok_or_else(|| Error::Conversion {
            kind: "date",
            value: date.to_string(),
        })
    }
}
