use crate::component::{OffsetRepr, ReprArgs};
use crate::date::{decode_date, Date};
use crate::error::{CompareError, Error, Op, ParseError};
use crate::pattern::PatternGroup;
use crate::temporal::{
    align, dates_equal, datetime_instants, local_times_equal, order_dates, order_local_times,
    unsupported, Alignment, Components, Kind, Temporal,
};
use crate::time::{decode_time, Time, BASIC_TIME, EXTENDED_TIME};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

const WHAT: &str = "ISO 8601 datetime";

const EXTENDED_DATE: &str = r"
    (?P<year>\d{4})
    -
    (?:
        (?P<month>\d{2}) - (?P<day>\d{2})
      | (?P<ordinal>\d{3})
    )
";

const YEAR_MONTH_DATE: &str = r"(?P<year>\d{4}) - (?P<month>\d{2})";

const BASIC_DATE: &str = r"
    (?P<year>-|\d{4})
    (?:
        (?P<month>-|\d{2})
        (?P<day>\d{2})?
      | (?P<ordinal>\d{3})
    )?
";

const SEPARATOR: &str = r"[Tt\x20]";

fn patterns() -> &'static PatternGroup {
    static PATTERNS: OnceLock<PatternGroup> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let extended = [EXTENDED_DATE, SEPARATOR, EXTENDED_TIME].concat();
        let year_month = [YEAR_MONTH_DATE, SEPARATOR, BASIC_TIME].concat();
        let basic = [BASIC_DATE, SEPARATOR, BASIC_TIME].concat();
        PatternGroup::new(&[
            ("extended", extended.as_str()),
            ("year-month", year_month.as_str()),
            ("basic", basic.as_str()),
        ])
    })
}

/// A [Date] combined with a [Time], either of which may be partial.
///
/// ```
/// use partialdate::{Datetime, FixedOffset};
///
/// let dt: Datetime = "20211230T211208Z".parse()?;
/// assert!(!dt.is_partial());
/// assert_eq!(dt, Datetime::new(2021, 12, 30, 21, 12, 8, FixedOffset::east_opt(0))?);
/// assert_eq!(dt.isoformat("T", true), "2021-12-30T21:12:08Z");
///
/// let partial = Datetime::new(None, 12, 6, 12, 11, None, None)?;
/// assert_eq!(partial.isoformat("T", true), "-1206T1211");
/// # Ok::<(), partialdate::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct Datetime {
    date: Date,
    time: Time,
}

impl Datetime {
    /// Earliest complete naive datetime, `0001-01-01T00:00:00`.
    pub const MIN: Datetime = Datetime {
        date: Date::MIN,
        time: Time::MIN,
    };

    /// Latest complete naive datetime, `9999-12-31T23:59:59`.
    pub const MAX: Datetime = Datetime {
        date: Date::MAX,
        time: Time::MAX,
    };

    /// Creates a datetime from its components. The date components are validated as by
    /// [Date::new], then the time components as by [Time::new].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: impl Into<Option<i32>>,
        month: impl Into<Option<i32>>,
        day: impl Into<Option<i32>>,
        hour: impl Into<Option<i32>>,
        minute: impl Into<Option<i32>>,
        second: impl Into<Option<i32>>,
        offset: impl Into<Option<FixedOffset>>,
    ) -> Result<Self, Error> {
        let date = Date::new(year, month, day)?;
        let time = Time::new(hour, minute, second, offset)?;
        Ok(Self::from_parts(date, time))
    }

    /// Combines an already validated date and time.
    pub fn from_parts(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// The date part.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The time part, including the offset.
    pub fn time(&self) -> Time {
        self.time
    }

    /// Calendar year, if present.
    pub fn year(&self) -> Option<u16> {
        self.date.year()
    }

    /// Calendar month, if present.
    pub fn month(&self) -> Option<u8> {
        self.date.month()
    }

    /// Day of the month, if present.
    pub fn day(&self) -> Option<u8> {
        self.date.day()
    }

    /// Hour of the day, if present.
    pub fn hour(&self) -> Option<u8> {
        self.time.hour()
    }

    /// Minute of the hour, if present.
    pub fn minute(&self) -> Option<u8> {
        self.time.minute()
    }

    /// Second of the minute, if present.
    pub fn second(&self) -> Option<u8> {
        self.time.second()
    }

    /// Fixed UTC offset, or `None` for a local datetime.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.time.offset()
    }

    /// True when either the date or the time is partial.
    pub fn is_partial(&self) -> bool {
        self.date.is_partial() || self.time.is_partial()
    }

    /// Formats the datetime as ISO 8601, with `sep` between the date and the time.
    ///
    /// The extended format is only used when the date is complete and the time can be written
    /// in the extended format; otherwise both parts use the basic format.
    pub fn isoformat(&self, sep: &str, extended: bool) -> String {
        let extended = extended && !self.date.is_partial();
        let time = self.time.isoformat(extended);
        let extended = extended && time.contains(':');
        format!("{}{sep}{time}", self.date.isoformat(extended))
    }

    /// Parses an ISO 8601 datetime. The date and time are separated by `T`, `t` or a space and
    /// are either both in the extended format or both in the basic format, except that a
    /// year-month date (`2021-12`) may be followed by a basic time.
    pub fn isoparse(text: &str) -> Result<Self, Error> {
        let Some(m) = patterns().find(text) else {
            tracing::debug!(text, "no datetime pattern matched");
            return Err(ParseError::new(WHAT, text).into());
        };
        let (year, month, day) = decode_date(&m, WHAT, text)?;
        let (hour, minute, second, offset) = decode_time(&m, WHAT, text)?;
        Self::new(year, month, day, hour, minute, second, offset)
            .map_err(|e| e.in_text(WHAT, text))
    }

    /// Compares with another datetime.
    ///
    /// Complete datetimes with different offsets are compared as instants. Otherwise the dates
    /// are compared as by [Date::compare], then the times as by [Time::compare] when the dates
    /// are equal. Ordering fails when exactly one side has an offset, when the offsets differ
    /// and either side is partial, or when the other value isn't a datetime.
    pub fn compare(&self, other: &(impl Temporal + ?Sized)) -> Result<Ordering, CompareError> {
        if other.kind() != Kind::Datetime {
            return Err(unsupported(Op::Order, "Datetime", other));
        }
        let (lhs, rhs) = (self.components(), other.components());
        match align(Op::Order, Kind::Datetime, "datetime", &lhs, &rhs)? {
            Alignment::Local => match order_dates(&lhs, &rhs)? {
                Ordering::Equal => order_local_times(&lhs, &rhs),
                ordering => Ok(ordering),
            },
            Alignment::Absolute | Alignment::Mismatched => Ok(datetime_instants(&lhs, &rhs)),
        }
    }

    /// Tests equality with another value. Dates and times are never equal to a datetime.
    pub fn equals(&self, other: &(impl Temporal + ?Sized)) -> Result<bool, CompareError> {
        if other.kind() != Kind::Datetime {
            return Ok(false);
        }
        let (lhs, rhs) = (self.components(), other.components());
        Ok(
            match align(Op::Compare, Kind::Datetime, "datetime", &lhs, &rhs)? {
                Alignment::Local => dates_equal(&lhs, &rhs) && local_times_equal(&lhs, &rhs),
                Alignment::Absolute => datetime_instants(&lhs, &rhs) == Ordering::Equal,
                Alignment::Mismatched => false,
            },
        )
    }

    fn conversion_error(&self) -> Error {
        Error::Conversion {
            kind: "datetime",
            value: self.isoformat("T", true),
        }
    }
}

impl Temporal for Datetime {
    fn kind(&self) -> Kind {
        Kind::Datetime
    }

    fn type_name(&self) -> &'static str {
        "Datetime"
    }

    fn components(&self) -> Components {
        let date = self.date.components();
        Components {
            year: date.year,
            month: date.month,
            day: date.day,
            ..self.time.components()
        }
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat(" ", true))
    }
}

impl fmt::Debug for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut args = ReprArgs::new(f, "Datetime")?;
        args.arg("year", self.year())?;
        args.arg("month", self.month())?;
        args.arg("day", self.day())?;
        args.arg("hour", self.hour())?;
        args.arg("minute", self.minute())?;
        args.arg("second", self.second())?;
        args.arg("offset", self.offset().as_ref().map(OffsetRepr))?;
        args.finish()
    }
}

impl FromStr for Datetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::isoparse(s)
    }
}

impl PartialEq for Datetime {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialOrd for Datetime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialEq<NaiveDateTime> for Datetime {
    fn eq(&self, other: &NaiveDateTime) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialEq<Datetime> for NaiveDateTime {
    fn eq(&self, other: &Datetime) -> bool {
        other == self
    }
}

impl PartialOrd<NaiveDateTime> for Datetime {
    fn partial_cmp(&self, other: &NaiveDateTime) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialOrd<Datetime> for NaiveDateTime {
    fn partial_cmp(&self, other: &Datetime) -> Option<Ordering> {
        other.compare(self).ok().map(Ordering::reverse)
    }
}

impl<Tz: TimeZone> PartialEq<DateTime<Tz>> for Datetime {
    fn eq(&self, other: &DateTime<Tz>) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl<Tz: TimeZone> PartialEq<Datetime> for DateTime<Tz> {
    fn eq(&self, other: &Datetime) -> bool {
        other == self
    }
}

impl<Tz: TimeZone> PartialOrd<DateTime<Tz>> for Datetime {
    fn partial_cmp(&self, other: &DateTime<Tz>) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl<Tz: TimeZone> PartialOrd<Datetime> for DateTime<Tz> {
    fn partial_cmp(&self, other: &Datetime) -> Option<Ordering> {
        other.compare(self).ok().map(Ordering::reverse)
    }
}

impl TryFrom<NaiveDateTime> for Datetime {
    type Error = Error;

    /// Fails for years outside `0..=9999`. Any sub-second part is dropped.
    fn try_from(dt: NaiveDateTime) -> Result<Self, Self::Error> {
        Ok(Self::from_parts(dt.date().try_into()?, dt.time().into()))
    }
}

impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for Datetime {
    type Error = Error;

    /// Keeps the local date and time along with the fixed offset in effect. Fails for offsets
    /// that aren't a whole number of minutes.
    fn try_from(dt: DateTime<Tz>) -> Result<Self, Self::Error> {
        let offset = dt.offset().fix();
        let local = Self::try_from(dt.naive_local())?;
        Ok(Self::from_parts(local.date, local.time.with_offset(offset)?))
    }
}

impl TryFrom<Datetime> for NaiveDateTime {
    type Error = Error;

    /// Fails for partial datetimes. The local date and time are kept and any offset dropped.
    fn try_from(dt: Datetime) -> Result<Self, Self::Error> {
        let date = NaiveDate::try_from(dt.date).map_err(|_| dt.conversion_error())?;
        let time = NaiveTime::try_from(dt.time).map_err(|_| dt.conversion_error())?;
        Ok(date.and_time(time))
    }
}

impl TryFrom<Datetime> for DateTime<FixedOffset> {
    type Error = Error;

    /// Fails for partial and for naive datetimes.
    fn try_from(dt: Datetime) -> Result<Self, Self::Error> {
        let offset = dt.offset().ok_or_else(|| dt.conversion_error())?;
        let naive = NaiveDateTime::try_from(dt)?;
        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| dt.conversion_error())
    }
}
