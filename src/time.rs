use crate::component::{
    basic_components, check_contiguity, check_offset, check_range, format_offset, parse_offset,
    OffsetRepr, ReprArgs, TIME_NAMES,
};
use crate::error::{CompareError, Error, Op, ParseError};
use crate::pattern::{PatternGroup, PatternMatch};
use crate::temporal::{
    align, local_times_equal, order_local_times, time_instants, unsupported, Alignment,
    Components, Kind, Temporal,
};
use chrono::{FixedOffset, NaiveTime};
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

const WHAT: &str = "ISO 8601 time";

pub(crate) const EXTENDED_TIME: &str = r"
    (?P<hour>\d{2})
    :(?P<minute>\d{2})
    (?: :(?P<second>\d{2}) )?
    (?P<tzinfo> [zZ] | [-+]\d{2} (?: :\d{2} )? )?
";

pub(crate) const BASIC_TIME: &str = r"
    (?P<hour>-|\d{2})
    (?:
        (?P<minute>-|\d{2})
        (?P<second>\d{2})?
    )?
    (?P<tzinfo> [zZ] | [-+]\d{2} (?: \d{2} )? )?
";

fn patterns() -> &'static PatternGroup {
    static PATTERNS: OnceLock<PatternGroup> = OnceLock::new();
    PATTERNS.get_or_init(|| PatternGroup::new(&[("extended", EXTENDED_TIME), ("basic", BASIC_TIME)]))
}

/// A time of day that may omit its hour, its second, or both its minute and second, with an
/// optional fixed UTC offset.
///
/// As with [Date](crate::Date), the present components form a contiguous run that includes
/// the hour or the second. There is no sub-second resolution.
#[derive(Clone, Copy)]
pub struct Time {
    hour: Option<u8>,
    minute: Option<u8>,
    second: Option<u8>,
    offset: Option<FixedOffset>,
}

impl Time {
    /// Earliest complete naive time, `00:00:00`.
    pub const MIN: Time = Time {
        hour: Some(0),
        minute: Some(0),
        second: Some(0),
        offset: None,
    };

    /// Latest complete naive time, `23:59:59`.
    pub const MAX: Time = Time {
        hour: Some(23),
        minute: Some(59),
        second: Some(59),
        offset: None,
    };

    /// Creates a time from its components, any of which may be `None`.
    ///
    /// Fails with [Error::Component] when the present components aren't contiguous, or with
    /// [Error::Range] when one is out of range. Offsets must be a whole number of minutes.
    ///
    /// ```
    /// use partialdate::{FixedOffset, Time};
    ///
    /// let utc = FixedOffset::east_opt(0);
    /// let time = Time::new(21, 12, None, utc)?;
    /// assert_eq!(time.to_string(), "21:12Z");
    /// assert!(Time::new(21, None, 8, None).is_err());
    /// # Ok::<(), partialdate::Error>(())
    /// ```
    pub fn new(
        hour: impl Into<Option<i32>>,
        minute: impl Into<Option<i32>>,
        second: impl Into<Option<i32>>,
        offset: impl Into<Option<FixedOffset>>,
    ) -> Result<Self, Error> {
        let (hour, minute, second) = (hour.into(), minute.into(), second.into());
        check_contiguity(
            TIME_NAMES,
            [hour.is_some(), minute.is_some(), second.is_some()],
        )?;
        Ok(Self {
            hour: check_range("hour", hour, 0, 23)?,
            minute: check_range("minute", minute, 0, 59)?,
            second: check_range("second", second, 0, 59)?,
            offset: check_offset(offset.into())?,
        })
    }

    /// Hour of the day, if present.
    pub fn hour(&self) -> Option<u8> {
        self.hour
    }

    /// Minute of the hour, if present.
    pub fn minute(&self) -> Option<u8> {
        self.minute
    }

    /// Second of the minute, if present.
    pub fn second(&self) -> Option<u8> {
        self.second
    }

    /// Fixed UTC offset, or `None` for a local time.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Returns the same time of day with a different offset.
    ///
    /// Fails with [Error::Range] when the offset isn't a whole number of minutes.
    pub fn with_offset(self, offset: impl Into<Option<FixedOffset>>) -> Result<Self, Error> {
        Ok(Self {
            offset: check_offset(offset.into())?,
            ..self
        })
    }

    /// True when the hour or the second is absent.
    pub fn is_partial(&self) -> bool {
        self.hour.is_none() || self.second.is_none()
    }

    /// Formats the time as ISO 8601.
    ///
    /// The extended format (`21:12:08`, `21:12`) is only possible when the hour and minute are
    /// both present; otherwise the basic format is used regardless of `extended` (`21`, `-1208`,
    /// `--08`). The offset follows, as `Z` for UTC and otherwise in the same format as the time.
    pub fn isoformat(&self, extended: bool) -> String {
        let mut out = match (self.hour, self.minute, self.second) {
            (Some(h), Some(m), None) if extended => format!("{h:02}:{m:02}"),
            (Some(h), Some(m), Some(s)) if extended => format!("{h:02}:{m:02}:{s:02}"),
            (hour, minute, second) => basic_components(&[
                (hour.map(u16::from), 2),
                (minute.map(u16::from), 2),
                (second.map(u16::from), 2),
            ]),
        };
        if let Some(offset) = &self.offset {
            let extended = out.contains(':');
            out.push_str(&format_offset(offset, extended));
        }
        out
    }

    /// Parses an ISO 8601 time in the extended (`21:12:08`, `21:12`) or basic (`211208`, `2112`,
    /// `21`, `-1208`, `--08`) format, with an optional `Z`, `±HH`, `±HHMM` or, for the extended
    /// format, `±HH:MM` offset.
    pub fn isoparse(text: &str) -> Result<Self, Error> {
        let Some(m) = patterns().find(text) else {
            tracing::debug!(text, "no time pattern matched");
            return Err(ParseError::new(WHAT, text).into());
        };
        let (hour, minute, second, offset) = decode_time(&m, WHAT, text)?;
        Self::new(hour, minute, second, offset).map_err(|e| e.in_text(WHAT, text))
    }

    /// Compares with another time.
    ///
    /// Complete times with different offsets are compared as instants. Times with the same
    /// offset compare component-wise, with the same rules for partial values as
    /// [Date::compare](crate::Date::compare). Ordering fails when exactly one side has an offset,
    /// or when the offsets differ and either side is partial.
    pub fn compare(&self, other: &(impl Temporal + ?Sized)) -> Result<Ordering, CompareError> {
        if other.kind() != Kind::Time {
            return Err(unsupported(Op::Order, "Time", other));
        }
        let (lhs, rhs) = (self.components(), other.components());
        match align(Op::Order, Kind::Time, "time", &lhs, &rhs)? {
            Alignment::Local => order_local_times(&lhs, &rhs),
            Alignment::Absolute | Alignment::Mismatched => Ok(time_instants(&lhs, &rhs)),
        }
    }

    /// Tests equality with another value.
    ///
    /// Equality between partial times with different offsets can't be decided and is an error.
    /// A complete naive time never equals a complete offset-aware one. Dates and datetimes never
    /// equal a time.
    pub fn equals(&self, other: &(impl Temporal + ?Sized)) -> Result<bool, CompareError> {
        match other.kind() {
            Kind::Time => {}
            Kind::Date | Kind::Datetime => return Ok(false),
        }
        let (lhs, rhs) = (self.components(), other.components());
        Ok(match align(Op::Compare, Kind::Time, "time", &lhs, &rhs)? {
            Alignment::Local => local_times_equal(&lhs, &rhs),
            Alignment::Absolute => time_instants(&lhs, &rhs) == Ordering::Equal,
            Alignment::Mismatched => false,
        })
    }
}

/// Reads the time groups of a match, including the offset.
#[allow(clippy::type_complexity)]
pub(crate) fn decode_time(
    m: &PatternMatch<'_>,
    what: &'static str,
    text: &str,
) -> Result<(Option<i32>, Option<i32>, Option<i32>, Option<FixedOffset>), Error> {
    if m.group("minute") == Some("-") && m.group("second").is_none() {
        tracing::debug!(text, pattern = m.label(), "minute placeholder without a second");
        return Err(ParseError::new(what, text).into());
    }
    let offset = parse_offset(m.group("tzinfo"))?;
    Ok((
        m.number("hour"),
        m.number("minute"),
        m.number("second"),
        offset,
    ))
}

impl Temporal for Time {
    fn kind(&self) -> Kind {
        Kind::Time
    }

    fn type_name(&self) -> &'static str {
        "Time"
    }

    fn components(&self) -> Components {
        Components {
            hour: self.hour.map(u32::from),
            minute: self.minute.map(u32::from),
            second: self.second.map(u32::from),
            offset: self.offset,
            ..Default::default()
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat(true))
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut args = ReprArgs::new(f, "Time")?;
        args.arg("hour", self.hour)?;
        args.arg("minute", self.minute)?;
        args.arg("second", self.second)?;
        args.arg("offset", self.offset.as_ref().map(OffsetRepr))?;
        args.finish()
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::isoparse(s)
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialEq<NaiveTime> for Time {
    fn eq(&self, other: &NaiveTime) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialEq<Time> for NaiveTime {
    fn eq(&self, other: &Time) -> bool {
        other == self
    }
}

impl PartialOrd<NaiveTime> for Time {
    fn partial_cmp(&self, other: &NaiveTime) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialOrd<Time> for NaiveTime {
    fn partial_cmp(&self, other: &Time) -> Option<Ordering> {
        other.compare(self).ok().map(Ordering::reverse)
    }
}

impl From<NaiveTime> for Time {
    /// Drops any sub-second part.
    fn from(time: NaiveTime) -> Self {
        let c = time.components();
        let narrow = |v: Option<u32>| v.and_then(|v| u8::try_from(v).ok());
        Self {
            hour: narrow(c.hour),
            minute: narrow(c.minute),
            second: narrow(c.second),
            offset: None,
        }
    }
}

impl TryFrom<Time> for NaiveTime {
    type Error = Error;

    /// Fails for partial times. The offset is dropped.
    fn try_from(time: Time) -> Result<Self, Self::Error> {
        match (time.hour, time.minute, time.second) {
            (Some(h), Some(m), Some(s)) => NaiveTime::from_hms_opt(h.into(), m.into(), s.into()),
            _ => None,
        }
        .ok_or_else(|| Error::Conversion {
            kind: "time",
            value: time.to_string(),
        })
    }
}
