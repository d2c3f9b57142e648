//! Validation and rendering shared by [Date](crate::Date), [Time](crate::Time) and
//! [Datetime](crate::Datetime).

use crate::error::{ComponentError, RangeError};
use chrono::FixedOffset;
use core::fmt;

/// Names of the three components of a value type, most-significant first.
pub(crate) type Names = [&'static str; 3];

pub(crate) const DATE_NAMES: Names = ["year", "month", "day"];
pub(crate) const TIME_NAMES: Names = ["hour", "minute", "second"];

/// Checks that the present components form an unbroken run that includes the most- or
/// least-significant position.
pub(crate) fn check_contiguity(names: Names, present: [bool; 3]) -> Result<(), ComponentError> {
    let [most, middle, least] = names;
    match present {
        [false, true, false] => Err(ComponentError::MiddleOnly {
            most,
            middle,
            least,
        }),
        [false, false, false] => Err(ComponentError::Empty { most, least }),
        [true, false, true] => Err(ComponentError::Gap {
            most,
            middle,
            least,
        }),
        _ => Ok(()),
    }
}

/// Range-checks an optional component, narrowing it to its storage type.
pub(crate) fn check_range<T>(
    field: &'static str,
    value: Option<i32>,
    min: i32,
    max: i32,
) -> Result<Option<T>, RangeError>
where
    T: TryFrom<i32>,
{
    match value {
        None => Ok(None),
        Some(v) if (min..=max).contains(&v) => T::try_from(v)
            .map(Some)
            .map_err(|_| RangeError::new(field, v.into(), min.into(), max.into())),
        Some(v) => Err(RangeError::new(field, v.into(), min.into(), max.into())),
    }
}

/// Leap years are the multiples of 4; there is no century exception.
pub(crate) fn is_leap(year: i32) -> bool {
    year % 4 == 0
}

/// Largest day number allowed for `month`. When the year is unknown, February allows the 29th.
pub(crate) fn days_in_month(month: u8, year: Option<i32>) -> u8 {
    match month {
        2 => match year {
            Some(year) if !is_leap(year) => 28,
            _ => 29,
        },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn days_before_month(month: u8, leap: bool) -> u16 {
    (1..month)
        .map(|m| u16::from(days_in_month(m, Some(if leap { 4 } else { 1 }))))
        .sum()
}

/// Converts a day-of-year into a (month, day) pair.
pub(crate) fn ordinal_to_month_day(year: i32, ordinal: i32) -> Result<(i32, i32), RangeError> {
    let leap = is_leap(year);
    let max = if leap { 366 } else { 365 };
    if !(1..=max).contains(&ordinal) {
        return Err(RangeError::new(
            "ordinal day",
            ordinal.into(),
            1,
            max.into(),
        ));
    }
    let mut remaining = ordinal;
    for month in 1..=12u8 {
        let days = i32::from(days_in_month(month, Some(if leap { 4 } else { 1 })));
        if remaining <= days {
            return Ok((month.into(), remaining));
        }
        remaining -= days;
    }
    unreachable!("ordinal {ordinal} was range-checked against the length of the year")
}

/// Days elapsed since 0000-01-01 under this crate's leap rule.
pub(crate) fn day_number(year: i32, month: u8, day: u8) -> i64 {
    let leap = is_leap(year);
    let year = i64::from(year);
    let leaps_before = (year + 3).div_euclid(4);
    365 * year + leaps_before + i64::from(days_before_month(month, leap)) + i64::from(day) - 1
}

/// Rejects offsets with a seconds part, which ISO 8601 text can't carry.
pub(crate) fn check_offset(
    offset: Option<FixedOffset>,
) -> Result<Option<FixedOffset>, RangeError> {
    match offset.map(|o| o.local_minus_utc().abs() % 60) {
        Some(seconds) if seconds != 0 => {
            Err(RangeError::new("offset second", seconds.into(), 0, 0))
        }
        _ => Ok(offset),
    }
}

/// Parses a `Z`, `±HH`, `±HHMM` or `±HH:MM` suffix.
pub(crate) fn parse_offset(text: Option<&str>) -> Result<Option<FixedOffset>, RangeError> {
    let Some(text) = text else {
        return Ok(None);
    };
    if text.eq_ignore_ascii_case("z") {
        return Ok(FixedOffset::east_opt(0));
    }
    let (sign, digits) = text.split_at(1);
    let digits: String = digits.chars().filter(char::is_ascii_digit).collect();
    let hours: i32 = digits.get(..2).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minutes: i32 = digits.get(2..).and_then(|m| m.parse().ok()).unwrap_or(0);
    let hours = check_range::<i32>("offset hour", Some(hours), 0, 23)?.unwrap_or(0);
    let minutes = check_range::<i32>("offset minute", Some(minutes), 0, 59)?.unwrap_or(0);
    let seconds = (hours * 60 + minutes) * 60;
    let seconds = if sign == "-" { -seconds } else { seconds };
    Ok(FixedOffset::east_opt(seconds))
}

/// Formats an offset as `Z`, `±HH:MM` (extended) or `±HHMM` (basic). Seconds, which ISO 8601
/// offsets can't express, are appended only when non-zero.
pub(crate) fn format_offset(offset: &FixedOffset, extended: bool) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".to_owned();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.abs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    let sep = if extended { ":" } else { "" };
    let mut out = format!("{sign}{hours:02}{sep}{minutes:02}");
    if seconds != 0 {
        out.push_str(&format!("{sep}{seconds:02}"));
    }
    out
}

/// Renders an offset for `Debug` output.
pub(crate) struct OffsetRepr<'a>(pub(crate) &'a FixedOffset);

impl fmt::Display for OffsetRepr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.local_minus_utc() == 0 {
            f.write_str("UTC")
        } else {
            f.write_str(&format_offset(self.0, true))
        }
    }
}

/// Writes constructor-like arguments: positional until the first absent argument, keywords for
/// everything present after it.
pub(crate) struct ReprArgs<'a, 'f> {
    f: &'a mut fmt::Formatter<'f>,
    keywords: bool,
    first: bool,
}

impl<'a, 'f> ReprArgs<'a, 'f> {
    pub(crate) fn new(f: &'a mut fmt::Formatter<'f>, name: &str) -> Result<Self, fmt::Error> {
        f.write_str(name)?;
        f.write_str("(")?;
        Ok(Self {
            f,
            keywords: false,
            first: true,
        })
    }

    pub(crate) fn arg(&mut self, name: &str, value: Option<impl fmt::Display>) -> fmt::Result {
        let Some(value) = value else {
            self.keywords = true;
            return Ok(());
        };
        if !self.first {
            self.f.write_str(", ")?;
        }
        self.first = false;
        if self.keywords {
            write!(self.f, "{name}={value}")
        } else {
            write!(self.f, "{value}")
        }
    }

    pub(crate) fn finish(self) -> fmt::Result {
        self.f.write_str(")")
    }
}

/// Renders present components as zero-padded numbers and absent ones as `-`, then trims
/// trailing placeholders.
pub(crate) fn basic_components(parts: &[(Option<u16>, usize)]) -> String {
    let mut out = String::new();
    for &(value, width) in parts {
        match value {
            Some(v) => out.push_str(&format!("{v:0width$}")),
            None => out.push('-'),
        }
    }
    out.truncate(out.trim_end_matches('-').len());
    out
}

/// Index of the most-significant present component.
pub(crate) fn precision(present: &[bool]) -> Option<usize> {
    present.iter().position(|p| *p)
}
