//! The comparison capability shared by partial values and chrono's always-complete types.
//!
//! Rather than dispatching on concrete types, every comparison asks the other operand what
//! [Kind] of value it is and for its [Components]. A chrono value simply reports every component
//! as present.

use crate::component::{day_number, precision};
use crate::error::{CompareError, Op};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike,
};
use core::cmp::Ordering;

/// The broad kind of a value. Values of different kinds never order against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A calendar date.
    Date,
    /// A time of day.
    Time,
    /// A date combined with a time of day.
    Datetime,
}

/// The components of a value, each either present or absent.
///
/// Components that don't apply to a value's [Kind] are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Components {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    /// Sub-second part. Always zero for the partial value types of this crate.
    pub nanosecond: u32,
    pub offset: Option<FixedOffset>,
}

impl Components {
    fn date_present(&self) -> [bool; 3] {
        [self.year.is_some(), self.month.is_some(), self.day.is_some()]
    }

    fn time_present(&self) -> [bool; 3] {
        [
            self.hour.is_some(),
            self.minute.is_some(),
            self.second.is_some(),
        ]
    }

    fn date_key(&self) -> [i64; 3] {
        [
            sentinel(self.year.map(i64::from)),
            sentinel(self.month.map(i64::from)),
            sentinel(self.day.map(i64::from)),
        ]
    }

    fn time_key(&self) -> [i64; 4] {
        [
            sentinel(self.hour.map(i64::from)),
            sentinel(self.minute.map(i64::from)),
            sentinel(self.second.map(i64::from)),
            self.nanosecond.into(),
        ]
    }

    fn date_partial(&self) -> bool {
        self.year.is_none() || self.day.is_none()
    }

    fn time_partial(&self) -> bool {
        self.hour.is_none() || self.second.is_none()
    }

    /// True when any component that matters for `kind` is absent.
    pub fn is_partial(&self, kind: Kind) -> bool {
        match kind {
            Kind::Date => self.date_partial(),
            Kind::Time => self.time_partial(),
            Kind::Datetime => self.date_partial() || self.time_partial(),
        }
    }

    /// Seconds since midnight in UTC, only meaningful for complete times.
    fn time_instant(&self) -> (i64, u32) {
        let seconds = i64::from(self.hour.unwrap_or(0)) * 3600
            + i64::from(self.minute.unwrap_or(0)) * 60
            + i64::from(self.second.unwrap_or(0))
            - i64::from(self.offset.map_or(0, |o| o.local_minus_utc()));
        (seconds, self.nanosecond)
    }

    /// Seconds since 0000-01-01T00:00Z, only meaningful for complete datetimes.
    fn datetime_instant(&self) -> (i64, u32) {
        let days = day_number(
            self.year.unwrap_or(0),
            self.month.unwrap_or(1) as u8,
            self.day.unwrap_or(1) as u8,
        );
        let (seconds, nanosecond) = self.time_instant();
        (days * 86_400 + seconds, nanosecond)
    }
}

/// Absent components compare lower than any present value.
fn sentinel(value: Option<i64>) -> i64 {
    value.unwrap_or(-1)
}

/// A value that can take part in comparisons with the partial value types.
///
/// Implemented by [Date](crate::Date), [Time](crate::Time), [Datetime](crate::Datetime) and by
/// chrono's [NaiveDate], [NaiveTime], [NaiveDateTime] and [DateTime].
pub trait Temporal {
    /// What kind of value this is.
    fn kind(&self) -> Kind;

    /// Type name used in error messages.
    fn type_name(&self) -> &'static str;

    /// The value's components.
    fn components(&self) -> Components;
}

impl Temporal for NaiveDate {
    fn kind(&self) -> Kind {
        Kind::Date
    }

    fn type_name(&self) -> &'static str {
        "NaiveDate"
    }

    fn components(&self) -> Components {
        Components {
            year: Some(self.year()),
            month: Some(self.month()),
            day: Some(self.day()),
            ..Default::default()
        }
    }
}

fn time_components(time: &impl Timelike) -> Components {
    Components {
        hour: Some(time.hour()),
        minute: Some(time.minute()),
        second: Some(time.second()),
        nanosecond: time.nanosecond(),
        ..Default::default()
    }
}

impl Temporal for NaiveTime {
    fn kind(&self) -> Kind {
        Kind::Time
    }

    fn type_name(&self) -> &'static str {
        "NaiveTime"
    }

    fn components(&self) -> Components {
        time_components(self)
    }
}

impl Temporal for NaiveDateTime {
    fn kind(&self) -> Kind {
        Kind::Datetime
    }

    fn type_name(&self) -> &'static str {
        "NaiveDateTime"
    }

    fn components(&self) -> Components {
        Components {
            year: Some(self.year()),
            month: Some(self.month()),
            day: Some(self.day()),
            ..time_components(self)
        }
    }
}

impl<Tz: TimeZone> Temporal for DateTime<Tz> {
    fn kind(&self) -> Kind {
        Kind::Datetime
    }

    fn type_name(&self) -> &'static str {
        "DateTime"
    }

    fn components(&self) -> Components {
        Components {
            offset: Some(self.offset().fix()),
            ..self.naive_local().components()
        }
    }
}

/// How two values with possibly different offsets should be compared.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// Same offset (or both naive): compare components directly.
    Local,
    /// Different offsets, both complete: compare absolute instants.
    Absolute,
    /// Exactly one side is offset-aware and both are complete; such values are never equal.
    Mismatched,
}

/// Decides how `lhs` and `rhs` of the given `kind` line up, failing where no answer exists.
pub(crate) fn align(
    op: Op,
    kind: Kind,
    name: &'static str,
    lhs: &Components,
    rhs: &Components,
) -> Result<Alignment, CompareError> {
    if lhs.offset == rhs.offset {
        return Ok(Alignment::Local);
    }
    let mismatched = lhs.offset.is_some() != rhs.offset.is_some();
    if op == Op::Order && mismatched {
        return Err(CompareError::NaiveAware { kind: name });
    }
    let (lhs_partial, rhs_partial) = (lhs.is_partial(kind), rhs.is_partial(kind));
    if lhs_partial || rhs_partial {
        return Err(CompareError::DifferentTimeZones {
            op,
            mixed: lhs_partial != rhs_partial,
            kind: name,
        });
    }
    Ok(if mismatched {
        Alignment::Mismatched
    } else {
        Alignment::Absolute
    })
}

/// Orders two keys component-wise. When either side is partial, both must have their
/// most-significant component in the same position.
fn order_keys<const N: usize>(
    name: &'static str,
    lhs_present: [bool; 3],
    rhs_present: [bool; 3],
    lhs_key: [i64; N],
    rhs_key: [i64; N],
) -> Result<Ordering, CompareError> {
    let partial = lhs_present.contains(&false) || rhs_present.contains(&false);
    if partial && precision(&lhs_present) != precision(&rhs_present) {
        return Err(CompareError::IncompatiblePartial { kind: name });
    }
    Ok(lhs_key.cmp(&rhs_key))
}

pub(crate) fn order_dates(lhs: &Components, rhs: &Components) -> Result<Ordering, CompareError> {
    order_keys(
        "date",
        lhs.date_present(),
        rhs.date_present(),
        lhs.date_key(),
        rhs.date_key(),
    )
}

pub(crate) fn order_local_times(
    lhs: &Components,
    rhs: &Components,
) -> Result<Ordering, CompareError> {
    order_keys(
        "time",
        lhs.time_present(),
        rhs.time_present(),
        lhs.time_key(),
        rhs.time_key(),
    )
}

pub(crate) fn dates_equal(lhs: &Components, rhs: &Components) -> bool {
    lhs.date_key() == rhs.date_key()
}

pub(crate) fn local_times_equal(lhs: &Components, rhs: &Components) -> bool {
    lhs.time_key() == rhs.time_key()
}

pub(crate) fn time_instants(lhs: &Components, rhs: &Components) -> Ordering {
    lhs.time_instant().cmp(&rhs.time_instant())
}

pub(crate) fn datetime_instants(lhs: &Components, rhs: &Components) -> Ordering {
    lhs.datetime_instant().cmp(&rhs.datetime_instant())
}

/// The error for operands of an unrelated kind.
pub(crate) fn unsupported(
    op: Op,
    lhs: &'static str,
    rhs: &(impl Temporal + ?Sized),
) -> CompareError {
    tracing::debug!(lhs, rhs = rhs.type_name(), %op, "unsupported comparison");
    CompareError::Unsupported {
        op,
        lhs,
        rhs: rhs.type_name(),
    }
}
