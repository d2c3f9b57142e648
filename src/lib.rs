//! # partialdate
//!
//! Dates, times, and datetimes that may leave components unspecified, with ISO 8601 parsing and
//! formatting and a well-defined notion of equality and ordering.
//!
//! A value is *partial* when some of its components are absent: a year on its own, a month and
//! day without a year, or an hour and minute without a second. Absence is not zero; `2021`
//! and `2021-01` are different dates.
//!
//! ## Examples
//!
//! ```
//! use partialdate::prelude::*;
//!
//! let birthday = Date::isoparse("--12-08")?;
//! assert_eq!(birthday.year(), None);
//! assert_eq!(birthday.isoformat(true), "-1208");
//!
//! let lunch = Time::new(12, 30, None, None)?;
//! assert_eq!(lunch.to_string(), "12:30");
//!
//! let dt: Datetime = "2021-12-30T21:12:08+01:00".parse()?;
//! assert_eq!(format!("{dt:?}"), "Datetime(2021, 12, 30, 21, 12, 8, +01:00)");
//! # Ok::<(), partialdate::Error>(())
//! ```
//!
//! ## Components
//!
//! The present components of a value must form an unbroken run that includes the most- or
//! least-significant component:
//!
//! | Date | Time | Valid? |
//! |---|---|---|
//! | `2021-12-08` | `21:12:08` | Yes |
//! | `2021-12` | `21:12` | Yes |
//! | `2021` | `21` | Yes |
//! | `-1208` | `-1208` | Yes |
//! | `--08` | `--08` | Yes |
//! | month only | minute only | No, [ComponentError::MiddleOnly] |
//! | year and day | hour and second | No, [ComponentError::Gap] |
//!
//! Years range over `0..=9999`. Leap years are the multiples of 4, with no century exception.
//!
//! ## Comparison
//!
//! Values compare with [Date::compare], [Time::compare], and [Datetime::compare], which return
//! a [CompareError] rather than guess when there is no sensible answer:
//!
//! - Absent components order before present ones, but partial values only order against values
//!   whose most-significant component is in the same position. A year doesn't order against a
//!   month-day.
//! - Complete times and datetimes with different offsets compare as instants. When either side
//!   is partial, differing offsets are an error.
//! - Naive and offset-aware values can't be ordered.
//!
//! The comparison operators are also implemented. `PartialOrd` yields `None` and `PartialEq`
//! yields `false` where `compare` or `equals` would fail.
//!
//! chrono's [NaiveDate](chrono::NaiveDate), [NaiveTime](chrono::NaiveTime),
//! [NaiveDateTime](chrono::NaiveDateTime) and [DateTime](chrono::DateTime) take part in
//! comparisons as complete values through the [Temporal] trait.
//!
//! ```
//! use chrono::NaiveDate;
//! use partialdate::prelude::*;
//!
//! let date = Date::new(2021, 12, 8)?;
//! assert!(date < NaiveDate::from_ymd_opt(2021, 12, 9).unwrap());
//!
//! let year = Date::new(2021, None, None)?;
//! let month_day = Date::new(None, 12, 8)?;
//! assert!(year.compare(&month_day).is_err());
//! assert_eq!(year.partial_cmp(&month_day), None);
//! # Ok::<(), partialdate::Error>(())
//! ```
//!
//! ## Logging
//!
//! Parsing emits [tracing] events at the `trace` and `debug` levels, naming the pattern that
//! matched or the reason text was rejected. No subscriber is installed by the library.
//!
//! ## Prelude
//!
//! partialdate provides a prelude module for convenience. Use it with:
//!
//! ```
//! use partialdate::prelude::*;
//! ```
#![warn(missing_docs)]

mod component;
mod date;
mod datetime;
mod error;
mod pattern;
mod temporal;
mod time;

pub use crate::date::Date;
pub use crate::datetime::Datetime;
pub use crate::error::{CompareError, ComponentError, Error, Op, ParseError, RangeError};
pub use crate::temporal::{Components, Kind, Temporal};
pub use crate::time::Time;
pub use chrono::FixedOffset;

/// A convenience module appropriate for glob imports (`use partialdate::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::CompareError;
    #[doc(no_inline)]
    pub use crate::Date;
    #[doc(no_inline)]
    pub use crate::Datetime;
    #[doc(no_inline)]
    pub use crate::Error;
    #[doc(no_inline)]
    pub use crate::FixedOffset;
    #[doc(no_inline)]
    pub use crate::ParseError;
    #[doc(no_inline)]
    pub use crate::RangeError;
    #[doc(no_inline)]
    pub use crate::Temporal;
    #[doc(no_inline)]
    pub use crate::Time;
}
