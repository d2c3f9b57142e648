use core::fmt::{self, Display};

/// Error returned when text does not match any of the ISO 8601 representations accepted for a
/// value type, or when it matches but every component is omitted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("text cannot be parsed as an {what}: {value:?}")]
pub struct ParseError {
    /// What was being parsed, such as `"ISO 8601 date"`.
    pub what: &'static str,

    /// The unparsable text.
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_owned(),
        }
    }

    /// User-facing message describing the error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Error returned when a provided component lies outside its permitted bounds. The bounds for a
/// day depend on the month (and, for February, on the year).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} is out of range [{min}..{max}]: {value}")]
pub struct RangeError {
    /// Name of the component that's outside the allowed range.
    pub field: &'static str,

    /// Provided value of the component.
    pub value: i64,

    /// Minimum allowed value.
    pub min: i64,

    /// Maximum allowed value.
    pub max: i64,
}

impl RangeError {
    pub(crate) fn new(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self {
            field,
            value,
            min,
            max,
        }
    }

    /// User-facing message describing the error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// A combination of present and absent components that does not form a contiguous run anchored
/// at the most- or least-significant position.
///
/// Each variant names the most-significant, middle, and least-significant components of the
/// value type (`year`, `month`, `day` or `hour`, `minute`, `second`).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ComponentError {
    /// Nothing was specified.
    #[error("must specify {most} or {least}")]
    Empty {
        most: &'static str,
        least: &'static str,
    },

    /// Only the middle component was specified.
    #[error("must specify {most} or {least} along with {middle}")]
    MiddleOnly {
        most: &'static str,
        middle: &'static str,
        least: &'static str,
    },

    /// The outer components were specified without the middle one.
    #[error("cannot specify {most} and {least} without {middle}")]
    Gap {
        most: &'static str,
        middle: &'static str,
        least: &'static str,
    },
}

/// The invalid-argument category: everything that can go wrong while constructing or parsing a
/// value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// See [ParseError].
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// See [RangeError].
    #[error(transparent)]
    Range(#[from] RangeError),

    /// See [ComponentError].
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// A partial value, or one that doesn't exist on chrono's calendar, was converted to a
    /// chrono type.
    #[error("cannot convert {kind} value to a complete {kind}: {value}")]
    Conversion { kind: &'static str, value: String },
}

impl Error {
    /// Reports a contiguity failure found in parsed text as a [ParseError] for that text.
    pub(crate) fn in_text(self, what: &'static str, text: &str) -> Self {
        match self {
            Error::Component(e) => {
                tracing::debug!(text, what, reason = %e, "parsed components are not contiguous");
                ParseError::new(what, text).into()
            }
            other => other,
        }
    }

    /// Returns the [ParseError] if this is one.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the [RangeError] if this is one.
    pub fn as_range(&self) -> Option<&RangeError> {
        match self {
            Error::Range(e) => Some(e),
            _ => None,
        }
    }
}

/// The two ways of comparing values. Used to phrase comparison errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Equality.
    Compare,
    /// Ordering.
    Order,
}

impl Op {
    fn verb(&self) -> &'static str {
        match self {
            Op::Compare => "compare",
            Op::Order => "order",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Op::Compare => "comparison",
            Op::Order => "ordering",
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

fn partial_phrase(mixed: &bool) -> &'static str {
    if *mixed {
        "partial and complete"
    } else {
        "partial"
    }
}

/// Error returned when two values cannot be compared. Comparisons that cannot be decided are
/// never resolved silently.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CompareError {
    /// The most-significant present components of two values are in different positions, e.g. a
    /// year-only date and a month-day date.
    #[error("ordering not supported between incompatible partial {kind}s")]
    IncompatiblePartial { kind: &'static str },

    /// The offsets differ and at least one side is partial, so no instant can be computed.
    #[error(
        "can't {op} {} {kind} values with different time zones",
        partial_phrase(.mixed)
    )]
    DifferentTimeZones {
        op: Op,
        mixed: bool,
        kind: &'static str,
    },

    /// Exactly one side carries an offset.
    #[error("can't order offset-naive and offset-aware {kind} values")]
    NaiveAware { kind: &'static str },

    /// The other value is of an unrelated kind.
    #[error("{} not supported between instances of '{lhs}' and '{rhs}'", .op.noun())]
    Unsupported {
        op: Op,
        lhs: &'static str,
        rhs: &'static str,
    },
}

impl CompareError {
    /// Returns true for the errors that reflect mismatched types or time zones, as opposed to
    /// mismatched partial precision ([CompareError::IncompatiblePartial]).
    pub fn is_type_error(&self) -> bool {
        !matches!(self, CompareError::IncompatiblePartial { .. })
    }
}
