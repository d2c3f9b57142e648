use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use partialdate::{CompareError, Date, Datetime, Error, Temporal, Time};
use std::cmp::Ordering;
use tracing_subscriber::EnvFilter;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Value(#[from] Error),

    #[error("text cannot be parsed as an ISO 8601 date, time, or datetime: {0:?}")]
    Unrecognized(String),

    #[error("{0}")]
    Compare(#[from] CompareError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Value(_) | CliError::Unrecognized(_) => 1,
            CliError::Compare(_) => 2,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum KindArg {
    Date,
    Time,
    Datetime,
    Auto,
}

#[derive(Debug)]
enum Value {
    Date(Date),
    Time(Time),
    Datetime(Datetime),
}

impl KindArg {
    fn parse(&self, text: &str) -> Result<Value, CliError> {
        match self {
            KindArg::Date => Ok(Value::Date(Date::isoparse(text)?)),
            KindArg::Time => Ok(Value::Time(Time::isoparse(text)?)),
            KindArg::Datetime => Ok(Value::Datetime(Datetime::isoparse(text)?)),
            KindArg::Auto => Self::guess(text),
        }
    }

    /// Tries datetime, date and time in turn. The first range error, if any, is reported as is.
    fn guess(text: &str) -> Result<Value, CliError> {
        let attempts = [
            Datetime::isoparse(text).map(Value::Datetime),
            Date::isoparse(text).map(Value::Date),
            Time::isoparse(text).map(Value::Time),
        ];
        let mut range_error = None;
        for attempt in attempts {
            match attempt {
                Ok(value) => return Ok(value),
                Err(e @ Error::Range(_)) => {
                    range_error.get_or_insert(e);
                }
                Err(e) => tracing::trace!(error = %e, "rejected"),
            }
        }
        Err(match range_error {
            Some(e) => e.into(),
            None => CliError::Unrecognized(text.to_owned()),
        })
    }
}

impl Value {
    fn as_temporal(&self) -> &dyn Temporal {
        match self {
            Value::Date(v) => v,
            Value::Time(v) => v,
            Value::Datetime(v) => v,
        }
    }

    fn isoformat(&self, sep: &str, extended: bool) -> String {
        match self {
            Value::Date(v) => v.isoformat(extended),
            Value::Time(v) => v.isoformat(extended),
            Value::Datetime(v) => v.isoformat(sep, extended),
        }
    }

    fn repr(&self) -> String {
        match self {
            Value::Date(v) => format!("{v:?}"),
            Value::Time(v) => format!("{v:?}"),
            Value::Datetime(v) => format!("{v:?}"),
        }
    }

    fn compare(&self, other: &Value) -> Result<Ordering, CompareError> {
        let other = other.as_temporal();
        match self {
            Value::Date(v) => v.compare(other),
            Value::Time(v) => v.compare(other),
            Value::Datetime(v) => v.compare(other),
        }
    }
}

/// Parse, reformat and compare partial ISO 8601 dates, times, and datetimes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more detail to stderr. Repeat for more. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a value and prints it in ISO 8601 format
    Parse {
        /// The text to parse. Use `--` before text that starts with `-`.
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// What kind of value to parse. `auto` tries datetime, date and time in that order.
        #[arg(short, long, value_enum, default_value_t = KindArg::Auto)]
        kind: KindArg,

        /// Prefer the basic format (no `-` or `:` separators) where the value allows it
        #[arg(short, long)]
        basic: bool,

        /// Separator between the date and the time of a datetime
        #[arg(long, default_value = "T")]
        sep: String,

        /// Print the value's components instead of its ISO 8601 form
        #[arg(long)]
        repr: bool,
    },

    /// Compares two values of the same kind and prints `<`, `=` or `>`.
    ///
    /// Exits with status 2 if the values can't be ordered, for example partial values whose
    /// most-significant components differ, or a naive and an offset-aware time.
    Compare {
        /// The left-hand value
        #[arg(allow_hyphen_values = true)]
        lhs: String,

        /// The right-hand value
        #[arg(allow_hyphen_values = true)]
        rhs: String,

        /// What kind of values to parse
        #[arg(short, long, value_enum, default_value_t = KindArg::Auto)]
        kind: KindArg,
    },
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,partialdate={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn do_work(cli: Cli) -> Result<Output, CliError> {
    match cli.command {
        Commands::Parse {
            text,
            kind,
            basic,
            sep,
            repr,
        } => {
            let value = kind.parse(&text)?;
            tracing::debug!(?value, "parsed");
            let output = if repr {
                value.repr()
            } else {
                value.isoformat(&sep, !basic)
            };
            Ok((output, 0))
        }
        Commands::Compare { lhs, rhs, kind } => {
            let (lhs, rhs) = (kind.parse(&lhs)?, kind.parse(&rhs)?);
            let symbol = match lhs.compare(&rhs)? {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            Ok((symbol.to_string(), 0))
        }
    }
}
