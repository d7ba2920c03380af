//! Argument rows for data-driven tests.
//!
//! A test that should run once per input row gets its rows from
//! [`csv_source`] (inline rows) or [`csv_file_source`] (a CSV file) and reads
//! typed values out of each [`Arguments`] row:
//!
//! ```rust
//! use placard_test::args::csv_source;
//!
//! for row in csv_source(&["apple, 1", "banana, 2"]).unwrap() {
//!     let fruit: String = row.get(0).unwrap();
//!     let rank: u32 = row.get(1).unwrap();
//!     assert!(!fruit.is_empty() && rank > 0);
//! }
//! ```
//!
//! Values are converted three ways:
//!
//! - implicitly through [`FromArgument`] (`row.get::<T>(i)`)
//! - through `FromStr` as a fallback (`row.get_parsed::<T>(i)`)
//! - explicitly through an [`ArgumentConverter`] (`row.convert_with(i, &c)`)
//!
//! A whole row can also be folded into a domain type with [`Aggregate`].

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;

/// Errors produced while reading or converting argument rows.
#[derive(Debug, thiserror::Error)]
pub enum ArgumentError {
    /// A row could not be parsed as CSV.
    #[error("invalid CSV source: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV file could not be opened.
    #[error("failed to read CSV file: {0}")]
    Io(#[from] io::Error),

    /// A row was empty.
    #[error("CSV source row {row} is empty")]
    EmptyRow { row: usize },

    /// The requested index is past the end of the row.
    #[error("argument index {index} out of range (row has {len} arguments)")]
    OutOfRange { index: usize, len: usize },

    /// The argument is null but a value was required.
    #[error("argument {index} is null")]
    Null { index: usize },

    /// The argument could not be converted to the requested type.
    #[error("cannot convert argument {index} (`{value}`) to {target}: {reason}")]
    Conversion {
        index: usize,
        value: String,
        target: &'static str,
        reason: String,
    },
}

/// One row of test arguments.
///
/// Values are stored as trimmed strings. An empty value is null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<Option<String>>,
}

impl Arguments {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(|v| v.map(Into::into)).collect(),
        }
    }

    fn from_record(record: &csv::StringRecord) -> Self {
        Self {
            values: record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value at `index`; `None` when it is null.
    pub fn raw(&self, index: usize) -> Result<Option<&str>, ArgumentError> {
        self.values
            .get(index)
            .map(Option::as_deref)
            .ok_or(ArgumentError::OutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// The non-null string value at `index`.
    pub fn get_str(&self, index: usize) -> Result<&str, ArgumentError> {
        self.raw(index)?.ok_or(ArgumentError::Null { index })
    }

    /// Converts the value at `index` with its [`FromArgument`] impl.
    pub fn get<T: FromArgument>(&self, index: usize) -> Result<T, ArgumentError> {
        let raw = self.get_str(index)?;
        T::from_argument(raw).map_err(|reason| conversion(index, raw, T::TARGET, reason))
    }

    /// Converts the value at `index` with the target's `FromStr` impl.
    ///
    /// For types that have a string constructor but no [`FromArgument`] impl.
    pub fn get_parsed<T>(&self, index: usize) -> Result<T, ArgumentError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.get_str(index)?;
        raw.parse::<T>().map_err(|err| {
            conversion(index, raw, std::any::type_name::<T>(), err.to_string())
        })
    }

    /// Converts the value at `index` with an explicit converter.
    pub fn convert_with<C: ArgumentConverter>(
        &self,
        index: usize,
        converter: &C,
    ) -> Result<C::Output, ArgumentError> {
        let raw = self.get_str(index)?;
        converter
            .convert(raw)
            .map_err(|reason| conversion(index, raw, converter.target(), reason))
    }

    /// Folds the whole row into `T`.
    pub fn aggregate<T: Aggregate>(&self) -> Result<T, ArgumentError> {
        T::aggregate(self)
    }
}

/// Comma-separated values, with `null` for null entries.
impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(value.as_deref().unwrap_or("null"))?;
        }
        Ok(())
    }
}

fn conversion(index: usize, raw: &str, target: &'static str, reason: String) -> ArgumentError {
    ArgumentError::Conversion {
        index,
        value: raw.to_string(),
        target,
        reason,
    }
}

/// Parses inline rows.
///
/// Each entry is one row: values are separated by commas, may be quoted with
/// single quotes (`'lemon, lime'`), and are trimmed.
pub fn csv_source(rows: &[&str]) -> Result<Vec<Arguments>, ArgumentError> {
    rows.iter()
        .enumerate()
        .map(|(row, line)| {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .quote(b'\'')
                .trim(csv::Trim::All)
                .from_reader(line.as_bytes());
            match reader.records().next() {
                Some(record) => Ok(Arguments::from_record(&record?)),
                None => Err(ArgumentError::EmptyRow { row }),
            }
        })
        .collect()
}

/// Parses the rows of a CSV file, skipping the first `lines_to_skip` rows
/// (typically a header).
///
/// Files use double quotes for quoting.
pub fn csv_file_source(
    path: impl AsRef<Path>,
    lines_to_skip: usize,
) -> Result<Vec<Arguments>, ArgumentError> {
    let file = std::fs::File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    reader
        .records()
        .skip(lines_to_skip)
        .map(|record| Ok(Arguments::from_record(&record?)))
        .collect()
}

/// Implicit conversion from an argument string.
pub trait FromArgument: Sized {
    /// Type name used in conversion errors.
    const TARGET: &'static str;

    fn from_argument(raw: &str) -> Result<Self, String>;
}

/// Splits an integer literal into sign-prefixed digits and radix.
///
/// `0x1F` is hex, `017` is octal, everything else decimal. Only one sign is
/// allowed, in front of the radix prefix.
fn integer_literal(raw: &str) -> Result<(String, u32), String> {
    let (sign, body) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (digits, radix) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (hex, 16)
    } else if body.len() > 1 && body.starts_with('0') {
        (&body[1..], 8)
    } else {
        (body, 10)
    };
    if digits.starts_with(['+', '-']) {
        return Err(format!("misplaced sign in `{raw}`"));
    }
    Ok((format!("{sign}{digits}"), radix))
}

macro_rules! integer_from_argument {
    ($($t:ty),*) => {$(
        impl FromArgument for $t {
            const TARGET: &'static str = stringify!($t);

            fn from_argument(raw: &str) -> Result<Self, String> {
                let (digits, radix) = integer_literal(raw)?;
                <$t>::from_str_radix(&digits, radix).map_err(|err| err.to_string())
            }
        }
    )*};
}

integer_from_argument!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl FromArgument for bool {
    const TARGET: &'static str = "bool";

    fn from_argument(raw: &str) -> Result<Self, String> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err("expected `true` or `false`".to_string())
        }
    }
}

impl FromArgument for char {
    const TARGET: &'static str = "char";

    fn from_argument(raw: &str) -> Result<Self, String> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err("expected exactly one character".to_string()),
        }
    }
}

impl FromArgument for f64 {
    const TARGET: &'static str = "f64";

    fn from_argument(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|err: std::num::ParseFloatError| err.to_string())
    }
}

impl FromArgument for f32 {
    const TARGET: &'static str = "f32";

    fn from_argument(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|err: std::num::ParseFloatError| err.to_string())
    }
}

impl FromArgument for String {
    const TARGET: &'static str = "String";

    fn from_argument(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

/// ISO-8601 dates (`2017-03-14`).
impl FromArgument for NaiveDate {
    const TARGET: &'static str = "NaiveDate";

    fn from_argument(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|err: chrono::ParseError| err.to_string())
    }
}

/// Explicit conversion chosen by the test.
pub trait ArgumentConverter {
    type Output;

    fn convert(&self, raw: &str) -> Result<Self::Output, String>;

    fn target(&self) -> &'static str {
        std::any::type_name::<Self::Output>()
    }
}

/// Parses a date with a chrono format string, e.g. `"%d.%m.%Y"`.
#[derive(Debug, Clone, Copy)]
pub struct DatePattern<'a>(pub &'a str);

impl ArgumentConverter for DatePattern<'_> {
    type Output = NaiveDate;

    fn convert(&self, raw: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(raw, self.0).map_err(|err| err.to_string())
    }
}

/// Converts a value to its length in characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToLength;

impl ArgumentConverter for ToLength {
    type Output = usize;

    fn convert(&self, raw: &str) -> Result<usize, String> {
        Ok(raw.chars().count())
    }
}

/// Builds a value from a whole row.
pub trait Aggregate: Sized {
    fn aggregate(args: &Arguments) -> Result<Self, ArgumentError>;
}
