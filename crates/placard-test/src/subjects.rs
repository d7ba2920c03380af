//! Small types the example tests run against.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::args::{Aggregate, ArgumentError, Arguments, FromArgument};

#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    pub fn add(&self, a: i64, b: i64) -> i64 {
        a + b
    }

    pub fn multiply(&self, a: i64, b: i64) -> i64 {
        a * b
    }

    /// Integer division; `None` when `b` is zero.
    pub fn divide(&self, a: i64, b: i64) -> Option<i64> {
        a.checked_div(b)
    }
}

/// Whether `candidate` reads the same forwards and backwards, ignoring case
/// and anything that is not alphanumeric.
pub fn is_palindrome(candidate: &str) -> bool {
    let letters: Vec<char> = candidate
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    letters.iter().eq(letters.iter().rev())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl FromArgument for Gender {
    const TARGET: &'static str = "Gender";

    fn from_argument(raw: &str) -> Result<Self, String> {
        match raw {
            "F" | "Female" | "FEMALE" => Ok(Self::Female),
            "M" | "Male" | "MALE" => Ok(Self::Male),
            other => Err(format!("unknown gender `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    first_name: String,
    last_name: String,
    gender: Gender,
    date_of_birth: NaiveDate,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            date_of_birth,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }
}

/// Reads `first, last, gender, date_of_birth`.
impl Aggregate for Person {
    fn aggregate(args: &Arguments) -> Result<Self, ArgumentError> {
        Ok(Self {
            first_name: args.get(0)?,
            last_name: args.get(1)?,
            gender: args.get(2)?,
            date_of_birth: args.get(3)?,
        })
    }
}

/// A type with only a string constructor; tests convert to it through
/// `FromStr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
}

impl Book {
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl FromStr for Book {
    type Err = std::convert::Infallible;

    fn from_str(title: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_title(title))
    }
}

/// Units used by the enum-source examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 8] = [
        Self::Nanos,
        Self::Micros,
        Self::Millis,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::HalfDays,
        Self::Days,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Nanos => "NANOS",
            Self::Micros => "MICROS",
            Self::Millis => "MILLIS",
            Self::Seconds => "SECONDS",
            Self::Minutes => "MINUTES",
            Self::Hours => "HOURS",
            Self::HalfDays => "HALF_DAYS",
            Self::Days => "DAYS",
        }
    }

    pub fn is_date_based(self) -> bool {
        matches!(self, Self::HalfDays | Self::Days)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromArgument for TimeUnit {
    const TARGET: &'static str = "TimeUnit";

    fn from_argument(raw: &str) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.name() == raw)
            .ok_or_else(|| format!("no TimeUnit named `{raw}`"))
    }
}
