use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MAX_SALARY_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "currency", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Rub, Currency::Usd, Currency::Eur];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Offered or expected pay: one amount, or an inclusive `low-high` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salary {
    Amount(Decimal),
    Range { from: Decimal, to: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SalaryParseError {
    #[error("salary is empty")]
    Empty,
    #[error("salary is longer than {} characters", MAX_SALARY_LENGTH)]
    TooLong,
    #[error("'{0}' is not a non-negative amount")]
    InvalidAmount(String),
    #[error("salary range upper bound {to} is below lower bound {from}")]
    InvertedRange { from: Decimal, to: Decimal },
}

impl Salary {
    pub fn from_columns(from: Decimal, to: Option<Decimal>) -> Self {
        match to {
            Some(to) => Salary::Range { from, to },
            None => Salary::Amount(from),
        }
    }

    /// `(salary_from, salary_to)` as stored.
    pub fn columns(&self) -> (Decimal, Option<Decimal>) {
        match *self {
            Salary::Amount(amount) => (amount, None),
            Salary::Range { from, to } => (from, Some(to)),
        }
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, SalaryParseError> {
    let trimmed = raw.trim();
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| SalaryParseError::InvalidAmount(trimmed.to_string()))?;
    if amount.is_sign_negative() {
        return Err(SalaryParseError::InvalidAmount(trimmed.to_string()));
    }
    Ok(amount)
}

impl FromStr for Salary {
    type Err = SalaryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() > MAX_SALARY_LENGTH {
            return Err(SalaryParseError::TooLong);
        }
        let s = s.trim();
        if s.is_empty() {
            return Err(SalaryParseError::Empty);
        }
        match s.split_once('-') {
            Some((from, to)) => {
                let from = parse_amount(from)?;
                let to = parse_amount(to)?;
                if to < from {
                    return Err(SalaryParseError::InvertedRange { from, to });
                }
                Ok(Salary::Range { from, to })
            }
            None => Ok(Salary::Amount(parse_amount(s)?)),
        }
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salary::Amount(amount) => write!(f, "{}", amount),
            Salary::Range { from, to } => write!(f, "{}-{}", from, to),
        }
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
