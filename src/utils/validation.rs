use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::models::salary::Salary;
use crate::utils::time::{age_on, today, years_before};

pub const MIN_SPECIALIST_AGE: u32 = 18;

// The regex crate has no lookahead, so each required class gets its own pattern.
// \d and \W are Unicode-aware. Underscore is a word character outside the alphabet.
static PASSWORD_ALPHABET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\d\W]{8,}$").expect("valid password alphabet regex"));
static HAS_LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static HAS_UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid regex"));
static HAS_SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("valid regex"));

fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::from(message));
    err
}

pub fn is_complex_password(password: &str) -> bool {
    PASSWORD_ALPHABET.is_match(password)
        && HAS_LOWERCASE.is_match(password)
        && HAS_UPPERCASE.is_match(password)
        && HAS_DIGIT.is_match(password)
        && HAS_SPECIAL.is_match(password)
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if is_complex_password(password) {
        Ok(())
    } else {
        Err(error(
            "password_complexity",
            "password needs at least 8 characters with a lowercase letter, an uppercase letter, a digit and a special character".to_string(),
        ))
    }
}

pub fn foundation_date_allowed(foundation_date: NaiveDate, today: NaiveDate) -> bool {
    foundation_date <= today
}

pub fn validate_foundation_date(foundation_date: &NaiveDate) -> Result<(), ValidationError> {
    let today = today();
    if foundation_date_allowed(*foundation_date, today) {
        Ok(())
    } else {
        Err(error(
            "foundation_date_in_future",
            format!("foundation date {} is after {}", foundation_date, today),
        ))
    }
}

/// True when someone born on `born_date` is at least 18 calendar years old on `today`.
pub fn born_date_allowed(born_date: NaiveDate, today: NaiveDate) -> bool {
    match years_before(today, MIN_SPECIALIST_AGE) {
        Some(latest) => born_date <= latest,
        None => false,
    }
}

pub fn validate_born_date(born_date: &NaiveDate) -> Result<(), ValidationError> {
    let today = today();
    if born_date_allowed(*born_date, today) {
        Ok(())
    } else {
        Err(error(
            "specialist_too_young",
            format!(
                "specialist is {} years old, must be at least {}",
                age_on(*born_date, today),
                MIN_SPECIALIST_AGE
            ),
        ))
    }
}

pub fn validate_salary(salary: &str) -> Result<(), ValidationError> {
    salary
        .parse::<Salary>()
        .map(|_| ())
        .map_err(|e| error("salary_format", e.to_string()))
}

/// Single-field failure in the same shape the derive produces.
pub fn field_error(field: &'static str, code: &'static str, message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error(code, message));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn password_requires_every_character_class() {
        assert!(is_complex_password("Valid1Pass!"));
        assert!(!is_complex_password("alllowercase1!"));
        assert!(!is_complex_password("ALLUPPERCASE1!"));
        assert!(!is_complex_password("NoDigitsHere!"));
        assert!(!is_complex_password("NoSpecial123"));
        assert!(!is_complex_password("Sh0rt!"));
    }

    #[test]
    fn password_rejects_underscore() {
        // Underscore is neither a special character nor part of the alphabet.
        assert!(!is_complex_password("Under_score1"));
        assert!(!is_complex_password("Under_score1#"));
        assert!(is_complex_password("Under-score1#"));
    }

    #[test]
    fn validate_password_reports_code() {
        let err = validate_password("password").unwrap_err();
        assert_eq!(err.code, "password_complexity");
    }

    #[test]
    fn foundation_date_may_be_today_but_not_tomorrow() {
        let today = date(2026, 10, 17);
        assert!(foundation_date_allowed(today, today));
        assert!(foundation_date_allowed(date(1999, 1, 1), today));
        assert!(!foundation_date_allowed(date(2026, 10, 18), today));
    }

    #[test]
    fn born_date_uses_calendar_age() {
        let today = date(2026, 10, 17);
        assert!(born_date_allowed(date(2008, 10, 17), today));
        assert!(!born_date_allowed(date(2008, 10, 18), today));
        assert!(born_date_allowed(date(1970, 1, 1), today));
    }

    #[test]
    fn born_on_leap_day_turns_adult_on_march_first() {
        assert!(!born_date_allowed(date(2008, 2, 29), date(2026, 2, 28)));
        assert!(born_date_allowed(date(2008, 2, 29), date(2026, 3, 1)));
    }

    #[test]
    fn salary_validator_accepts_amount_and_range() {
        assert!(validate_salary("50000").is_ok());
        assert!(validate_salary("10000-15000").is_ok());
        assert!(validate_salary("15000-10000").is_err());
        assert!(validate_salary("lots").is_err());
    }
}
