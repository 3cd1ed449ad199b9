use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Same calendar day `years` earlier. Feb 29 falls back to Feb 28.
pub fn years_before(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(years.checked_mul(12)?))
}

/// Full calendar years elapsed between `born` and `on`.
pub fn age_on(born: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - born.year();
    if (on.month(), on.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn years_before_clamps_leap_day() {
        assert_eq!(years_before(date(2024, 2, 29), 18), Some(date(2006, 2, 28)));
        assert_eq!(years_before(date(2026, 10, 17), 18), Some(date(2008, 10, 17)));
    }

    #[test]
    fn age_counts_only_completed_years() {
        assert_eq!(age_on(date(2008, 10, 18), date(2026, 10, 17)), 17);
        assert_eq!(age_on(date(2008, 10, 17), date(2026, 10, 17)), 18);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 2, 28)), 17);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 3, 1)), 18);
    }
}
