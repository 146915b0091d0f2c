use chrono::{Datelike, Days, Local, Months, NaiveDate};

pub trait DateBoundaries {
    fn end_of_month(&self) -> Option<Self>
    where
        Self: Sized;
}

impl DateBoundaries for NaiveDate {
    fn end_of_month(&self) -> Option<Self> {
        self.checked_add_months(Months::new(1))
            .and_then(|d| d.with_day(1))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
    }
}

/// Source of "today", the billing month is derived from it
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub struct FixedClock(pub NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn assert_expected_date(
        date: Option<NaiveDate>,
        year: i32,
        month: u32,
        day: u32,
    ) {
        assert_eq!(date, NaiveDate::from_ymd_opt(year, month, day));
    }

    #[test]
    fn end_of_month() {
        assert_expected_date(ymd(2023, 1, 30).end_of_month(), 2023, 1, 31);
        assert_expected_date(ymd(2023, 2, 9).end_of_month(), 2023, 2, 28);
        assert_expected_date(ymd(2024, 2, 9).end_of_month(), 2024, 2, 29);
        assert_expected_date(ymd(2023, 9, 24).end_of_month(), 2023, 9, 30);
        assert_expected_date(ymd(2023, 12, 24).end_of_month(), 2023, 12, 31);
        assert_expected_date(ymd(2024, 3, 31).end_of_month(), 2024, 3, 31);
    }

    #[test]
    fn fixed_clock() {
        assert_eq!(FixedClock(ymd(2024, 3, 5)).today(), ymd(2024, 3, 5));
    }
}
