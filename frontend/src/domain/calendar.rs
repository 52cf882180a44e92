//! Calendar domain logic for the gym scheduler.
//!
//! This module owns the month arithmetic behind the schedule calendar: which
//! month is being viewed, how many days it has, and the fixed 6-week grid the
//! calendar view renders. Everything here is pure and synchronous; the grid
//! is rebuilt from scratch whenever the viewed month changes.

use chrono::{Datelike, Duration, Local, NaiveDate};
use shared::CalendarCell;

use crate::services::date_utils::month_name;

/// Six weeks of seven days
pub const GRID_CELLS: usize = 42;

/// A viewed calendar month. `month` is 0-indexed (0 = January).
///
/// Construction always normalises, so `YearMonth::new(2024, 12)` is January
/// 2025 and `YearMonth::new(2024, -1)` is December 2023.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        Self::from_total_months(i64::from(year) * 12 + i64::from(month))
    }

    /// Months counted from January of year 0, clamped to January of the
    /// earliest year through December of the latest year whose adjacent
    /// months chrono can still represent
    fn from_total_months(total: i64) -> Self {
        let earliest = (i64::from(NaiveDate::MIN.year()) + 1) * 12;
        let latest = (i64::from(NaiveDate::MAX.year()) - 1) * 12 + 11;
        let total = total.clamp(earliest, latest);

        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32,
        }
    }

    fn total_months(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0() as i32)
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-indexed month (0 = January)
    pub fn month0(&self) -> u32 {
        self.month
    }

    /// 1-indexed month, as the REST service expects it
    pub fn month_number(&self) -> u32 {
        self.month + 1
    }

    /// Move by `delta` months, rolling the year as needed
    pub fn shift(&self, delta: i32) -> Self {
        Self::from_total_months(self.total_months() + i64::from(delta))
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month. Unlike `next()` this never clamps,
    /// so it stays correct for the latest representable month.
    fn following_first_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 11 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 2)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    /// Title for the calendar header, e.g. "March 2024"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month_number()), self.year)
    }
}

/// Number of days in the month, from the distance to the next month's first day
pub fn days_in_month(month: YearMonth) -> u32 {
    let days = (month.following_first_day() - month.first_day()).num_days();
    u32::try_from(days).unwrap_or(0)
}

/// Weekday of the first of the month (0 = Sunday, 6 = Saturday)
pub fn first_day_of_week(month: YearMonth) -> u32 {
    month.first_day().weekday().num_days_from_sunday()
}

/// Build the 42-cell grid for `(year, month)` with "today" taken from the local clock.
///
/// `month` is 0-indexed; out-of-range values roll over into adjacent years.
pub fn build_calendar_grid(year: i32, month: i32) -> Vec<CalendarCell> {
    build_calendar_grid_for(year, month, Local::now().date_naive())
}

/// Build the 42-cell grid for `(year, month)` against an explicit `today`.
///
/// The grid starts with the tail of the previous month so that the first of
/// the month lands in its weekday column, then every day of the viewed month,
/// then the head of the next month until 42 cells are filled. Only the viewed
/// month's cells can be marked as today.
pub fn build_calendar_grid_for(year: i32, month: i32, today: NaiveDate) -> Vec<CalendarCell> {
    let viewed = YearMonth::new(year, month);
    let first = viewed.first_day();
    let leading = first_day_of_week(viewed);
    let month_days = days_in_month(viewed);
    let viewing_today = viewed.contains(today);

    let mut cells = Vec::with_capacity(GRID_CELLS);

    for offset in (1..=leading).rev() {
        let date = first - Duration::days(i64::from(offset));
        cells.push(CalendarCell {
            day: date.day(),
            date,
            is_current_month: false,
            is_today: false,
        });
    }

    for day in 1..=month_days {
        let date = first + Duration::days(i64::from(day - 1));
        cells.push(CalendarCell {
            day,
            date,
            is_current_month: true,
            is_today: viewing_today && date == today,
        });
    }

    let next_first = viewed.following_first_day();
    let trailing = GRID_CELLS - cells.len();
    for offset in 0..trailing {
        let date = next_first + Duration::days(offset as i64);
        cells.push(CalendarCell {
            day: date.day(),
            date,
            is_current_month: false,
            is_today: false,
        });
    }

    log::debug!(
        "Built grid for {}: {} leading, {} days, {} trailing",
        viewed.title(),
        leading,
        month_days,
        trailing
    );

    cells
}
