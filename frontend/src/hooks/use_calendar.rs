//! Calendar view controller.
//!
//! Owns the viewed month and the selected day, rebuilds the grid and the
//! schedule buckets whenever either input changes, and guards against
//! out-of-order fetch results: a response is only applied when it belongs to
//! the most recent fetch and that fetch's month is still on screen.

use chrono::NaiveDate;
use shared::{CalendarCell, Schedule};

use crate::components::calendar::{render_calendar, CalendarViewModel};
use crate::domain::calendar::{build_calendar_grid_for, YearMonth};
use crate::domain::schedule_buckets::{bucketize, MonthlySummary, ScheduleBuckets};
use crate::services::api::ApiError;
use crate::services::date_utils::{parse_date_string, to_date_key, today};
use crate::services::traits::ScheduleSource;

/// Identifies one schedule fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    month: YearMonth,
    sequence: u64,
}

impl FetchTicket {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch was issued or the user navigated away; the result was dropped
    Stale,
}

#[derive(Debug, Clone)]
pub struct CalendarController {
    current_month: YearMonth,
    selected_date: String,
    today: NaiveDate,
    schedules: Vec<Schedule>,
    grid: Vec<CalendarCell>,
    buckets: ScheduleBuckets,
    loading: bool,
    error: Option<String>,
    next_sequence: u64,
    latest: Option<FetchTicket>,
}

impl Default for CalendarController {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarController {
    /// Start on the current month with today selected
    pub fn new() -> Self {
        Self::with_today(today())
    }

    pub fn with_today(today: NaiveDate) -> Self {
        Self::starting_at(YearMonth::from_date(today), today)
    }

    /// Start on `month`; today is selected only if it falls inside it
    pub fn starting_at(month: YearMonth, today: NaiveDate) -> Self {
        let selected_date = if month.contains(today) {
            to_date_key(today)
        } else {
            to_date_key(month.first_day())
        };

        Self {
            current_month: month,
            selected_date,
            today,
            schedules: Vec::new(),
            grid: build_calendar_grid_for(month.year(), month.month0() as i32, today),
            buckets: ScheduleBuckets::default(),
            loading: false,
            error: None,
            next_sequence: 0,
            latest: None,
        }
    }

    pub fn current_month(&self) -> YearMonth {
        self.current_month
    }

    pub fn selected_date(&self) -> &str {
        &self.selected_date
    }

    pub fn grid(&self) -> &[CalendarCell] {
        &self.grid
    }

    pub fn buckets(&self) -> &ScheduleBuckets {
        &self.buckets
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed fetch, cleared by the next successful one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Move by `delta` months and start loading the new month
    pub fn navigate(&mut self, delta: i32) -> FetchTicket {
        let month = self.current_month.shift(delta);
        self.go_to_month(month)
    }

    pub fn go_to_month(&mut self, month: YearMonth) -> FetchTicket {
        log::info!("Calendar moving from {} to {}", self.current_month.title(), month.title());
        self.current_month = month;
        self.grid = build_calendar_grid_for(month.year(), month.month0() as i32, self.today);
        self.begin_fetch()
    }

    /// Select a grid cell. Cells from adjacent months are ignored.
    pub fn select_date(&mut self, cell: &CalendarCell) -> bool {
        if !cell.is_current_month {
            return false;
        }
        self.selected_date = cell.date_key();
        true
    }

    /// Select by date-key, subject to the same rule as `select_date`
    pub fn select_date_key(&mut self, date_key: &str) -> bool {
        let Some(date) = parse_date_string(date_key) else {
            return false;
        };
        match self.grid.iter().find(|cell| cell.date == date).copied() {
            Some(cell) => self.select_date(&cell),
            None => false,
        }
    }

    /// Issue a ticket for loading the current month. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_sequence += 1;
        let ticket = FetchTicket {
            month: self.current_month,
            sequence: self.next_sequence,
        };
        self.latest = Some(ticket);
        self.loading = true;
        log::debug!("Fetching schedules for {} (#{})", ticket.month.title(), ticket.sequence);
        ticket
    }

    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Schedule>, ApiError>) -> FetchOutcome {
        if self.latest != Some(ticket) || ticket.month != self.current_month {
            log::warn!(
                "Discarding stale schedules for {} (#{})",
                ticket.month.title(),
                ticket.sequence
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(schedules) => {
                log::info!("Loaded {} schedules for {}", schedules.len(), ticket.month.title());
                self.buckets = bucketize(&schedules);
                self.schedules = schedules;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                log::error!("Failed to load schedules for {}: {}", ticket.month.title(), e);
                self.error = Some(e.user_message());
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch the current month from `source` and apply the result
    pub async fn refresh(&mut self, source: &dyn ScheduleSource) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = source.fetch_month_schedules(ticket.month).await;
        self.apply_fetch(ticket, result)
    }

    pub fn render(&self) -> CalendarViewModel {
        render_calendar(self.current_month, &self.grid, &self.buckets, &self.selected_date)
    }

    /// All schedules of the selected day
    pub fn selected_schedules(&self) -> &[Schedule] {
        self.buckets.get(&self.selected_date)
    }

    pub fn summary(&self) -> MonthlySummary {
        MonthlySummary::from_buckets(&self.buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn schedule(id: i64, date: &str, start: &str) -> Schedule {
        Schedule {
            id,
            title: format!("Session {id}"),
            date: date.to_string(),
            start_time: start.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_on_todays_month() {
        let controller = CalendarController::with_today(day(2024, 3, 12));
        assert_eq!(controller.current_month(), YearMonth::new(2024, 2));
        assert_eq!(controller.selected_date(), "2024-03-12");
        assert_eq!(controller.grid().len(), 42);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_navigate_rolls_year() {
        let mut controller = CalendarController::starting_at(YearMonth::new(2024, 11), day(2024, 12, 20));
        let ticket = controller.navigate(1);

        assert_eq!(controller.current_month(), YearMonth::new(2025, 0));
        assert_eq!(ticket.month(), YearMonth::new(2025, 0));
        assert!(controller.is_loading());
        assert!(controller.grid().iter().all(|cell| !cell.is_today));
    }

    #[test]
    fn test_select_ignores_adjacent_month_cells() {
        let mut controller = CalendarController::with_today(day(2024, 3, 12));
        let leading = controller.grid()[0];
        assert!(!leading.is_current_month);

        assert!(!controller.select_date(&leading));
        assert_eq!(controller.selected_date(), "2024-03-12");

        assert!(controller.select_date_key("2024-03-20"));
        assert_eq!(controller.selected_date(), "2024-03-20");
        assert!(!controller.select_date_key("2024-02-29"));
        assert!(!controller.select_date_key("garbage"));
    }

    #[test]
    fn test_apply_fetch_buckets_schedules() {
        let mut controller = CalendarController::with_today(day(2024, 3, 5));
        let ticket = controller.begin_fetch();
        let outcome = controller.apply_fetch(
            ticket,
            Ok(vec![
                schedule(1, "2024-03-05", "14:00"),
                schedule(2, "2024-03-05", "09:00"),
            ]),
        );

        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(!controller.is_loading());
        let ids: Vec<i64> = controller.selected_schedules().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(controller.summary().total, 2);
    }

    #[test]
    fn test_starting_on_another_month_selects_its_first_day() {
        let june = YearMonth::new(2024, 5);
        let mut controller = CalendarController::starting_at(june, day(2024, 3, 12));
        assert_eq!(controller.selected_date(), "2024-06-01");

        let ticket = controller.go_to_month(june);
        controller.apply_fetch(
            ticket,
            Ok(vec![
                schedule(1, "2024-06-01", "10:00"),
                schedule(2, "2024-03-12", "10:00"),
            ]),
        );
        let ids: Vec<i64> = controller.selected_schedules().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);
        assert!(controller.render().tile("2024-06-01").unwrap().is_selected);
    }

    #[test]
    fn test_late_response_for_previous_month_is_discarded() {
        let mut controller = CalendarController::with_today(day(2024, 3, 5));
        let march = controller.begin_fetch();
        let april = controller.navigate(1);

        let late = controller.apply_fetch(march, Ok(vec![schedule(1, "2024-03-05", "09:00")]));
        assert_eq!(late, FetchOutcome::Stale);
        assert!(controller.schedules().is_empty());
        assert!(controller.is_loading());

        let fresh = controller.apply_fetch(april, Ok(vec![schedule(2, "2024-04-02", "10:00")]));
        assert_eq!(fresh, FetchOutcome::Applied);
        assert_eq!(controller.schedules()[0].id, 2);
    }

    #[test]
    fn test_superseded_fetch_for_same_month_is_discarded() {
        let mut controller = CalendarController::with_today(day(2024, 3, 5));
        let first = controller.begin_fetch();
        let second = controller.begin_fetch();

        assert_eq!(controller.apply_fetch(second, Ok(vec![])), FetchOutcome::Applied);
        assert_eq!(
            controller.apply_fetch(first, Ok(vec![schedule(1, "2024-03-05", "09:00")])),
            FetchOutcome::Stale
        );
        assert!(controller.schedules().is_empty());
    }

    #[test]
    fn test_failed_fetch_keeps_previous_data() {
        let mut controller = CalendarController::with_today(day(2024, 3, 5));
        let ticket = controller.begin_fetch();
        controller.apply_fetch(ticket, Ok(vec![schedule(1, "2024-03-05", "09:00")]));

        let ticket = controller.begin_fetch();
        let outcome = controller.apply_fetch(
            ticket,
            Err(ApiError::Status {
                status: 500,
                message: Some("Database unavailable".to_string()),
            }),
        );

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(controller.error(), Some("Database unavailable"));
        assert_eq!(controller.schedules().len(), 1);
        assert_eq!(controller.grid().len(), 42);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_render_reflects_selection() {
        let mut controller = CalendarController::with_today(day(2024, 3, 5));
        controller.select_date_key("2024-03-09");
        let view = controller.render();

        assert_eq!(view.selected_date, "2024-03-09");
        assert!(view.tile("2024-03-09").unwrap().is_selected);
        assert!(view.tile("2024-03-05").unwrap().is_today);
    }
}
