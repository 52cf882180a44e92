//! Calendar month view.
//!
//! `render_calendar` turns a grid plus its schedule buckets into a plain view
//! model; `render_calendar_text` draws that model for the terminal.

use std::fmt::Write;

use chrono::NaiveDate;
use shared::{CalendarCell, Schedule, ScheduleType};

use crate::domain::calendar::YearMonth;
use crate::domain::schedule_buckets::{schedules_for_cell, ScheduleBuckets};
use crate::services::date_utils::{format_date_for_display, format_time, WEEKDAY_LABELS};

const CELL_WIDTH: usize = 9;

/// A schedule as shown inside a day tile
#[derive(Debug, Clone, PartialEq)]
pub struct EventChip {
    pub id: i64,
    pub time: String,
    pub title: String,
    pub schedule_type: ScheduleType,
}

impl EventChip {
    fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id,
            time: format_time(&schedule.start_time),
            title: schedule.title.clone(),
            schedule_type: schedule.schedule_type,
        }
    }

    /// e.g. "09:00 Morning yoga"
    pub fn label(&self) -> String {
        format!("{} {}", self.time, self.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTile {
    pub day: u32,
    pub date: NaiveDate,
    pub date_key: String,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// At most three chips
    pub events: Vec<EventChip>,
    /// Count behind "+N more"
    pub more_count: usize,
    pub total: usize,
}

impl DayTile {
    pub fn more_label(&self) -> Option<String> {
        (self.more_count > 0).then(|| format!("+{} more", self.more_count))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarViewModel {
    pub title: String,
    pub weekday_labels: [&'static str; 7],
    /// Six rows of seven tiles, Sunday first
    pub weeks: Vec<Vec<DayTile>>,
    pub selected_date: String,
}

impl CalendarViewModel {
    pub fn tiles(&self) -> impl Iterator<Item = &DayTile> {
        self.weeks.iter().flatten()
    }

    pub fn tile(&self, date_key: &str) -> Option<&DayTile> {
        self.tiles().find(|tile| tile.date_key == date_key)
    }
}

pub fn render_calendar(
    month: YearMonth,
    grid: &[CalendarCell],
    buckets: &ScheduleBuckets,
    selected_date: &str,
) -> CalendarViewModel {
    let tiles: Vec<DayTile> = grid
        .iter()
        .map(|cell| {
            let capped = schedules_for_cell(buckets, cell.date);
            let date_key = cell.date_key();
            DayTile {
                day: cell.day,
                date: cell.date,
                is_selected: cell.is_current_month && date_key == selected_date,
                date_key,
                is_current_month: cell.is_current_month,
                is_today: cell.is_today,
                events: capped.visible().iter().map(EventChip::from_schedule).collect(),
                more_count: capped.hidden(),
                total: capped.total(),
            }
        })
        .collect();

    CalendarViewModel {
        title: month.title(),
        weekday_labels: WEEKDAY_LABELS,
        weeks: tiles.chunks(7).map(<[DayTile]>::to_vec).collect(),
        selected_date: selected_date.to_string(),
    }
}

/// Month grid for the terminal.
///
/// Adjacent-month days are shown in parentheses, today is marked with `#`,
/// the selected day with `>`, and `[n]` gives the number of schedules.
pub fn render_calendar_text(view: &CalendarViewModel) -> String {
    let mut out = String::new();
    let width = CELL_WIDTH * 7;

    let _ = writeln!(out, "{:^width$}", view.title, width = width);
    for label in view.weekday_labels {
        let _ = write!(out, "{:<w$}", label, w = CELL_WIDTH);
    }
    out.push('\n');

    for week in &view.weeks {
        for tile in week {
            let marker = if tile.is_selected {
                '>'
            } else if tile.is_today {
                '#'
            } else {
                ' '
            };
            let day = if tile.is_current_month {
                format!("{:>2}", tile.day)
            } else {
                format!("({})", tile.day)
            };
            let count = if tile.total > 0 {
                format!("[{}]", tile.total)
            } else {
                String::new()
            };
            let _ = write!(out, "{:<w$}", format!("{marker}{day}{count}"), w = CELL_WIDTH);
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

/// Every schedule of one day, as listed when a day is opened
pub fn render_day_text(date_key: &str, schedules: &[Schedule]) -> String {
    let mut out = format!("{}\n", format_date_for_display(date_key));

    if schedules.is_empty() {
        out.push_str("  No schedules");
        return out;
    }

    for schedule in schedules {
        let _ = write!(
            out,
            "  {}-{}  {} ({})",
            format_time(&schedule.start_time),
            format_time(&schedule.end_time),
            schedule.title,
            schedule.schedule_type.label()
        );
        if !schedule.trainer_name.is_empty() {
            let _ = write!(out, " with {}", schedule.trainer_name);
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}
