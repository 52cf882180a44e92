//! Monthly schedule panel: per-type totals and a day-by-day agenda.

use std::fmt::Write;

use shared::{Schedule, ScheduleType};

use crate::domain::calendar::YearMonth;
use crate::domain::schedule_buckets::MonthlySummary;
use crate::services::date_utils::{format_day_header, format_time};

#[derive(Debug, Clone, PartialEq)]
pub struct TypeCount {
    pub schedule_type: ScheduleType,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaLine {
    pub time_range: String,
    pub title: String,
    pub type_label: &'static str,
    pub trainer: Option<String>,
    /// "current/max" participants
    pub participants: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDay {
    pub header: String,
    pub lines: Vec<AgendaLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyScheduleView {
    pub title: String,
    pub total: usize,
    pub counts: Vec<TypeCount>,
    pub days: Vec<AgendaDay>,
}

impl MonthlyScheduleView {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn agenda_line(schedule: &Schedule) -> AgendaLine {
    AgendaLine {
        time_range: format!(
            "{}-{}",
            format_time(&schedule.start_time),
            format_time(&schedule.end_time)
        ),
        title: schedule.title.clone(),
        type_label: schedule.schedule_type.label(),
        trainer: (!schedule.trainer_name.is_empty()).then(|| schedule.trainer_name.clone()),
        participants: format!("{}/{}", schedule.participant_count, schedule.max_participants),
    }
}

pub fn render_monthly_schedule(month: YearMonth, summary: &MonthlySummary) -> MonthlyScheduleView {
    let counts = [
        (ScheduleType::Personal, summary.personal),
        (ScheduleType::Group, summary.group),
        (ScheduleType::Consultation, summary.consultation),
        (ScheduleType::Other, summary.other),
    ]
    .into_iter()
    .map(|(schedule_type, count)| TypeCount {
        schedule_type,
        label: schedule_type.label(),
        count,
    })
    .collect();

    let days = summary
        .days
        .iter()
        .map(|day| AgendaDay {
            header: format_day_header(day.date),
            lines: day.schedules.iter().map(agenda_line).collect(),
        })
        .collect();

    MonthlyScheduleView {
        title: format!("{} schedules", month.title()),
        total: summary.total,
        counts,
        days,
    }
}

pub fn render_monthly_text(view: &MonthlyScheduleView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} total)", view.title, view.total);

    if view.is_empty() {
        out.push_str("  No schedules this month");
        return out;
    }

    let counts: Vec<String> = view
        .counts
        .iter()
        .filter(|count| count.count > 0)
        .map(|count| format!("{}: {}", count.label, count.count))
        .collect();
    let _ = writeln!(out, "  {}", counts.join(" | "));

    for day in &view.days {
        let _ = writeln!(out, "\n{}", day.header);
        for line in &day.lines {
            let _ = write!(
                out,
                "  {}  {} [{}] {}",
                line.time_range, line.title, line.type_label, line.participants
            );
            if let Some(trainer) = &line.trainer {
                let _ = write!(out, " - {trainer}");
            }
            out.push('\n');
        }
    }

    out.trim_end().to_string()
}
