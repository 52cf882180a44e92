//! Schedule organisation by calendar date.
//!
//! The calendar view and the monthly summary both need the month's schedules
//! grouped per day and ordered by start time. Grouping happens once per data
//! refresh; cells then look up their bucket by date-key.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::{Schedule, ScheduleType};

use crate::services::date_utils::{parse_date_string, to_date_key};

/// How many schedules a calendar cell shows before collapsing into "+N more"
pub const MAX_VISIBLE_SCHEDULES: usize = 3;

/// Schedules grouped by ISO date-key, each group sorted by start time
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleBuckets {
    buckets: BTreeMap<String, Vec<Schedule>>,
    skipped: usize,
}

impl ScheduleBuckets {
    /// Full bucket for a date-key; empty when nothing is scheduled
    pub fn get(&self, date_key: &str) -> &[Schedule] {
        self.buckets.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records dropped because their `date` was missing or malformed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of dates with at least one schedule
    pub fn day_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn schedule_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Schedule])> {
        self.buckets.iter().map(|(key, bucket)| (key.as_str(), bucket.as_slice()))
    }
}

/// Group schedules by date and order each day by start time.
///
/// Every record with a usable date is kept, duplicates included. The sort is
/// stable, so records sharing a start time keep their input order. Records
/// without a parseable `date` are skipped and counted instead of failing the
/// whole render.
pub fn bucketize(schedules: &[Schedule]) -> ScheduleBuckets {
    let mut buckets: BTreeMap<String, Vec<Schedule>> = BTreeMap::new();
    let mut skipped = 0;

    for schedule in schedules {
        match parse_date_string(&schedule.date) {
            Some(date) => buckets
                .entry(to_date_key(date))
                .or_default()
                .push(schedule.clone()),
            None => skipped += 1,
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }

    if skipped > 0 {
        log::warn!("Skipped {} schedule(s) without a valid date", skipped);
    }

    ScheduleBuckets { buckets, skipped }
}

/// A cell's schedules with the presentation cap applied.
///
/// Capping only affects `visible`; `all` and `total` always reflect the
/// whole bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CappedSchedules<'a> {
    all: &'a [Schedule],
}

impl<'a> CappedSchedules<'a> {
    pub fn visible(&self) -> &'a [Schedule] {
        let all = self.all;
        &all[..all.len().min(MAX_VISIBLE_SCHEDULES)]
    }

    /// Count behind the "+N more" indicator
    pub fn hidden(&self) -> usize {
        self.all.len().saturating_sub(MAX_VISIBLE_SCHEDULES)
    }

    pub fn all(&self) -> &'a [Schedule] {
        self.all
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Look up the schedules for a calendar cell's date
pub fn schedules_for_cell(buckets: &ScheduleBuckets, cell_date: NaiveDate) -> CappedSchedules<'_> {
    CappedSchedules {
        all: buckets.get(&to_date_key(cell_date)),
    }
}

/// One day of the monthly agenda
#[derive(Debug, Clone, PartialEq)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub schedules: Vec<Schedule>,
}

/// Totals and day-by-day agenda shown under the calendar
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlySummary {
    pub total: usize,
    pub personal: usize,
    pub group: usize,
    pub consultation: usize,
    pub other: usize,
    pub days: Vec<DayAgenda>,
}

impl MonthlySummary {
    pub fn from_buckets(buckets: &ScheduleBuckets) -> Self {
        let mut summary = MonthlySummary::default();

        for (key, bucket) in buckets.iter() {
            let Some(date) = parse_date_string(key) else {
                continue;
            };

            for schedule in bucket {
                summary.total += 1;
                match schedule.schedule_type {
                    ScheduleType::Personal => summary.personal += 1,
                    ScheduleType::Group => summary.group += 1,
                    ScheduleType::Consultation => summary.consultation += 1,
                    ScheduleType::Other => summary.other += 1,
                }
            }

            summary.days.push(DayAgenda {
                date,
                schedules: bucket.to_vec(),
            });
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(id: i64, date: &str, start_time: &str) -> Schedule {
        Schedule {
            id,
            title: format!("Session {}", id),
            date: date.to_string(),
            start_time: start_time.to_string(),
            ..Default::default()
        }
    }

    fn ids(schedules: &[Schedule]) -> Vec<i64> {
        schedules.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_bucket_sorted_by_start_time() {
        let schedules = vec![
            schedule(1, "2024-03-05", "14:00"),
            schedule(2, "2024-03-05", "09:00"),
        ];

        let buckets = bucketize(&schedules);
        assert_eq!(ids(buckets.get("2024-03-05")), vec![2, 1]);
    }

    #[test]
    fn test_equal_start_times_keep_input_order() {
        let schedules = vec![
            schedule(1, "2024-03-05", "10:00"),
            schedule(2, "2024-03-05", "08:00"),
            schedule(3, "2024-03-05", "10:00"),
            schedule(4, "2024-03-05", "10:00"),
        ];

        let buckets = bucketize(&schedules);
        assert_eq!(ids(buckets.get("2024-03-05")), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_groups_by_date_without_dropping_duplicates() {
        let schedules = vec![
            schedule(1, "2024-03-05", "09:00"),
            schedule(1, "2024-03-05", "09:00"),
            schedule(2, "2024-03-06", "11:00"),
        ];

        let buckets = bucketize(&schedules);
        assert_eq!(buckets.day_count(), 2);
        assert_eq!(buckets.schedule_count(), 3);
        assert_eq!(buckets.get("2024-03-05").len(), 2);
        assert!(buckets.get("2024-03-07").is_empty());
    }

    #[test]
    fn test_start_times_non_decreasing_in_every_bucket() {
        let schedules = vec![
            schedule(1, "2024-03-05", "18:30"),
            schedule(2, "2024-03-06", "07:00"),
            schedule(3, "2024-03-05", "06:15"),
            schedule(4, "2024-03-06", "06:59"),
            schedule(5, "2024-03-05", "12:00"),
        ];

        let buckets = bucketize(&schedules);
        for (_, bucket) in buckets.iter() {
            for pair in bucket.windows(2) {
                assert!(pair[0].start_time <= pair[1].start_time);
            }
        }
    }

    #[test]
    fn test_bucketize_is_idempotent() {
        let schedules = vec![
            schedule(1, "2024-03-05", "14:00"),
            schedule(2, "2024-03-04", "09:00"),
            schedule(3, "2024-03-05", "09:00"),
        ];

        assert_eq!(bucketize(&schedules), bucketize(&schedules));
    }

    #[test]
    fn test_records_without_date_are_skipped_and_counted() {
        let schedules = vec![
            schedule(1, "", "09:00"),
            schedule(2, "not-a-date", "09:00"),
            schedule(3, "2024-03-05", "09:00"),
        ];

        let buckets = bucketize(&schedules);
        assert_eq!(buckets.skipped(), 2);
        assert_eq!(buckets.schedule_count(), 1);
    }

    #[test]
    fn test_capped_view_keeps_full_bucket() {
        let schedules: Vec<_> = (1..=5)
            .map(|id| schedule(id, "2024-03-05", &format!("{:02}:00", 8 + id)))
            .collect();
        let buckets = bucketize(&schedules);
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let capped = schedules_for_cell(&buckets, date);
        assert_eq!(ids(capped.visible()), vec![1, 2, 3]);
        assert_eq!(capped.hidden(), 2);
        assert_eq!(capped.total(), 5);
        assert_eq!(capped.all().len(), 5);
        assert_eq!(buckets.get("2024-03-05").len(), 5);
    }

    #[test]
    fn test_capped_view_for_empty_and_small_days() {
        let buckets = bucketize(&[schedule(1, "2024-03-05", "09:00")]);

        let empty = schedules_for_cell(&buckets, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert!(empty.is_empty());
        assert_eq!(empty.hidden(), 0);

        let single = schedules_for_cell(&buckets, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(single.visible().len(), 1);
        assert_eq!(single.hidden(), 0);
    }

    #[test]
    fn test_monthly_summary_counts_by_type() {
        let mut group = schedule(2, "2024-03-05", "18:00");
        group.schedule_type = ScheduleType::Group;
        let mut consult = schedule(3, "2024-03-01", "10:00");
        consult.schedule_type = ScheduleType::Consultation;
        let mut personal = schedule(1, "2024-03-05", "09:00");
        personal.schedule_type = ScheduleType::Personal;

        let summary = MonthlySummary::from_buckets(&bucketize(&[group, consult, personal]));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.personal, 1);
        assert_eq!(summary.group, 1);
        assert_eq!(summary.consultation, 1);
        assert_eq!(summary.other, 0);

        let dates: Vec<_> = summary.days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-05"]);
        assert_eq!(ids(&summary.days[1].schedules), vec![1, 2]);
    }
}
