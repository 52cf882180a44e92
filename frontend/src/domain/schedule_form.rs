//! Schedule form logic for the gym scheduler.
//!
//! Holds the controlled state of the "new schedule" form, the defaults that
//! follow from other fields (end time, participant cap), and the validation
//! that gates submission. The view only mirrors this state.

use chrono::{NaiveTime, Timelike};
use shared::{CreateScheduleRequest, ScheduleType, User};
use thiserror::Error;

use crate::services::date_utils::{get_current_time_string, parse_date_string, parse_time};

/// Limits enforced before a schedule is submitted
#[derive(Debug, Clone)]
pub struct ScheduleFormConfig {
    pub max_title_length: usize,
    pub group_capacity: u32,
    pub default_duration_minutes: u32,
}

impl Default for ScheduleFormConfig {
    fn default() -> Self {
        Self {
            max_title_length: 100,
            group_capacity: 10,
            default_duration_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleFormError {
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Title is too long ({0} characters)")]
    TitleTooLong(usize),
    #[error("Please pick a date")]
    MissingDate,
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),
    #[error("Please enter a start time")]
    MissingStartTime,
    #[error("Please enter an end time")]
    MissingEndTime,
    #[error("'{0}' is not a valid time")]
    InvalidTime(String),
    #[error("End time must be after the start time")]
    EndNotAfterStart,
    #[error("Please choose a trainer")]
    MissingTrainer,
    #[error("At least one participant must be allowed")]
    NoCapacity,
}

/// Controlled state of the schedule form
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleFormState {
    pub title: String,
    pub description: String,
    pub schedule_type: ScheduleType,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub trainer: Option<i64>,
    pub members: Vec<i64>,
    pub max_participants: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleFormValidation {
    pub is_valid: bool,
    pub errors: Vec<ScheduleFormError>,
}

/// Schedule form service that owns defaults and validation rules
#[derive(Debug, Clone, Default)]
pub struct ScheduleFormService {
    config: ScheduleFormConfig,
}

impl ScheduleFormService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScheduleFormConfig) -> Self {
        Self { config }
    }

    /// Fresh form for the selected date starting now
    pub fn create_form_state(&self, selected_date: &str) -> ScheduleFormState {
        self.create_form_state_at(selected_date, &get_current_time_string())
    }

    pub fn create_form_state_at(&self, selected_date: &str, start_time: &str) -> ScheduleFormState {
        let mut state = ScheduleFormState {
            title: String::new(),
            description: String::new(),
            schedule_type: ScheduleType::Personal,
            date: selected_date.to_string(),
            start_time: String::new(),
            end_time: String::new(),
            trainer: None,
            members: Vec::new(),
            max_participants: 1,
        };
        self.set_start_time(&mut state, start_time);
        state
    }

    /// Update the start time and move the end time to the default duration after it
    pub fn set_start_time(&self, state: &mut ScheduleFormState, start_time: &str) {
        state.start_time = start_time.trim().to_string();
        if let Some(end) = self.default_end_time(&state.start_time) {
            state.end_time = end;
        }
    }

    /// Default end time for a start time, kept on the same day
    pub fn default_end_time(&self, start_time: &str) -> Option<String> {
        let start = parse_time(start_time)?;
        let start_minutes = start.hour() * 60 + start.minute();
        let end_minutes = (start_minutes + self.config.default_duration_minutes).min(23 * 60 + 59);
        let end = NaiveTime::from_hms_opt(end_minutes / 60, end_minutes % 60, 0)?;
        Some(end.format("%H:%M").to_string())
    }

    /// Change the schedule type; one-on-one types are capped at a single participant
    pub fn set_schedule_type(&self, state: &mut ScheduleFormState, schedule_type: ScheduleType) {
        state.schedule_type = schedule_type;
        match schedule_type {
            ScheduleType::Personal | ScheduleType::Consultation => state.max_participants = 1,
            ScheduleType::Group => state.max_participants = self.config.group_capacity,
            ScheduleType::Other => {}
        }
    }

    /// Follow the calendar's selected date
    pub fn set_date(&self, state: &mut ScheduleFormState, date: &str) {
        state.date = date.to_string();
    }

    /// Pick the first trainer when none is chosen yet
    pub fn select_default_trainer(&self, state: &mut ScheduleFormState, trainers: &[User]) {
        if state.trainer.is_none() {
            state.trainer = trainers.first().map(|trainer| trainer.id);
        }
    }

    /// Clear the per-entry fields after a successful submit, keeping date, type and trainer
    pub fn reset_after_submit(&self, state: &mut ScheduleFormState, now: &str) {
        state.title.clear();
        state.description.clear();
        state.members.clear();
        self.set_start_time(state, now);
    }

    pub fn validate(&self, state: &ScheduleFormState) -> ScheduleFormValidation {
        let mut errors = Vec::new();

        let title = state.title.trim();
        if title.is_empty() {
            errors.push(ScheduleFormError::MissingTitle);
        } else if title.chars().count() > self.config.max_title_length {
            errors.push(ScheduleFormError::TitleTooLong(title.chars().count()));
        }

        if state.date.trim().is_empty() {
            errors.push(ScheduleFormError::MissingDate);
        } else if parse_date_string(&state.date).is_none() {
            errors.push(ScheduleFormError::InvalidDate(state.date.clone()));
        }

        let start = self.check_time(&state.start_time, ScheduleFormError::MissingStartTime, &mut errors);
        let end = self.check_time(&state.end_time, ScheduleFormError::MissingEndTime, &mut errors);
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push(ScheduleFormError::EndNotAfterStart);
            }
        }

        if state.trainer.is_none() {
            errors.push(ScheduleFormError::MissingTrainer);
        }

        if state.max_participants == 0 {
            errors.push(ScheduleFormError::NoCapacity);
        }

        ScheduleFormValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    fn check_time(
        &self,
        value: &str,
        missing: ScheduleFormError,
        errors: &mut Vec<ScheduleFormError>,
    ) -> Option<NaiveTime> {
        if value.trim().is_empty() {
            errors.push(missing);
            return None;
        }
        let parsed = parse_time(value);
        if parsed.is_none() {
            errors.push(ScheduleFormError::InvalidTime(value.to_string()));
        }
        parsed
    }

    /// Build the request for a valid form, or return every validation error
    pub fn create_schedule_request(
        &self,
        state: &ScheduleFormState,
    ) -> Result<CreateScheduleRequest, Vec<ScheduleFormError>> {
        let validation = self.validate(state);
        let trainer = match state.trainer {
            Some(trainer) if validation.is_valid => trainer,
            _ => return Err(validation.errors),
        };

        let description = state.description.trim();
        Ok(CreateScheduleRequest {
            title: state.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            schedule_type: state.schedule_type,
            date: state.date.trim().to_string(),
            start_time: state.start_time.clone(),
            end_time: state.end_time.clone(),
            trainer,
            members: state.members.clone(),
            max_participants: state.max_participants,
        })
    }

    /// Success message for a created schedule
    pub fn generate_success_message(&self, title: &str) -> String {
        format!("Schedule '{}' created", title)
    }

    /// Get the first error message (for displaying single error)
    pub fn get_first_error_message(&self, errors: &[ScheduleFormError]) -> Option<String> {
        errors.first().map(|e| e.to_string())
    }
}
