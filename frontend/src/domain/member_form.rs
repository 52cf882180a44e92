//! Member registration form: controlled state and validation.

use shared::{CreateMemberRequest, Gender};
use thiserror::Error;

use crate::services::date_utils::{get_current_date, parse_date_string};

const MAX_NAME_LENGTH: usize = 50;
const MAX_PHONE_LENGTH: usize = 15;
const MAX_EMERGENCY_CONTACT_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MemberFormError {
    #[error("Please enter the member's name")]
    MissingName,
    #[error("Name is too long (max {} characters)", MAX_NAME_LENGTH)]
    NameTooLong,
    #[error("Please enter a phone number")]
    MissingPhone,
    #[error("Phone number is too long (max {} characters)", MAX_PHONE_LENGTH)]
    PhoneTooLong,
    #[error("Phone number may only contain digits, spaces, '+' and '-'")]
    InvalidPhone,
    #[error("Please enter a join date")]
    MissingJoinDate,
    #[error("{field} '{value}' is not a valid date")]
    InvalidDate { field: &'static str, value: String },
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("Emergency contact is too long (max {} characters)", MAX_EMERGENCY_CONTACT_LENGTH)]
    EmergencyContactTooLong,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberFormState {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub gender: Gender,
    pub birth_date: String,
    pub join_date: String,
    pub trainer: Option<i64>,
    pub goals: String,
    pub health_notes: String,
    pub emergency_contact: String,
}

impl MemberFormState {
    /// Empty form with today's join date
    pub fn new() -> Self {
        Self::with_join_date(&get_current_date())
    }

    pub fn with_join_date(join_date: &str) -> Self {
        Self {
            join_date: join_date.to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Vec<MemberFormError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(MemberFormError::MissingName);
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(MemberFormError::NameTooLong);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(MemberFormError::MissingPhone);
        } else if phone.chars().count() > MAX_PHONE_LENGTH {
            errors.push(MemberFormError::PhoneTooLong);
        } else if !phone.chars().all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | ' ')) {
            errors.push(MemberFormError::InvalidPhone);
        }

        if self.join_date.trim().is_empty() {
            errors.push(MemberFormError::MissingJoinDate);
        } else if parse_date_string(&self.join_date).is_none() {
            errors.push(MemberFormError::InvalidDate {
                field: "Join date",
                value: self.join_date.clone(),
            });
        }

        let birth_date = self.birth_date.trim();
        if !birth_date.is_empty() && parse_date_string(birth_date).is_none() {
            errors.push(MemberFormError::InvalidDate {
                field: "Birth date",
                value: birth_date.to_string(),
            });
        }

        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(MemberFormError::InvalidEmail(email.to_string()));
        }

        if self.emergency_contact.trim().chars().count() > MAX_EMERGENCY_CONTACT_LENGTH {
            errors.push(MemberFormError::EmergencyContactTooLong);
        }

        errors
    }

    /// Build the create request, leaving blank optional fields out
    pub fn to_request(&self) -> Result<CreateMemberRequest, Vec<MemberFormError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateMemberRequest {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: non_blank(&self.email),
            gender: (self.gender != Gender::Unspecified).then_some(self.gender),
            birth_date: non_blank(&self.birth_date),
            join_date: self.join_date.trim().to_string(),
            trainer: self.trainer,
            goals: non_blank(&self.goals),
            health_notes: non_blank(&self.health_notes),
            emergency_contact: non_blank(&self.emergency_contact),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
