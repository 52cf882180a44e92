use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Kind of staff account on the gym backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    #[default]
    Trainer,
}

/// Staff user (trainers own schedules and author member posts)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub user_type: UserType,
    pub phone: String,
    pub profile_image: Option<String>,
    pub created_at: String,
}

impl User {
    /// Name to show in pickers, falling back to the username
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// Gym member as returned by the members endpoints.
///
/// The list endpoint only returns a subset of these fields, so every field
/// falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub gender: Gender,
    pub birth_date: Option<String>,
    pub age: Option<u32>,
    pub join_date: String,
    pub trainer: Option<i64>,
    pub trainer_name: Option<String>,
    pub goals: String,
    pub health_notes: String,
    pub emergency_contact: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Daily,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
    Pt,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Membership {
    pub id: i64,
    pub member: i64,
    pub member_name: String,
    pub membership_type: MembershipType,
    pub membership_type_display: String,
    pub start_date: String,
    pub end_date: String,
    pub remaining_sessions: u32,
    pub price: f64,
    pub is_active: bool,
    pub created_at: String,
}

/// Category of a schedule entry, used for colouring and monthly totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Personal,
    Group,
    Consultation,
    #[default]
    #[serde(other)]
    Other,
}

impl ScheduleType {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleType::Personal => "Personal PT",
            ScheduleType::Group => "Group class",
            ScheduleType::Consultation => "Consultation",
            ScheduleType::Other => "Other",
        }
    }

    /// Wire code, also used as the style class of calendar chips
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleType::Personal => "personal",
            ScheduleType::Group => "group",
            ScheduleType::Consultation => "consultation",
            ScheduleType::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "personal" => Some(ScheduleType::Personal),
            "group" => Some(ScheduleType::Group),
            "consultation" => Some(ScheduleType::Consultation),
            "other" => Some(ScheduleType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

/// A schedule record from the schedules endpoints.
///
/// Only `date` and `start_time` are interpreted by the calendar; everything
/// else is carried through to the views untouched. `date` is an ISO
/// `YYYY-MM-DD` string and `start_time` a zero-padded 24-hour time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub schedule_type: ScheduleType,
    pub schedule_type_display: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: Option<u32>,
    pub trainer: Option<i64>,
    pub trainer_name: String,
    pub members: Vec<i64>,
    pub members_detail: Vec<Member>,
    pub participant_count: u32,
    pub max_participants: u32,
    pub can_register: bool,
    pub status: ScheduleStatus,
    pub status_display: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Workout,
    Progress,
    Note,
}

impl PostType {
    pub fn label(&self) -> &'static str {
        match self {
            PostType::Workout => "Workout",
            PostType::Progress => "Progress",
            PostType::Note => "Note",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PostType::Workout => "workout",
            PostType::Progress => "progress",
            PostType::Note => "note",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "workout" => Some(PostType::Workout),
            "progress" => Some(PostType::Progress),
            "note" => Some(PostType::Note),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostComment {
    pub id: i64,
    pub author: Option<i64>,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

/// Entry in a member's activity feed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: i64,
    pub member: Option<i64>,
    pub member_name: String,
    pub author: Option<i64>,
    pub author_name: String,
    pub post_type: PostType,
    pub post_type_display: String,
    pub content: String,
    pub image: Option<String>,
    pub workout_duration: Option<u32>,
    pub calories_burned: Option<u32>,
    pub weight: Option<f64>,
    pub comments: Vec<PostComment>,
    pub comments_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Page envelope used by every list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// Request for creating a member
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub join_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

/// Partial update for a member; only the fields that are set get sent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMembershipRequest {
    pub member: i64,
    pub membership_type: MembershipType,
    pub start_date: String,
    pub end_date: String,
    pub remaining_sessions: u32,
    pub price: f64,
}

/// Request for creating a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schedule_type: ScheduleType,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub trainer: i64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub members: Vec<i64>,
    pub max_participants: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<ScheduleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinScheduleRequest {
    pub member_id: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinScheduleResponse {
    pub message: String,
}

/// Text part of a new post. The optional image travels separately as a
/// multipart file field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub member: i64,
    pub post_type: PostType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// One slot of the 42-cell month grid.
///
/// `day` is relative to the cell's own month, so leading and trailing cells
/// carry the day numbers of the adjacent months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
}

impl CalendarCell {
    /// ISO `YYYY-MM-DD` key used to join schedules onto the cell
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_list_payload_fills_missing_fields() {
        let json = r#"{
            "id": 7,
            "title": "Morning PT",
            "schedule_type": "personal",
            "date": "2024-03-05",
            "start_time": "09:00:00",
            "end_time": "10:00:00",
            "trainer_name": "Kim",
            "participant_count": 1,
            "max_participants": 1,
            "status": "no_show"
        }"#;

        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.id, 7);
        assert_eq!(schedule.schedule_type, ScheduleType::Personal);
        assert_eq!(schedule.status, ScheduleStatus::NoShow);
        assert!(schedule.description.is_empty());
        assert!(schedule.members.is_empty());
    }

    #[test]
    fn test_unknown_schedule_type_is_other() {
        let schedule: Schedule =
            serde_json::from_str(r#"{"schedule_type": "yoga", "date": "2024-03-05"}"#).unwrap();
        assert_eq!(schedule.schedule_type, ScheduleType::Other);
    }

    #[test]
    fn test_schedule_type_codes() {
        for kind in [
            ScheduleType::Personal,
            ScheduleType::Group,
            ScheduleType::Consultation,
            ScheduleType::Other,
        ] {
            assert_eq!(ScheduleType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ScheduleType::from_code("GROUP"), Some(ScheduleType::Group));
        assert_eq!(ScheduleType::from_code("spin"), None);
    }

    #[test]
    fn test_member_gender_codes() {
        let member: Member = serde_json::from_str(r#"{"id": 1, "name": "Lee", "gender": ""}"#).unwrap();
        assert_eq!(member.gender, Gender::Unspecified);

        let member: Member = serde_json::from_str(r#"{"id": 2, "gender": "F"}"#).unwrap();
        assert_eq!(member.gender, Gender::Female);
    }

    #[test]
    fn test_paginated_envelope() {
        let page: Paginated<Member> = serde_json::from_str(
            r#"{"count": 1, "next": null, "results": [{"id": 3, "name": "Park", "is_active": true}]}"#,
        )
        .unwrap();
        assert_eq!(page.count, 1);
        assert!(page.previous.is_none());
        assert_eq!(page.results[0].name, "Park");
        assert!(page.results[0].is_active);
    }

    #[test]
    fn test_create_member_request_skips_unset_fields() {
        let request = CreateMemberRequest {
            name: "Choi".to_string(),
            phone: "010-1234-5678".to_string(),
            join_date: "2024-03-01".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(!object.contains_key("email"));
    }

    #[test]
    fn test_user_display_name_falls_back_to_username() {
        let mut user = User {
            username: "coach".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "coach");

        user.full_name = "Coach Han".to_string();
        assert_eq!(user.display_name(), "Coach Han");
    }

    #[test]
    fn test_calendar_cell_date_key() {
        let cell = CalendarCell {
            day: 5,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            is_current_month: true,
            is_today: false,
        };
        assert_eq!(cell.date_key(), "2024-03-05");
    }
}
