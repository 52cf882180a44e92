//! # Data Source Traits
//!
//! The controllers talk to the REST service through these traits so that
//! tests and the CLI can substitute their own implementations. `ApiClient`
//! implements all of them.

use std::path::Path;

use async_trait::async_trait;
use shared::{CreatePostRequest, Member, Post, Schedule};

use crate::domain::calendar::YearMonth;
use crate::services::api::ApiError;

/// Supplies an auth token for outgoing requests
///
/// The token store is the one piece of state shared between the client and
/// whoever logs in, so implementations must be thread safe.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;

    /// Remember a freshly issued token
    fn store(&self, token: String);

    /// Forget the token, e.g. after the server answered 401
    fn clear(&self);
}

/// Trait for loading the schedules of one calendar month
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// All schedules dated inside `month`
    async fn fetch_month_schedules(&self, month: YearMonth) -> Result<Vec<Schedule>, ApiError>;
}

/// Trait for the member list and the per-member activity feed
#[async_trait]
pub trait MemberSource: Send + Sync {
    async fn list_members(&self) -> Result<Vec<Member>, ApiError>;

    /// Posts for one member, newest first
    async fn member_posts(&self, member_id: i64) -> Result<Vec<Post>, ApiError>;

    async fn create_post(&self, request: &CreatePostRequest, image: Option<&Path>) -> Result<Post, ApiError>;

    async fn delete_post(&self, post_id: i64) -> Result<(), ApiError>;
}
