//! Members view controller: member list, selected member, activity feed and
//! the new-post form.

use chrono::{DateTime, Utc};
use shared::{Member, Post};

use crate::components::member_detail::{render_member_detail, MemberDetailView};
use crate::domain::post_form::PostFormState;
use crate::hooks::use_calendar::FetchOutcome;
use crate::services::api::ApiError;
use crate::services::traits::MemberSource;

/// Identifies one feed fetch for one member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedTicket {
    member_id: i64,
    sequence: u64,
}

impl FeedTicket {
    pub fn member_id(&self) -> i64 {
        self.member_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct MembersController {
    members: Vec<Member>,
    selected: Option<i64>,
    posts: Vec<Post>,
    form: PostFormState,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    next_sequence: u64,
    latest_feed: Option<FeedTicket>,
}

impl MembersController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected_member(&self) -> Option<&Member> {
        let id = self.selected?;
        self.members.iter().find(|member| member.id == id)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn form(&self) -> &PostFormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PostFormState {
        &mut self.form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Confirmation of the last successful mutation
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn fail(&mut self, context: &str, error: ApiError) {
        log::error!("{}: {}", context, error);
        self.error = Some(error.user_message());
    }

    pub async fn load_members(&mut self, source: &dyn MemberSource) -> bool {
        self.loading = true;
        let result = source.list_members().await;
        self.loading = false;

        match result {
            Ok(members) => {
                log::info!("Loaded {} members", members.len());
                self.members = members;
                self.error = None;
                if self.selected.is_some() && self.selected_member().is_none() {
                    self.selected = None;
                    self.posts.clear();
                    self.latest_feed = None;
                }
                true
            }
            Err(e) => {
                self.fail("Failed to load members", e);
                false
            }
        }
    }

    /// Switch to another member. Returns `None` if the member is not in the list.
    pub fn select_member(&mut self, member_id: i64) -> Option<FeedTicket> {
        if !self.members.iter().any(|member| member.id == member_id) {
            log::warn!("Member {} is not in the loaded list", member_id);
            return None;
        }

        if self.selected != Some(member_id) {
            self.selected = Some(member_id);
            self.posts.clear();
            self.form.reset();
        }
        Some(self.begin_feed_fetch(member_id))
    }

    fn begin_feed_fetch(&mut self, member_id: i64) -> FeedTicket {
        self.next_sequence += 1;
        let ticket = FeedTicket {
            member_id,
            sequence: self.next_sequence,
        };
        self.latest_feed = Some(ticket);
        self.loading = true;
        ticket
    }

    /// Apply a feed result unless the user has moved on to another member or a newer fetch
    pub fn apply_feed(&mut self, ticket: FeedTicket, result: Result<Vec<Post>, ApiError>) -> FetchOutcome {
        if self.latest_feed != Some(ticket) || self.selected != Some(ticket.member_id) {
            log::warn!("Discarding stale feed for member {}", ticket.member_id);
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(posts) => {
                self.posts = posts;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                self.fail("Failed to load posts", e);
                FetchOutcome::Failed
            }
        }
    }

    /// Select a member and load their feed
    pub async fn open_member(&mut self, source: &dyn MemberSource, member_id: i64) -> FetchOutcome {
        let Some(ticket) = self.select_member(member_id) else {
            self.error = Some(format!("Member {member_id} not found"));
            return FetchOutcome::Failed;
        };
        let result = source.member_posts(member_id).await;
        self.apply_feed(ticket, result)
    }

    /// Reload the selected member's feed
    pub async fn refresh_feed(&mut self, source: &dyn MemberSource) -> Option<FetchOutcome> {
        let member_id = self.selected?;
        let ticket = self.begin_feed_fetch(member_id);
        let result = source.member_posts(member_id).await;
        Some(self.apply_feed(ticket, result))
    }

    /// Validate and upload the post form for the selected member, then reload the feed
    pub async fn submit_post(&mut self, source: &dyn MemberSource) -> bool {
        self.notice = None;
        let submission = match self.form.to_submission(self.selected) {
            Ok(submission) => submission,
            Err(errors) => {
                self.error = errors.first().map(ToString::to_string);
                return false;
            }
        };

        match source
            .create_post(&submission.request, submission.image.as_deref())
            .await
        {
            Ok(post) => {
                log::info!("Created post {} for member {}", post.id, submission.request.member);
                self.form.reset();
                self.error = None;
                self.notice = Some("Post added".to_string());
                self.refresh_feed(source).await;
                true
            }
            Err(e) => {
                self.fail("Failed to create post", e);
                false
            }
        }
    }

    pub async fn delete_post(&mut self, source: &dyn MemberSource, post_id: i64) -> bool {
        self.notice = None;
        match source.delete_post(post_id).await {
            Ok(()) => {
                log::info!("Deleted post {}", post_id);
                self.notice = Some("Post deleted".to_string());
                self.refresh_feed(source).await;
                true
            }
            Err(e) => {
                self.fail("Failed to delete post", e);
                false
            }
        }
    }

    pub fn render_detail<F>(&self, now: DateTime<Utc>, resolve_image: F) -> Option<MemberDetailView>
    where
        F: Fn(Option<&str>) -> Option<String>,
    {
        let member = self.selected_member()?;
        Some(render_member_detail(member, &self.posts, now, resolve_image))
    }
}
