//! Member list and member detail with activity feed.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use shared::{Member, Post};

use crate::services::date_utils::{format_date_for_display, time_ago};

#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub id: i64,
    pub type_label: &'static str,
    pub author: String,
    pub content: String,
    pub posted: String,
    pub image_url: Option<String>,
    /// e.g. "45 min", "320 kcal", "71.5 kg"
    pub metrics: Vec<String>,
    pub comments_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDetailView {
    pub name: String,
    pub phone: String,
    pub joined: String,
    pub trainer: Option<String>,
    pub goals: Option<String>,
    pub posts: Vec<PostCard>,
}

fn post_card<F>(post: &Post, now: DateTime<Utc>, resolve_image: &F) -> PostCard
where
    F: Fn(Option<&str>) -> Option<String>,
{
    let mut metrics = Vec::new();
    if let Some(minutes) = post.workout_duration {
        metrics.push(format!("{minutes} min"));
    }
    if let Some(calories) = post.calories_burned {
        metrics.push(format!("{calories} kcal"));
    }
    if let Some(weight) = post.weight {
        metrics.push(format!("{weight} kg"));
    }

    PostCard {
        id: post.id,
        type_label: post.post_type.label(),
        author: post.author_name.clone(),
        content: post.content.clone(),
        posted: time_ago(&post.created_at, now),
        image_url: resolve_image(post.image.as_deref()),
        metrics,
        comments_count: post.comments.len().max(post.comments_count as usize),
    }
}

/// Build the detail view. `resolve_image` turns a stored media path into a URL.
pub fn render_member_detail<F>(member: &Member, posts: &[Post], now: DateTime<Utc>, resolve_image: F) -> MemberDetailView
where
    F: Fn(Option<&str>) -> Option<String>,
{
    MemberDetailView {
        name: member.name.clone(),
        phone: member.phone.clone(),
        joined: format_date_for_display(&member.join_date),
        trainer: member.trainer_name.clone().filter(|name| !name.is_empty()),
        goals: (!member.goals.trim().is_empty()).then(|| member.goals.trim().to_string()),
        posts: posts.iter().map(|post| post_card(post, now, &resolve_image)).collect(),
    }
}

pub fn render_member_detail_text(view: &MemberDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", view.name, view.phone);
    let _ = writeln!(out, "  Joined {}", view.joined);
    if let Some(trainer) = &view.trainer {
        let _ = writeln!(out, "  Trainer: {trainer}");
    }
    if let Some(goals) = &view.goals {
        let _ = writeln!(out, "  Goals: {goals}");
    }

    if view.posts.is_empty() {
        out.push_str("\n  No posts yet");
        return out;
    }

    for post in &view.posts {
        let _ = write!(out, "\n#{} [{}] {}", post.id, post.type_label, post.posted);
        if !post.author.is_empty() {
            let _ = write!(out, " by {}", post.author);
        }
        let _ = writeln!(out, "\n  {}", post.content);
        if !post.metrics.is_empty() {
            let _ = writeln!(out, "  {}", post.metrics.join(" · "));
        }
        if let Some(url) = &post.image_url {
            let _ = writeln!(out, "  Image: {url}");
        }
        if post.comments_count > 0 {
            let _ = writeln!(out, "  {} comment(s)", post.comments_count);
        }
    }

    out.trim_end().to_string()
}

/// One line per member, marking the selected one
pub fn render_member_list_text(members: &[Member], selected: Option<i64>) -> String {
    if members.is_empty() {
        return "No members yet".to_string();
    }

    members
        .iter()
        .map(|member| {
            let marker = if Some(member.id) == selected { '>' } else { ' ' };
            let status = if member.is_active { "" } else { " (inactive)" };
            format!("{marker}{:>4}  {:<20} {}{}", member.id, member.name, member.phone, status)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::{PostComment, PostType};

    fn member() -> Member {
        Member {
            id: 3,
            name: "Jiwoo Park".to_string(),
            phone: "010-1234-5678".to_string(),
            join_date: "2024-01-15".to_string(),
            trainer_name: Some("Coach Kim".to_string()),
            goals: "  Lose 5kg ".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_detail_view() {
        let post = Post {
            id: 10,
            post_type: PostType::Workout,
            author_name: "Coach Kim".to_string(),
            content: "Leg day".to_string(),
            image: Some("/media/posts/legs.jpg".to_string()),
            workout_duration: Some(45),
            calories_burned: Some(320),
            comments: vec![PostComment::default()],
            created_at: "2024-03-05T10:00:00Z".to_string(),
            ..Default::default()
        };

        let view = render_member_detail(&member(), &[post], now(), |path| {
            path.map(|p| format!("http://media.test{p}"))
        });

        assert_eq!(view.joined, "January 15, 2024");
        assert_eq!(view.goals.as_deref(), Some("Lose 5kg"));
        let card = &view.posts[0];
        assert_eq!(card.posted, "2 hours ago");
        assert_eq!(card.metrics, vec!["45 min", "320 kcal"]);
        assert_eq!(card.image_url.as_deref(), Some("http://media.test/media/posts/legs.jpg"));
        assert_eq!(card.comments_count, 1);

        let text = render_member_detail_text(&view);
        assert!(text.starts_with("Jiwoo Park (010-1234-5678)"));
        assert!(text.contains("Trainer: Coach Kim"));
        assert!(text.contains("#10 [Workout] 2 hours ago by Coach Kim"));
        assert!(text.contains("45 min · 320 kcal"));
    }

    #[test]
    fn test_empty_feed() {
        let view = render_member_detail(&member(), &[], now(), |_| None);
        assert!(render_member_detail_text(&view).ends_with("No posts yet"));
    }

    #[test]
    fn test_member_list() {
        let mut inactive = member();
        inactive.id = 4;
        inactive.name = "Minho".to_string();
        inactive.is_active = false;

        let text = render_member_list_text(&[member(), inactive], Some(3));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with(">   3  Jiwoo Park"));
        assert!(lines[1].ends_with("(inactive)"));
        assert_eq!(render_member_list_text(&[], None), "No members yet");
    }
}
