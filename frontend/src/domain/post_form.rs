//! Activity feed post form: content, optional workout metrics and image.

use std::path::{Path, PathBuf};

use shared::{CreatePostRequest, PostType};
use thiserror::Error;

const IMAGE_TYPES: [(&str, &str); 5] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PostFormError {
    #[error("Select a member first")]
    NoMemberSelected,
    #[error("Please write something")]
    EmptyContent,
    #[error("'{0}' is not a supported image (jpg, png, gif, webp)")]
    UnsupportedImage(String),
    #[error("Weight must be a positive number")]
    InvalidWeight,
}

/// MIME type for a supported image path, judged by extension
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostFormState {
    pub post_type: PostType,
    pub content: String,
    pub image: Option<PathBuf>,
    pub workout_duration: Option<u32>,
    pub calories_burned: Option<u32>,
    pub weight: Option<f64>,
}

/// A validated post ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct PostSubmission {
    pub request: CreatePostRequest,
    pub image: Option<PathBuf>,
}

impl PostFormState {
    pub fn validate(&self, member_id: Option<i64>) -> Vec<PostFormError> {
        let mut errors = Vec::new();

        if member_id.is_none() {
            errors.push(PostFormError::NoMemberSelected);
        }
        if self.content.trim().is_empty() {
            errors.push(PostFormError::EmptyContent);
        }
        if let Some(image) = &self.image {
            if image_mime_type(image).is_none() {
                errors.push(PostFormError::UnsupportedImage(image.display().to_string()));
            }
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                errors.push(PostFormError::InvalidWeight);
            }
        }

        errors
    }

    pub fn to_submission(&self, member_id: Option<i64>) -> Result<PostSubmission, Vec<PostFormError>> {
        let errors = self.validate(member_id);
        let member = match member_id {
            Some(member) if errors.is_empty() => member,
            _ => return Err(errors),
        };

        Ok(PostSubmission {
            request: CreatePostRequest {
                member,
                post_type: self.post_type,
                content: self.content.trim().to_string(),
                workout_duration: self.workout_duration,
                calories_burned: self.calories_burned,
                weight: self.weight,
            },
            image: self.image.clone(),
        })
    }

    /// Clear after a successful post; the post type sticks
    pub fn reset(&mut self) {
        *self = Self {
            post_type: self.post_type,
            ..Default::default()
        };
    }
}
