use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{PostChanges, ProfileChanges};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn default_published() -> bool {
    true
}

/// Post create/edit form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(max = 256), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    /// Defaults to the submission time
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

impl PostForm {
    pub fn into_changes(self, now: DateTime<Utc>) -> PostChanges {
        PostChanges {
            title: self.title.trim().to_string(),
            text: self.text,
            pub_date: self.pub_date.unwrap_or(now),
            category_id: self.category_id,
            is_published: self.is_published,
        }
    }
}

/// Comment create/edit form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

/// Profile edit form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
}

impl From<ProfileForm> for ProfileChanges {
    fn from(form: ProfileForm) -> Self {
        ProfileChanges {
            username: form.username.trim().to_string(),
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
        }
    }
}
