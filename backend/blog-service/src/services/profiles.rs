/// Profile service - author pages and self-service profile edits
use crate::db::BlogStore;
use crate::error::{AppError, Result};
use crate::models::{Post, PostFilter, ProfileChanges, ProfileForm, User};
use crate::policy::{Policy, Viewer};
use crate::services::Outcome;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// A user and the posts of theirs the viewer may see
#[derive(Debug, Clone, Serialize)]
pub struct ProfileListing {
    pub profile: User,
    pub posts: Vec<Post>,
}

pub struct ProfileService {
    store: Arc<dyn BlogStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    pub async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.store.find_user(user_id).await
    }

    /// The author sees every post of theirs; everyone else sees visible ones
    pub async fn profile(&self, viewer: &Viewer, username: &str) -> Result<ProfileListing> {
        let profile = self.find_by_username(username).await?;
        let candidates = self
            .store
            .list_posts(PostFilter::by_author(profile.id))
            .await?;

        Ok(ProfileListing {
            posts: Policy::new(viewer).filter_visible(candidates),
            profile,
        })
    }

    pub async fn edit_profile(
        &self,
        viewer: &Viewer,
        username: &str,
        form: ProfileForm,
    ) -> Result<Outcome<User>> {
        let profile = self.find_by_username(username).await?;
        if !Policy::new(viewer).can_edit_profile(&profile) {
            return Ok(Outcome::Ignored);
        }

        form.validate()?;
        let changes = ProfileChanges::from(form);
        if self
            .store
            .username_taken(&changes.username, profile.id)
            .await?
        {
            return Err(AppError::Validation(format!(
                "username '{}' is already taken",
                changes.username
            )));
        }

        let updated = self
            .store
            .update_user(profile.id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user '{}'", username)))?;

        tracing::info!(user_id = %updated.id, "profile updated");
        Ok(Outcome::Applied(updated))
    }

    async fn find_by_username(&self, username: &str) -> Result<User> {
        self.store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user '{}'", username)))
    }
}
