/// Comment service - handles comment creation and author-only changes
use crate::db::BlogStore;
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentForm, NewComment};
use crate::policy::{Policy, Viewer};
use crate::services::Outcome;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct CommentService {
    store: Arc<dyn BlogStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    /// Comment on a post the viewer can see
    pub async fn add_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        form: CommentForm,
    ) -> Result<Outcome<Comment>> {
        let policy = Policy::new(viewer);
        let post = self
            .store
            .find_post(post_id)
            .await?
            .filter(|post| policy.can_view_post(post))
            .ok_or_else(|| AppError::not_found(format!("post {}", post_id)))?;

        let Some(author_id) = viewer.user_id() else {
            return Ok(Outcome::Ignored);
        };

        form.validate()?;
        let comment = self
            .store
            .create_comment(&NewComment {
                post_id: post.id,
                author_id,
                text: form.text,
            })
            .await?;

        tracing::info!(comment_id = %comment.id, %post_id, "comment added");
        Ok(Outcome::Applied(comment))
    }

    pub async fn edit_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
        form: CommentForm,
    ) -> Result<Outcome<Comment>> {
        let comment = self.find_comment(post_id, comment_id).await?;
        if !Policy::new(viewer).can_edit_comment(&comment) {
            return Ok(Outcome::Ignored);
        }

        form.validate()?;
        let updated = self
            .store
            .update_comment(comment.id, &form.text)
            .await?
            .ok_or_else(|| AppError::not_found(format!("comment {}", comment_id)))?;

        tracing::info!(%comment_id, %post_id, "comment updated");
        Ok(Outcome::Applied(updated))
    }

    pub async fn delete_comment(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Outcome<()>> {
        let comment = self.find_comment(post_id, comment_id).await?;
        if !Policy::new(viewer).can_delete_comment(&comment) {
            return Ok(Outcome::Ignored);
        }

        if self.store.delete_comment(comment.id).await? {
            tracing::info!(%comment_id, %post_id, "comment deleted");
        }
        Ok(Outcome::Applied(()))
    }

    /// A comment addressed through a post it does not belong to is not found
    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment> {
        self.store
            .find_comment(comment_id)
            .await?
            .filter(|comment| comment.post_id == post_id)
            .ok_or_else(|| AppError::not_found(format!("comment {}", comment_id)))
    }
}
