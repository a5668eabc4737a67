/// Post service - listings, detail pages and post mutations
use crate::db::BlogStore;
use crate::error::{AppError, Result};
use crate::models::{Category, Comment, NewPost, Post, PostChanges, PostFilter, PostForm};
use crate::policy::{Policy, Viewer};
use crate::services::Outcome;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// A post together with its comments
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// A published category and the posts in it the viewer may see
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub category: Category,
    pub posts: Vec<Post>,
}

pub struct PostService {
    store: Arc<dyn BlogStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    /// All posts visible to the viewer, newest publication first
    pub async fn index(&self, viewer: &Viewer) -> Result<Vec<Post>> {
        let candidates = self.store.list_posts(PostFilter::all()).await?;
        Ok(Policy::new(viewer).filter_visible(candidates))
    }

    /// Visible posts of a published category
    pub async fn category_posts(&self, viewer: &Viewer, slug: &str) -> Result<CategoryListing> {
        let policy = Policy::new(viewer);

        let category = self
            .store
            .find_category_by_slug(slug)
            .await?
            .filter(|category| policy.can_view_category(category))
            .ok_or_else(|| AppError::not_found(format!("category '{}'", slug)))?;

        let candidates = self
            .store
            .list_posts(PostFilter::in_category(category.id))
            .await?;

        Ok(CategoryListing {
            posts: policy.filter_visible(candidates),
            category,
        })
    }

    /// A post the viewer may see, or `None`
    pub async fn get_visible_post(&self, viewer: &Viewer, post_id: Uuid) -> Result<Option<Post>> {
        let post = self.store.find_post(post_id).await?;
        let policy = Policy::new(viewer);
        Ok(post.filter(|post| policy.can_view_post(post)))
    }

    pub async fn post_detail(&self, viewer: &Viewer, post_id: Uuid) -> Result<PostDetail> {
        let post = self
            .get_visible_post(viewer, post_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {}", post_id)))?;

        let policy = Policy::new(viewer);
        let mut comments = self.store.list_comments(post.id).await?;
        comments.retain(|comment| policy.can_view_comment(comment, &post));

        Ok(PostDetail { post, comments })
    }

    pub async fn create_post(&self, viewer: &Viewer, form: PostForm) -> Result<Outcome<Post>> {
        let Some(author_id) = viewer.user_id() else {
            return Ok(Outcome::Ignored);
        };

        let changes = self.validate(form).await?;
        let post = self
            .store
            .create_post(&NewPost {
                title: changes.title,
                text: changes.text,
                pub_date: changes.pub_date,
                author_id,
                category_id: changes.category_id,
                is_published: changes.is_published,
            })
            .await?;

        tracing::info!(post_id = %post.id, %author_id, "post created");
        Ok(Outcome::Applied(post))
    }

    /// Edit a post; non-owners are ignored before the form is looked at
    pub async fn edit_post(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        form: PostForm,
    ) -> Result<Outcome<Post>> {
        let post = self.find_post(post_id).await?;
        if !Policy::new(viewer).can_edit_post(&post) {
            return Ok(Outcome::Ignored);
        }

        let changes = self.validate(form).await?;
        let updated = self
            .store
            .update_post(post.id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {}", post_id)))?;

        tracing::info!(%post_id, "post updated");
        Ok(Outcome::Applied(updated))
    }

    pub async fn delete_post(&self, viewer: &Viewer, post_id: Uuid) -> Result<Outcome<()>> {
        let post = self.find_post(post_id).await?;
        if !Policy::new(viewer).can_delete_post(&post) {
            return Ok(Outcome::Ignored);
        }

        if self.store.delete_post(post.id).await? {
            tracing::info!(%post_id, "post deleted");
        }
        Ok(Outcome::Applied(()))
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post> {
        self.store
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {}", post_id)))
    }

    async fn validate(&self, form: PostForm) -> Result<PostChanges> {
        form.validate()?;
        let changes = form.into_changes(chrono::Utc::now());

        if let Some(category_id) = changes.category_id {
            if self.store.find_category(category_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "category {} does not exist",
                    category_id
                )));
            }
        }

        Ok(changes)
    }
}
