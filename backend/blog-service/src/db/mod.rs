/// Database access layer
///
/// This module provides:
/// - The `BlogStore` trait consumed by the service layer
/// - `PgStore`, the PostgreSQL implementation backed by the repositories below
/// - Connection pool creation
///
/// Stores return candidate records only. Visibility is decided by
/// [`crate::policy`] after loading, so the same row can become visible
/// between two requests without any write.
pub mod category_repo;
pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{
    Category, Comment, NewComment, NewPost, Post, PostChanges, PostFilter, ProfileChanges, User,
};

/// Persistence operations required by the blog services.
///
/// Each call is individually atomic; no cross-call transaction is assumed.
#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn ping(&self) -> Result<()>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn username_taken(&self, username: &str, except: Uuid) -> Result<bool>;
    async fn update_user(&self, user_id: Uuid, changes: &ProfileChanges) -> Result<Option<User>>;

    async fn find_category(&self, category_id: Uuid) -> Result<Option<Category>>;
    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;
    /// Candidate posts ordered by `pub_date` descending.
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>>;
    async fn create_post(&self, new_post: &NewPost) -> Result<Post>;
    async fn update_post(&self, post_id: Uuid, changes: &PostChanges) -> Result<Option<Post>>;
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>>;
    /// Comments of a post ordered by `created_at` ascending.
    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;
    async fn create_comment(&self, new_comment: &NewComment) -> Result<Comment>;
    async fn update_comment(&self, comment_id: Uuid, text: &str) -> Result<Option<Comment>>;
    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(user_repo::find_user_by_id(&self.pool, user_id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(user_repo::find_user_by_username(&self.pool, username).await?)
    }

    async fn username_taken(&self, username: &str, except: Uuid) -> Result<bool> {
        Ok(user_repo::username_taken(&self.pool, username, except).await?)
    }

    async fn update_user(&self, user_id: Uuid, changes: &ProfileChanges) -> Result<Option<User>> {
        Ok(user_repo::update_user(&self.pool, user_id, changes).await?)
    }

    async fn find_category(&self, category_id: Uuid) -> Result<Option<Category>> {
        Ok(category_repo::find_category_by_id(&self.pool, category_id).await?)
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        Ok(category_repo::find_category_by_slug(&self.pool, slug).await?)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::find_post_by_id(&self.pool, post_id).await?)
    }

    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>> {
        Ok(post_repo::find_posts(&self.pool, filter).await?)
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        Ok(post_repo::create_post(&self.pool, new_post).await?)
    }

    async fn update_post(&self, post_id: Uuid, changes: &PostChanges) -> Result<Option<Post>> {
        Ok(post_repo::update_post(&self.pool, post_id, changes).await?)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        Ok(post_repo::delete_post(&self.pool, post_id).await?)
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        Ok(comment_repo::get_comment_by_id(&self.pool, comment_id).await?)
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        Ok(comment_repo::get_comments_by_post(&self.pool, post_id).await?)
    }

    async fn create_comment(&self, new_comment: &NewComment) -> Result<Comment> {
        Ok(comment_repo::create_comment(&self.pool, new_comment).await?)
    }

    async fn update_comment(&self, comment_id: Uuid, text: &str) -> Result<Option<Comment>> {
        Ok(comment_repo::update_comment(&self.pool, comment_id, text).await?)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool> {
        Ok(comment_repo::delete_comment(&self.pool, comment_id).await?)
    }
}

/// Create a PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Creating database pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
}
