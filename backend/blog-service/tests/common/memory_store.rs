//! In-memory BlogStore for integration tests
//!
//! Mirrors the PostgreSQL repositories closely enough for handler tests:
//! posts are joined with their category flag on read, deleting a post
//! removes its comments, and listings use the same ordering.

use async_trait::async_trait;
use blog_service::db::BlogStore;
use blog_service::models::{
    Category, Comment, NewComment, NewPost, Post, PostChanges, PostFilter, ProfileChanges, User,
};
use blog_service::Result;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    fn joined(&self, post: &Post) -> Post {
        let mut post = post.clone();
        post.category_is_published = post.category_id.and_then(|id| {
            self.categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.is_published)
        });
        post
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: format!("{}@example.com", username),
            date_joined: Utc::now(),
        };
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn add_category(&self, slug: &str, is_published: bool) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            title: slug.to_uppercase(),
            description: String::new(),
            slug: slug.to_string(),
            is_published,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().categories.push(category.clone());
        category
    }

    pub fn add_post(
        &self,
        author: &User,
        category: Option<&Category>,
        pub_date: DateTime<Utc>,
        is_published: bool,
    ) -> Post {
        let mut tables = self.tables.lock().unwrap();
        let post = Post {
            id: Uuid::new_v4(),
            title: "A post".to_string(),
            text: "Some text".to_string(),
            pub_date,
            author_id: author.id,
            category_id: category.map(|c| c.id),
            category_is_published: None,
            is_published,
            created_at: Utc::now(),
        };
        tables.posts.push(post.clone());
        tables.joined(&post)
    }

    pub fn add_comment(&self, author: &User, post: &Post, text: &str) -> Comment {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: post.id,
            author_id: author.id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().comments.push(comment.clone());
        comment
    }

    pub fn set_category_published(&self, category_id: Uuid, is_published: bool) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(category) = tables.categories.iter_mut().find(|c| c.id == category_id) {
            category.is_published = is_published;
        }
    }

    pub fn set_pub_date(&self, post_id: Uuid, pub_date: DateTime<Utc>) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(post) = tables.posts.iter_mut().find(|p| p.id == post_id) {
            post.pub_date = pub_date;
        }
    }

    pub fn post(&self, post_id: Uuid) -> Option<Post> {
        let tables = self.tables.lock().unwrap();
        tables
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| tables.joined(p))
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<Comment> {
        let tables = self.tables.lock().unwrap();
        tables.comments.iter().find(|c| c.id == comment_id).cloned()
    }

    pub fn user(&self, user_id: Uuid) -> Option<User> {
        let tables = self.tables.lock().unwrap();
        tables.users.iter().find(|u| u.id == user_id).cloned()
    }

    pub fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.tables.lock().unwrap().comments.len()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.user(user_id))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_taken(&self, username: &str, except: Uuid) -> Result<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .any(|u| u.username == username && u.id != except))
    }

    async fn update_user(&self, user_id: Uuid, changes: &ProfileChanges) -> Result<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.users.iter_mut().find(|u| u.id == user_id).map(|u| {
            u.username = changes.username.clone();
            u.first_name = changes.first_name.clone();
            u.last_name = changes.last_name.clone();
            u.email = changes.email.clone();
            u.clone()
        }))
    }

    async fn find_category(&self, category_id: Uuid) -> Result<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == category_id).cloned())
    }

    async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(self.post(post_id))
    }

    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>> {
        let tables = self.tables.lock().unwrap();
        let mut posts: Vec<Post> = tables
            .posts
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| tables.joined(p))
            .collect();
        posts.sort_by(|a, b| {
            b.pub_date
                .cmp(&a.pub_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(posts)
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        let mut tables = self.tables.lock().unwrap();
        let post = Post {
            id: Uuid::new_v4(),
            title: new_post.title.clone(),
            text: new_post.text.clone(),
            pub_date: new_post.pub_date,
            author_id: new_post.author_id,
            category_id: new_post.category_id,
            category_is_published: None,
            is_published: new_post.is_published,
            created_at: Utc::now(),
        };
        tables.posts.push(post.clone());
        Ok(tables.joined(&post))
    }

    async fn update_post(&self, post_id: Uuid, changes: &PostChanges) -> Result<Option<Post>> {
        let mut tables = self.tables.lock().unwrap();
        let updated = tables.posts.iter_mut().find(|p| p.id == post_id).map(|p| {
            p.title = changes.title.clone();
            p.text = changes.text.clone();
            p.pub_date = changes.pub_date;
            p.category_id = changes.category_id;
            p.is_published = changes.is_published;
            p.clone()
        });
        Ok(updated.map(|p| tables.joined(&p)))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != post_id);
        tables.comments.retain(|c| c.post_id != post_id);
        Ok(tables.posts.len() < before)
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        Ok(self.comment(comment_id))
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let tables = self.tables.lock().unwrap();
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn create_comment(&self, new_comment: &NewComment) -> Result<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: new_comment.post_id,
            author_id: new_comment.author_id,
            text: new_comment.text.clone(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment_id: Uuid, text: &str) -> Result<Option<Comment>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .map(|c| {
                c.text = text.to_string();
                c.clone()
            }))
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != comment_id);
        Ok(tables.comments.len() < before)
    }
}
