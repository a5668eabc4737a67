/// Business logic layer for blog-service
///
/// This module provides high-level operations:
/// - Post service: listings, detail, create/edit/delete
/// - Comment service: add/edit/delete comments
/// - Profile service: author pages and profile editing
///
/// Every operation takes the requesting [`Viewer`](crate::policy::Viewer)
/// explicitly. Mutations by viewers who do not own the resource are not
/// errors; they return [`Outcome::Ignored`] and change nothing.
pub mod comments;
pub mod posts;
pub mod profiles;

pub use comments::CommentService;
pub use posts::{CategoryListing, PostDetail, PostService};
pub use profiles::{ProfileListing, ProfileService};

/// Result of a mutation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The change was written
    Applied(T),
    /// The viewer does not own the resource; nothing was written
    Ignored,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}
