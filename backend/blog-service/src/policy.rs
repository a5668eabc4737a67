//! Visibility and ownership policy.
//!
//! Decides which posts, categories and comments a viewer may see, and which
//! of them the viewer may edit or delete. Decisions are computed from the
//! records and the current time on every request; nothing is cached.
//!
//! A post is publicly visible when it is published, its `pub_date` is not in
//! the future, and its category (if any) is published. Its author sees it
//! regardless. Only the author of a post or comment may change it, and an
//! anonymous viewer never owns anything.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::metrics::policy::POLICY_DENIALS_TOTAL;
use crate::models::{Category, Comment, Post, User};

/// Identity on whose behalf a decision is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(Uuid),
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::User(_))
    }

    /// Identity comparison against a resource owner. Never true for anonymous viewers.
    pub fn is(&self, owner_id: Uuid) -> bool {
        self.user_id() == Some(owner_id)
    }
}

/// Policy bound to one viewer and one instant.
#[derive(Debug, Clone, Copy)]
pub struct Policy<'a> {
    viewer: &'a Viewer,
    now: DateTime<Utc>,
}

impl<'a> Policy<'a> {
    /// Evaluate against the current wall-clock time.
    pub fn new(viewer: &'a Viewer) -> Self {
        Self::at(viewer, Utc::now())
    }

    pub fn at(viewer: &'a Viewer, now: DateTime<Utc>) -> Self {
        Self { viewer, now }
    }

    pub fn can_view_post(&self, post: &Post) -> bool {
        if self.viewer.is(post.author_id) {
            return true;
        }

        post.is_published
            && post.pub_date <= self.now
            && post.category_is_published.unwrap_or(true)
    }

    pub fn can_view_category(&self, category: &Category) -> bool {
        category.is_published
    }

    /// Comments have no gate of their own; they follow their post.
    pub fn can_view_comment(&self, comment: &Comment, post: &Post) -> bool {
        comment.post_id == post.id && self.can_view_post(post)
    }

    pub fn can_edit_post(&self, post: &Post) -> bool {
        self.owns("post", "edit", post.author_id)
    }

    pub fn can_delete_post(&self, post: &Post) -> bool {
        self.owns("post", "delete", post.author_id)
    }

    pub fn can_edit_comment(&self, comment: &Comment) -> bool {
        self.owns("comment", "edit", comment.author_id)
    }

    pub fn can_delete_comment(&self, comment: &Comment) -> bool {
        self.owns("comment", "delete", comment.author_id)
    }

    pub fn can_edit_profile(&self, user: &User) -> bool {
        self.owns("profile", "edit", user.id)
    }

    /// Keep the posts this viewer may see, preserving input order.
    pub fn filter_visible<I>(&self, posts: I) -> Vec<Post>
    where
        I: IntoIterator<Item = Post>,
    {
        posts
            .into_iter()
            .filter(|post| self.can_view_post(post))
            .collect()
    }

    fn owns(&self, resource: &'static str, action: &'static str, owner_id: Uuid) -> bool {
        let allowed = self.viewer.is(owner_id);
        if !allowed {
            POLICY_DENIALS_TOTAL
                .with_label_values(&[resource, action])
                .inc();
            tracing::debug!(
                resource,
                action,
                viewer = ?self.viewer.user_id(),
                %owner_id,
                "ownership check denied"
            );
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(author_id: Uuid, pub_date: DateTime<Utc>) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "Title".into(),
            text: "Body".into(),
            pub_date,
            author_id,
            category_id: Some(Uuid::new_v4()),
            category_is_published: Some(true),
            is_published: true,
            created_at: pub_date,
        }
    }

    fn comment(author_id: Uuid, post_id: Uuid) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            text: "Nice".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_published_past_post_visible_to_anonymous() {
        let now = Utc::now();
        let viewer = Viewer::Anonymous;
        let policy = Policy::at(&viewer, now);

        let mut p = post(Uuid::new_v4(), now - Duration::days(1));
        assert!(policy.can_view_post(&p));

        p.pub_date = now + Duration::days(1);
        assert!(!policy.can_view_post(&p));

        let author = Viewer::User(p.author_id);
        assert!(Policy::at(&author, now).can_view_post(&p));
    }

    #[test]
    fn test_non_owner_blocked_by_each_gate() {
        let now = Utc::now();
        let stranger = Viewer::User(Uuid::new_v4());
        let policy = Policy::at(&stranger, now);
        let base = post(Uuid::new_v4(), now - Duration::hours(1));

        let mut unpublished = base.clone();
        unpublished.is_published = false;
        assert!(!policy.can_view_post(&unpublished));

        let mut hidden_category = base.clone();
        hidden_category.category_is_published = Some(false);
        assert!(!policy.can_view_post(&hidden_category));

        let mut scheduled = base.clone();
        scheduled.pub_date = now + Duration::seconds(1);
        assert!(!policy.can_view_post(&scheduled));

        assert!(policy.can_view_post(&base));
    }

    #[test]
    fn test_author_sees_own_post_regardless_of_flags() {
        let now = Utc::now();
        let author_id = Uuid::new_v4();
        let viewer = Viewer::User(author_id);
        let policy = Policy::at(&viewer, now);

        let mut p = post(author_id, now + Duration::days(30));
        p.is_published = false;
        p.category_is_published = Some(false);
        assert!(policy.can_view_post(&p));
    }

    #[test]
    fn test_uncategorized_post_is_not_gated_by_category() {
        let now = Utc::now();
        let viewer = Viewer::Anonymous;
        let mut p = post(Uuid::new_v4(), now - Duration::days(2));
        p.category_id = None;
        p.category_is_published = None;
        assert!(Policy::at(&viewer, now).can_view_post(&p));
    }

    #[test]
    fn test_pub_date_equal_to_now_is_visible() {
        let now = Utc::now();
        let viewer = Viewer::Anonymous;
        let p = post(Uuid::new_v4(), now);
        assert!(Policy::at(&viewer, now).can_view_post(&p));
    }

    #[test]
    fn test_category_visibility_follows_flag() {
        let viewer = Viewer::Anonymous;
        let policy = Policy::new(&viewer);
        let mut category = Category {
            id: Uuid::new_v4(),
            title: "Travel".into(),
            description: String::new(),
            slug: "travel".into(),
            is_published: true,
            created_at: Utc::now(),
        };
        assert!(policy.can_view_category(&category));
        category.is_published = false;
        assert!(!policy.can_view_category(&category));
    }

    #[test]
    fn test_only_exact_owner_may_mutate() {
        let now = Utc::now();
        let owner_id = Uuid::new_v4();
        let p = post(owner_id, now);
        let c = comment(owner_id, p.id);

        let owner = Viewer::User(owner_id);
        let other = Viewer::User(Uuid::new_v4());
        let anonymous = Viewer::Anonymous;

        let policy = Policy::at(&owner, now);
        assert!(policy.can_edit_post(&p));
        assert!(policy.can_delete_post(&p));
        assert!(policy.can_edit_comment(&c));
        assert!(policy.can_delete_comment(&c));

        for viewer in [other, anonymous] {
            let policy = Policy::at(&viewer, now);
            assert!(!policy.can_edit_post(&p));
            assert!(!policy.can_delete_post(&p));
            assert!(!policy.can_edit_comment(&c));
            assert!(!policy.can_delete_comment(&c));
        }
    }

    #[test]
    fn test_comment_follows_parent_post() {
        let now = Utc::now();
        let viewer = Viewer::Anonymous;
        let policy = Policy::at(&viewer, now);

        let mut p = post(Uuid::new_v4(), now - Duration::days(1));
        let c = comment(Uuid::new_v4(), p.id);
        assert!(policy.can_view_comment(&c, &p));

        p.is_published = false;
        assert!(!policy.can_view_comment(&c, &p));

        let other_post = post(Uuid::new_v4(), now - Duration::days(1));
        assert!(!policy.can_view_comment(&c, &other_post));
    }

    #[test]
    fn test_profile_edit_requires_same_user() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            first_name: String::new(),
            last_name: String::new(),
            email: "alice@example.com".into(),
            date_joined: Utc::now(),
        };
        let same = Viewer::User(user.id);
        let other = Viewer::User(Uuid::new_v4());
        assert!(Policy::new(&same).can_edit_profile(&user));
        assert!(!Policy::new(&other).can_edit_profile(&user));
        assert!(!Policy::new(&Viewer::Anonymous).can_edit_profile(&user));
    }

    #[test]
    fn test_filter_visible_is_ordered_idempotent_subset() {
        let now = Utc::now();
        let author_id = Uuid::new_v4();
        let viewer = Viewer::Anonymous;
        let policy = Policy::at(&viewer, now);

        let mut posts: Vec<Post> = (1..=6)
            .map(|i| post(author_id, now - Duration::days(i)))
            .collect();
        posts[1].is_published = false;
        posts[3].pub_date = now + Duration::days(1);
        posts[4].category_is_published = Some(false);

        let once = policy.filter_visible(posts.clone());
        let twice = policy.filter_visible(once.clone());

        assert_eq!(once, twice);
        assert_eq!(
            once.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![posts[0].id, posts[2].id, posts[5].id]
        );
        assert!(once.iter().all(|p| posts.contains(p)));

        let author = Viewer::User(author_id);
        assert_eq!(Policy::at(&author, now).filter_visible(posts.clone()), posts);
    }

    #[test]
    fn test_anonymous_viewer_identity() {
        let id = Uuid::new_v4();
        assert!(!Viewer::Anonymous.is(id));
        assert!(!Viewer::Anonymous.is_authenticated());
        assert!(Viewer::User(id).is(id));
        assert_eq!(Viewer::User(id).user_id(), Some(id));
    }
}
