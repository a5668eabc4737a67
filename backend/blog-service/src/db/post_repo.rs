use crate::models::{NewPost, Post, PostChanges, PostFilter};
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = r#"
    p.id, p.title, p.text, p.pub_date, p.author_id, p.category_id,
    c.is_published AS category_is_published, p.is_published, p.created_at
"#;

/// Find a post by ID together with its category flag
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!(
        "SELECT {POST_COLUMNS} FROM posts p LEFT JOIN categories c ON c.id = p.category_id WHERE p.id = $1"
    );

    sqlx::query_as::<_, Post>(&sql)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// List candidate posts, newest publication date first.
/// Visibility is not applied here.
pub async fn find_posts(pool: &PgPool, filter: PostFilter) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        LEFT JOIN categories c ON c.id = p.category_id
        WHERE ($1::uuid IS NULL OR p.author_id = $1)
          AND ($2::uuid IS NULL OR p.category_id = $2)
        ORDER BY p.pub_date DESC, p.created_at DESC
        "#
    );

    sqlx::query_as::<_, Post>(&sql)
        .bind(filter.author_id)
        .bind(filter.category_id)
        .fetch_all(pool)
        .await
}

/// Insert a post and return it with its category flag
pub async fn create_post(pool: &PgPool, new_post: &NewPost) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        WITH p AS (
            INSERT INTO posts (title, text, pub_date, author_id, category_id, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        )
        SELECT p.id, p.title, p.text, p.pub_date, p.author_id, p.category_id,
               c.is_published AS category_is_published, p.is_published, p.created_at
        FROM p
        LEFT JOIN categories c ON c.id = p.category_id
        "#,
    )
    .bind(&new_post.title)
    .bind(&new_post.text)
    .bind(new_post.pub_date)
    .bind(new_post.author_id)
    .bind(new_post.category_id)
    .bind(new_post.is_published)
    .fetch_one(pool)
    .await
}

/// Update editable fields; `None` when the post no longer exists
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    changes: &PostChanges,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        WITH p AS (
            UPDATE posts
            SET title = $2, text = $3, pub_date = $4, category_id = $5, is_published = $6
            WHERE id = $1
            RETURNING *
        )
        SELECT p.id, p.title, p.text, p.pub_date, p.author_id, p.category_id,
               c.is_published AS category_is_published, p.is_published, p.created_at
        FROM p
        LEFT JOIN categories c ON c.id = p.category_id
        "#,
    )
    .bind(post_id)
    .bind(&changes.title)
    .bind(&changes.text)
    .bind(changes.pub_date)
    .bind(changes.category_id)
    .bind(changes.is_published)
    .fetch_optional(pool)
    .await
}

/// Delete a post; comments are removed by the foreign key cascade
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
