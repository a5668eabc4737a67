use crate::models::{ProfileChanges, User};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, first_name, last_name, email, date_joined
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, first_name, last_name, email, date_joined
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn username_taken(
    pool: &PgPool,
    username: &str,
    except: Uuid,
) -> Result<bool, sqlx::Error> {
    let (taken,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND id <> $2)",
    )
    .bind(username)
    .bind(except)
    .fetch_one(pool)
    .await?;

    Ok(taken)
}

pub async fn update_user(
    pool: &PgPool,
    user_id: Uuid,
    changes: &ProfileChanges,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = $2, first_name = $3, last_name = $4, email = $5
        WHERE id = $1
        RETURNING id, username, first_name, last_name, email, date_joined
        "#,
    )
    .bind(user_id)
    .bind(&changes.username)
    .bind(&changes.first_name)
    .bind(&changes.last_name)
    .bind(&changes.email)
    .fetch_optional(pool)
    .await
}
