use crate::models::{Comment, LikeState, NewComment};
use sqlx::PgConnection;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, content, author, avatar, post_id, likes, liked_by, \
     posted_at, is_anonymous, is_moderated, created_at, updated_at";

/// Insert a new comment on a post
pub async fn create_comment(
    conn: &mut PgConnection,
    comment: &NewComment,
) -> Result<Comment, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO comments (post_id, content, author, avatar, is_anonymous)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COMMENT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Comment>(&sql)
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(&comment.author)
        .bind(&comment.avatar)
        .bind(comment.is_anonymous)
        .fetch_one(&mut *conn)
        .await
}

/// Get all comments for a post, oldest first
pub async fn find_comments_by_post(
    conn: &mut PgConnection,
    post_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY posted_at ASC"
    );

    sqlx::query_as::<_, Comment>(&sql)
        .bind(post_id)
        .fetch_all(&mut *conn)
        .await
}

/// Get comments for several posts at once, oldest first
pub async fn find_comments_by_posts(
    conn: &mut PgConnection,
    post_ids: &[Uuid],
) -> Result<Vec<Comment>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ANY($1) ORDER BY posted_at ASC"
    );

    sqlx::query_as::<_, Comment>(&sql)
        .bind(post_ids)
        .fetch_all(&mut *conn)
        .await
}

/// Lock a comment's like state for the rest of the transaction
pub async fn lock_like_state(
    conn: &mut PgConnection,
    comment_id: Uuid,
) -> Result<Option<LikeState>, sqlx::Error> {
    sqlx::query_as::<_, LikeState>(
        r#"
        SELECT likes, liked_by
        FROM comments
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(comment_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Persist a comment's like state
pub async fn update_like_state(
    conn: &mut PgConnection,
    comment_id: Uuid,
    state: &LikeState,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE comments
        SET likes = $1, liked_by = $2, updated_at = NOW()
        WHERE id = $3
        "#,
    )
    .bind(state.likes)
    .bind(&state.liked_by)
    .bind(comment_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Delete every comment on a post, returning how many were removed
pub async fn delete_comments_by_post(
    conn: &mut PgConnection,
    post_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
