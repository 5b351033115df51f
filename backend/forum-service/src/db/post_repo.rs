use crate::models::{LikeState, NewPost, Post, PostFilter};
use sqlx::PgConnection;
use uuid::Uuid;

const POST_COLUMNS: &str = "id, title, content, author, avatar, category, likes, liked_by, \
     posted_at, is_anonymous, tags, is_moderated, created_at, updated_at";

/// Insert a new post
pub async fn create_post(conn: &mut PgConnection, post: &NewPost) -> Result<Post, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO posts (title, content, author, avatar, category, is_anonymous, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {POST_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Post>(&sql)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .bind(&post.avatar)
        .bind(post.category.as_str())
        .bind(post.is_anonymous)
        .bind(&post.tags)
        .fetch_one(&mut *conn)
        .await
}

/// Find a post by ID
pub async fn find_post_by_id(
    conn: &mut PgConnection,
    post_id: Uuid,
) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

    sqlx::query_as::<_, Post>(&sql)
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await
}

/// List posts matching `filter`, newest first
pub async fn find_posts(
    conn: &mut PgConnection,
    filter: &PostFilter,
) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        WHERE ($1::text IS NULL OR category = $1)
          AND (
              $2::text IS NULL
              OR title ILIKE $2
              OR content ILIKE $2
              OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $2)
          )
        ORDER BY posted_at DESC
        "#
    );

    let pattern = filter.search.as_deref().map(contains_pattern);

    sqlx::query_as::<_, Post>(&sql)
        .bind(filter.category.map(|c| c.as_str()))
        .bind(pattern)
        .fetch_all(&mut *conn)
        .await
}

/// Lock a post's like state for the rest of the transaction
pub async fn lock_like_state(
    conn: &mut PgConnection,
    post_id: Uuid,
) -> Result<Option<LikeState>, sqlx::Error> {
    sqlx::query_as::<_, LikeState>(
        r#"
        SELECT likes, liked_by
        FROM posts
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(post_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Persist a post's like state
pub async fn update_like_state(
    conn: &mut PgConnection,
    post_id: Uuid,
    state: &LikeState,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET likes = $1, liked_by = $2, updated_at = NOW()
        WHERE id = $3
        "#,
    )
    .bind(state.likes)
    .bind(&state.liked_by)
    .bind(post_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Lock a post row so comments can be attached to it.
/// Returns false when the post does not exist.
pub async fn lock_post(conn: &mut PgConnection, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_scalar::<_, Uuid>("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.is_some())
}

/// Mark a post as updated (a comment was attached)
pub async fn touch_post(conn: &mut PgConnection, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE posts SET updated_at = NOW() WHERE id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Hard delete a post. Returns false when nothing was deleted.
pub async fn delete_post(conn: &mut PgConnection, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// ILIKE pattern matching `term` anywhere, with wildcards in `term` taken literally
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
