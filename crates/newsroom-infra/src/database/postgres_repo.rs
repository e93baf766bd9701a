//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, UpdateMany,
};

use newsroom_core::domain::{NewPost, Post, PostChanges};
use newsroom_core::error::RepoError;
use newsroom_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::errors::classify;

/// PostgreSQL post repository.
///
/// Every operation is a single statement, so atomicity comes from the
/// database's per-statement transaction. Timestamps are taken from the
/// database clock, never from the application host.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, new_post: NewPost) -> Result<Post, RepoError> {
        // Both timestamps come from the column defaults of the same statement.
        let model = post::ActiveModel {
            title: Set(new_post.title),
            content: Set(new_post.content),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(classify)?;

        tracing::debug!(post_id = model.id, "Inserted post");
        Ok(model.into())
    }

    async fn get_posts(&self) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(classify)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_post_by_id(&self, id: i32) -> Result<Post, RepoError> {
        PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(classify)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn update_post_by_id(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        update_statement(id, changes)
            .exec_with_returning(&self.db)
            .await
            .map_err(classify)?
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn delete_post(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(classify)?;

        if result.rows_affected == 0 {
            tracing::debug!(post_id = id, "Delete matched no rows");
        }

        Ok(())
    }
}

/// `UPDATE posts SET ... WHERE id = $1`. Fields left `None` keep their value;
/// `updated_at` never drops below `created_at`.
pub(crate) fn update_statement(id: i32, changes: PostChanges) -> UpdateMany<PostEntity> {
    let mut update = PostEntity::update_many()
        .col_expr(
            post::Column::UpdatedAt,
            Expr::cust("GREATEST(CURRENT_TIMESTAMP, created_at)"),
        )
        .filter(post::Column::Id.eq(id));

    if let Some(title) = changes.title {
        update = update.col_expr(post::Column::Title, Expr::value(title));
    }
    if let Some(content) = changes.content {
        update = update.col_expr(post::Column::Content, Expr::value(content));
    }

    update
}
