//! In-memory post store - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use newsroom_core::domain::{NewPost, Post, PostChanges};
use newsroom_core::error::RepoError;
use newsroom_core::ports::PostRepository;

struct Table {
    rows: BTreeMap<i32, Post>,
    next_id: i32,
}

/// In-memory post repository using a `BTreeMap` behind an async `RwLock`.
///
/// Ids come from a counter and are never handed out twice, even after a
/// delete. Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id sequence exhausted".to_string()))?;

        let now = Utc::now();
        let post = Post {
            id,
            title: new_post.title,
            content: new_post.content,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, post.clone());

        Ok(post)
    }

    async fn get_posts(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_post_by_id(&self, id: i32) -> Result<Post, RepoError> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn update_post_by_id(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let post = table.rows.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        post.updated_at = Utc::now().max(post.created_at);

        Ok(post.clone())
    }

    async fn delete_post(&self, id: i32) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id);
        Ok(())
    }
}
