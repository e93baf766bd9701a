use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Persistence for posts. Owns no business rules.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post; the store assigns the id and both timestamps.
    async fn create_post(&self, post: NewPost) -> Result<Post, RepoError>;

    /// All stored posts, ordered by id.
    async fn get_posts(&self) -> Result<Vec<Post>, RepoError>;

    /// Fails with [`RepoError::NotFound`] when no row matches.
    async fn get_post_by_id(&self, id: i32) -> Result<Post, RepoError>;

    /// Replace the supplied fields and always refresh `updated_at`.
    async fn update_post_by_id(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    /// Hard delete. A missing id is not reported as an error.
    async fn delete_post(&self, id: i32) -> Result<(), RepoError>;
}
