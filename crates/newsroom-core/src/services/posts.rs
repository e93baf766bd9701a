//! Post service - validation, partial-update merge and error translation
//! for the post resource. Transport-agnostic: the HTTP layer only maps
//! [`DomainError`] variants to status codes.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::PostRepository;

const ENTITY: &str = "post";

/// How `list` treats a table with no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyListPolicy {
    /// Return an empty list.
    #[default]
    Ok,
    /// Report the empty table as not found.
    NotFound,
}

/// Business rules for posts, built around an injected repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    empty_list: EmptyListPolicy,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            repo,
            empty_list: EmptyListPolicy::default(),
        }
    }

    pub fn with_empty_list_policy(mut self, policy: EmptyListPolicy) -> Self {
        self.empty_list = policy;
        self
    }

    /// Create a post. Both fields must be present and non-empty.
    pub async fn create(&self, title: Option<String>, content: Option<String>) -> DomainResult<Post> {
        let new_post = NewPost::validate(title, content)?;
        self.repo
            .create_post(new_post)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    pub async fn list(&self) -> DomainResult<Vec<Post>> {
        match self.repo.get_posts().await {
            // Store-level "no rows" signal.
            Err(RepoError::NotFound) => Err(DomainError::NoRows(ENTITY)),
            Err(e) => Err(DomainError::Internal(e.to_string())),
            Ok(posts) if posts.is_empty() && self.empty_list == EmptyListPolicy::NotFound => {
                Err(DomainError::NoRows(ENTITY))
            }
            Ok(posts) => Ok(posts),
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Post> {
        ensure_valid_id(id)?;
        self.repo
            .get_post_by_id(id)
            .await
            .map_err(|e| lookup_error(e, id))
    }

    /// Fetch, merge the non-empty fields and store. `updated_at` advances even
    /// when no field changed.
    ///
    /// The fetch and the update are separate statements; a concurrent delete
    /// in between surfaces as `NotFound` from the second phase.
    pub async fn update(
        &self,
        id: i32,
        title: Option<String>,
        content: Option<String>,
    ) -> DomainResult<Post> {
        let existing = self.get(id).await?;
        let changes = PostChanges::from_request(title, content);

        self.repo
            .update_post_by_id(existing.id, changes)
            .await
            .map_err(|e| match e {
                RepoError::ModificationNotPermitted(msg) => {
                    DomainError::ModificationNotPermitted(msg)
                }
                other => lookup_error(other, id),
            })
    }

    /// Fetch-then-delete, so a missing id is reported before any mutation.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let existing = self.get(id).await?;
        self.repo
            .delete_post(existing.id)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

fn ensure_valid_id(id: i32) -> DomainResult<()> {
    if id <= 0 {
        return Err(DomainError::Validation(format!(
            "id must be a positive integer, got {id}"
        )));
    }
    Ok(())
}

fn lookup_error(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: ENTITY,
            id,
        },
        other => DomainError::Internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub store that records mutating calls and can be told to fail.
    #[derive(Default)]
    struct RecordingRepository {
        posts: Mutex<BTreeMap<i32, Post>>,
        mutations: AtomicUsize,
        fail_reads: Option<fn() -> RepoError>,
        fail_updates: Option<fn() -> RepoError>,
        list_signals_no_rows: bool,
    }

    impl RecordingRepository {
        fn seeded(posts: Vec<Post>) -> Self {
            Self {
                posts: Mutex::new(posts.into_iter().map(|p| (p.id, p)).collect()),
                ..Default::default()
            }
        }

        fn mutations(&self) -> usize {
            self.mutations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostRepository for RecordingRepository {
        async fn create_post(&self, post: NewPost) -> Result<Post, RepoError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            let mut posts = self.posts.lock().unwrap();
            let id = posts.keys().next_back().copied().unwrap_or(0) + 1;
            let now = Utc::now();
            let stored = Post {
                id,
                title: post.title,
                content: post.content,
                created_at: now,
                updated_at: now,
            };
            posts.insert(id, stored.clone());
            Ok(stored)
        }

        async fn get_posts(&self) -> Result<Vec<Post>, RepoError> {
            if self.list_signals_no_rows {
                return Err(RepoError::NotFound);
            }
            if let Some(fail) = self.fail_reads {
                return Err(fail());
            }
            Ok(self.posts.lock().unwrap().values().cloned().collect())
        }

        async fn get_post_by_id(&self, id: i32) -> Result<Post, RepoError> {
            if let Some(fail) = self.fail_reads {
                return Err(fail());
            }
            self.posts
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(RepoError::NotFound)
        }

        async fn update_post_by_id(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            if let Some(fail) = self.fail_updates {
                return Err(fail());
            }
            let mut posts = self.posts.lock().unwrap();
            let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
            if let Some(title) = changes.title {
                post.title = title;
            }
            if let Some(content) = changes.content {
                post.content = content;
            }
            post.updated_at = Utc::now();
            Ok(post.clone())
        }

        async fn delete_post(&self, id: i32) -> Result<(), RepoError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.posts.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    fn sample_post(id: i32) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: format!("Title {id}"),
            content: format!("Content {id}"),
            created_at: now,
            updated_at: now,
        }
    }

    fn service(repo: &Arc<RecordingRepository>) -> PostService {
        PostService::new(repo.clone())
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() {
        let repo = Arc::new(RecordingRepository::default());
        let post = service(&repo)
            .create(Some("Hello".into()), Some("World".into()))
            .await
            .unwrap();

        assert!(post.id > 0);
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(repo.mutations(), 1);
    }

    #[tokio::test]
    async fn create_with_missing_fields_never_touches_store() {
        let repo = Arc::new(RecordingRepository::default());
        let err = service(&repo).create(None, None).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("title") && m.contains("content")));
        assert_eq!(repo.mutations(), 0);
    }

    #[tokio::test]
    async fn get_rejects_non_positive_id() {
        let repo = Arc::new(RecordingRepository::default());
        let err = service(&repo).get(0).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn get_maps_store_failures() {
        let repo = Arc::new(RecordingRepository::default());
        assert!(matches!(
            service(&repo).get(7).await,
            Err(DomainError::NotFound { id: 7, .. })
        ));

        let failing = Arc::new(RecordingRepository {
            fail_reads: Some(|| RepoError::Connection("refused".into())),
            ..Default::default()
        });
        assert!(matches!(
            service(&failing).get(7).await,
            Err(DomainError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn update_title_only_keeps_content_and_advances_timestamp() {
        let original = sample_post(1);
        let repo = Arc::new(RecordingRepository::seeded(vec![original.clone()]));
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = service(&repo)
            .update(1, Some("New title".into()), Some(String::new()))
            .await
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, original.content);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[tokio::test]
    async fn update_with_no_fields_still_submits() {
        let original = sample_post(1);
        let repo = Arc::new(RecordingRepository::seeded(vec![original.clone()]));

        let updated = service(&repo).update(1, None, None).await.unwrap();

        assert_eq!(repo.mutations(), 1);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.content, original.content);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_post_issue_no_mutation() {
        let repo = Arc::new(RecordingRepository::default());
        let svc = service(&repo);

        assert!(matches!(
            svc.update(3, Some("t".into()), None).await,
            Err(DomainError::NotFound { id: 3, .. })
        ));
        assert!(matches!(
            svc.delete(3).await,
            Err(DomainError::NotFound { id: 3, .. })
        ));
        assert_eq!(repo.mutations(), 0);
    }

    #[tokio::test]
    async fn update_distinguishes_forbidden_modification() {
        let repo = Arc::new(RecordingRepository {
            fail_updates: Some(|| RepoError::ModificationNotPermitted("read-only".into())),
            ..RecordingRepository::seeded(vec![sample_post(1)])
        });
        assert!(matches!(
            service(&repo).update(1, Some("t".into()), None).await,
            Err(DomainError::ModificationNotPermitted(_))
        ));

        let repo = Arc::new(RecordingRepository {
            fail_updates: Some(|| RepoError::Constraint("check".into())),
            ..RecordingRepository::seeded(vec![sample_post(1)])
        });
        assert!(matches!(
            service(&repo).update(1, Some("t".into()), None).await,
            Err(DomainError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_post() {
        let repo = Arc::new(RecordingRepository::seeded(vec![sample_post(1)]));
        let svc = service(&repo);

        svc.delete(1).await.unwrap();
        assert!(matches!(svc.get(1).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.delete(1).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_respects_empty_list_policy() {
        let repo = Arc::new(RecordingRepository::default());
        assert!(service(&repo).list().await.unwrap().is_empty());

        let strict = service(&repo).with_empty_list_policy(EmptyListPolicy::NotFound);
        assert!(matches!(strict.list().await, Err(DomainError::NoRows("post"))));
    }

    #[tokio::test]
    async fn list_passes_through_store_no_rows_signal() {
        let repo = Arc::new(RecordingRepository {
            list_signals_no_rows: true,
            ..Default::default()
        });
        assert!(matches!(
            service(&repo).list().await,
            Err(DomainError::NoRows(_))
        ));
    }
}
