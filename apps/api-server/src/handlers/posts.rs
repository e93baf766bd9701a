//! Post handlers - thin adapters between HTTP and [`PostService`].
//!
//! [`PostService`]: newsroom_core::PostService

use actix_web::{HttpResponse, web};

use newsroom_core::domain::Post;
use newsroom_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(post_responses(posts)))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state.posts.create(req.title, req.content).await?;

    tracing::info!(post_id = post.id, "Post created");
    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .update(path.into_inner(), req.title, req.content)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::Ok().finish())
}

pub(crate) fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title.clone(),
        content: post.content.clone(),
        created_at: post.created_at.format(TIMESTAMP_FORMAT).to_string(),
        updated_at: post.updated_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

pub(crate) fn post_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.iter().map(post_response).collect()
}
