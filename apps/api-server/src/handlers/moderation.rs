//! Standalone content-safety check. Post creation and updates do not call it.

use actix_web::{HttpResponse, web};

use newsroom_shared::dto::{ModerationCheckRequest, ModerationCheckResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /moderation
pub async fn check(
    state: web::Data<AppState>,
    body: web::Json<ModerationCheckRequest>,
) -> AppResult<HttpResponse> {
    let moderator = state
        .moderator
        .as_ref()
        .ok_or_else(|| AppError::Internal("moderation is not configured".to_string()))?;

    let flagged = moderator.check_safety(&body.input).await?;

    Ok(HttpResponse::Ok().json(ModerationCheckResponse { flagged }))
}
