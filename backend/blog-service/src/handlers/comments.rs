/// Comment handlers - HTTP endpoints for comment operations
///
/// Every comment mutation ends on the post's detail page, whether or not
/// the viewer was allowed to make it.
use crate::error::Result;
use crate::handlers::{post_detail_url, redirect, AppState};
use crate::models::CommentForm;
use crate::policy::Viewer;
use crate::services::CommentService;
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

/// Create a new comment
pub async fn add_comment(
    state: web::Data<AppState>,
    req: HttpRequest,
    viewer: Viewer,
    post_id: web::Path<Uuid>,
    form: web::Json<CommentForm>,
) -> Result<HttpResponse> {
    if !viewer.is_authenticated() {
        return Ok(state.login_redirect(&req));
    }

    let post_id = post_id.into_inner();
    CommentService::new(state.store.clone())
        .add_comment(&viewer, post_id, form.into_inner())
        .await?;

    Ok(redirect(&post_detail_url(post_id)))
}

/// Update a comment
pub async fn edit_comment(
    state: web::Data<AppState>,
    req: HttpRequest,
    viewer: Viewer,
    path: web::Path<(Uuid, Uuid)>,
    form: web::Json<CommentForm>,
) -> Result<HttpResponse> {
    if !viewer.is_authenticated() {
        return Ok(state.login_redirect(&req));
    }

    let (post_id, comment_id) = path.into_inner();
    CommentService::new(state.store.clone())
        .edit_comment(&viewer, post_id, comment_id, form.into_inner())
        .await?;

    Ok(redirect(&post_detail_url(post_id)))
}

/// Delete a comment
pub async fn delete_comment(
    state: web::Data<AppState>,
    req: HttpRequest,
    viewer: Viewer,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    if !viewer.is_authenticated() {
        return Ok(state.login_redirect(&req));
    }

    let (post_id, comment_id) = path.into_inner();
    CommentService::new(state.store.clone())
        .delete_comment(&viewer, post_id, comment_id)
        .await?;

    Ok(redirect(&post_detail_url(post_id)))
}
