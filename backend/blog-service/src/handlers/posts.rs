/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::handlers::{post_detail_url, profile_url, redirect, AppState};
use crate::models::PostForm;
use crate::pagination::PageQuery;
use crate::policy::Viewer;
use crate::services::{Outcome, PostService, ProfileService};
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

/// Visible posts, newest first
pub async fn index(
    state: web::Data<AppState>,
    viewer: Viewer,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let posts = PostService::new(state.store.clone()).index(&viewer).await?;
    let page = state.paginator.get_page(posts, query.page.as_deref());

    Ok(HttpResponse::Ok().json(page))
}

/// Get a post and its comments
pub async fn post_detail(
    state: web::Data<AppState>,
    viewer: Viewer,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let detail = PostService::new(state.store.clone())
        .post_detail(&viewer, *post_id)
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Create a post authored by the viewer
pub async fn create_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    viewer: Viewer,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    let outcome = PostService::new(state.store.clone())
        .create_post(&viewer, form.into_inner())
        .await?;

    // Only anonymous viewers are turned away by the service
    let Outcome::Applied(post) = outcome else {
        return Ok(state.login_redirect(&req));
    };

    match ProfileService::new(state.store.clone())
        .find_user(post.author_id)
        .await?
    {
        Some(author) => Ok(redirect(&profile_url(&author.username))),
        None => Ok(redirect(&post_detail_url(post.id))),
    }
}

/// Edit a post; anyone but the author lands back on the detail page unchanged
pub async fn edit_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    viewer: Viewer,
    post_id: web::Path<Uuid>,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    if !viewer.is_authenticated() {
        return Ok(state.login_redirect(&req));
    }

    let post_id = post_id.into_inner();
    PostService::new(state.store.clone())
        .edit_post(&viewer, post_id, form.into_inner())
        .await?;

    Ok(redirect(&post_detail_url(post_id)))
}

/// Delete a post; the author goes to the index, anyone else back to the post
pub async fn delete_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    viewer: Viewer,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if !viewer.is_authenticated() {
        return Ok(state.login_redirect(&req));
    }

    let post_id = post_id.into_inner();
    let outcome = PostService::new(state.store.clone())
        .delete_post(&viewer, post_id)
        .await?;

    if outcome.is_applied() {
        Ok(redirect("/"))
    } else {
        Ok(redirect(&post_detail_url(post_id)))
    }
}
