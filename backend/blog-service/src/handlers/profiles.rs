use crate::error::Result;
use crate::handlers::{profile_url, redirect, AppState};
use crate::models::{Post, ProfileForm, User};
use crate::pagination::{Page, PageQuery};
use crate::policy::Viewer;
use crate::services::{Outcome, ProfileService};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfilePageResponse {
    pub profile: User,
    pub page: Page<Post>,
}

/// Author page
pub async fn profile(
    state: web::Data<AppState>,
    viewer: Viewer,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let listing = ProfileService::new(state.store.clone())
        .profile(&viewer, &username)
        .await?;

    Ok(HttpResponse::Ok().json(ProfilePageResponse {
        profile: listing.profile,
        page: state.paginator.get_page(listing.posts, query.page.as_deref()),
    }))
}

/// Edit one's own profile; other viewers are sent back to the profile page
pub async fn edit_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    viewer: Viewer,
    username: web::Path<String>,
    form: web::Json<ProfileForm>,
) -> Result<HttpResponse> {
    if !viewer.is_authenticated() {
        return Ok(state.login_redirect(&req));
    }

    let outcome = ProfileService::new(state.store.clone())
        .edit_profile(&viewer, &username, form.into_inner())
        .await?;

    match outcome {
        Outcome::Applied(user) => Ok(redirect(&profile_url(&user.username))),
        Outcome::Ignored => Ok(redirect(&profile_url(&username))),
    }
}
