use crate::error::Result;
use crate::handlers::AppState;
use crate::models::{Category, Post};
use crate::pagination::{Page, PageQuery};
use crate::policy::Viewer;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CategoryPageResponse {
    pub category: Category,
    pub page: Page<Post>,
}

/// Posts of a published category; unpublished or unknown slugs are 404
pub async fn category_posts(
    state: web::Data<AppState>,
    viewer: Viewer,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let listing = PostService::new(state.store.clone())
        .category_posts(&viewer, &slug)
        .await?;

    Ok(HttpResponse::Ok().json(CategoryPageResponse {
        category: listing.category,
        page: state.paginator.get_page(listing.posts, query.page.as_deref()),
    }))
}
