/// HTTP handlers for blog endpoints
///
/// This module contains handlers for:
/// - Posts: index, detail, create, edit, delete
/// - Comments: add, edit, delete
/// - Categories: posts of a published category
/// - Profiles: author page and profile editing
/// - Health: liveness and readiness checks
///
/// Reads answer with JSON; mutations answer with `303 See Other`.
pub mod categories;
pub mod comments;
pub mod health;
pub mod posts;
pub mod profiles;

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::db::BlogStore;
use crate::metrics;
use crate::pagination::Paginator;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub paginator: Paginator,
    pub login_url: String,
}

impl AppState {
    pub fn new(store: Arc<dyn BlogStore>, page_size: usize, login_url: impl Into<String>) -> Self {
        Self {
            store,
            paginator: Paginator::new(page_size),
            login_url: login_url.into(),
        }
    }

    /// Send an anonymous viewer to the login page, remembering where they were going
    fn login_redirect(&self, req: &HttpRequest) -> HttpResponse {
        redirect(&format!(
            "{}?next={}",
            self.login_url,
            urlencoding::encode(req.path())
        ))
    }
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn post_detail_url(post_id: uuid::Uuid) -> String {
    format!("/posts/{}/", post_id)
}

pub(crate) fn profile_url(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

/// Route table shared by the binary and the integration tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .service(
            web::scope("/posts")
                .route("/create/", web::post().to(posts::create_post))
                .route("/{post_id}/", web::get().to(posts::post_detail))
                .route("/{post_id}/edit/", web::post().to(posts::edit_post))
                .route("/{post_id}/delete/", web::post().to(posts::delete_post))
                .route("/{post_id}/comment/", web::post().to(comments::add_comment))
                .route(
                    "/{post_id}/edit_comment/{comment_id}/",
                    web::post().to(comments::edit_comment),
                )
                .route(
                    "/{post_id}/delete_comment/{comment_id}/",
                    web::post().to(comments::delete_comment),
                ),
        )
        .route(
            "/category/{category_slug}/",
            web::get().to(categories::category_posts),
        )
        .route("/profile/{username}/", web::get().to(profiles::profile))
        .route(
            "/profile/{username}/edit/",
            web::post().to(profiles::edit_profile),
        )
        .route("/health", web::get().to(health::health_summary))
        .route("/health/ready", web::get().to(health::readiness_summary))
        .route("/health/live", web::get().to(health::liveness_check))
        .route("/metrics", web::get().to(metrics::serve_metrics));
}
