//! HTTP handlers and route configuration.

mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::{method_not_allowed, not_found, path_error_handler};

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Id segments only match digits; anything else falls through to the JSON 404
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/posts")
                .route(web::get().to(posts::list_all_posts))
                .route(web::post().to(posts::create_post))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/posts/mine/{author_id:-?\\d+}")
                .route(web::get().to(posts::list_my_posts))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/posts/{post_id:\\d+}")
                .route(web::put().to(posts::edit_post))
                .route(web::delete().to(posts::delete_post))
                .default_service(web::to(method_not_allowed)),
        )
        .default_service(web::to(not_found));
}
