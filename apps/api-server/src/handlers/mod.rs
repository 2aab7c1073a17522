//! HTTP handlers and route configuration.

mod category;
mod health;
mod post;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/category")
                .route("", web::post().to(category::create))
                .route("", web::get().to(category::find_all))
                .route("/{id}", web::get().to(category::find_by_id))
                .route("/{id}", web::put().to(category::update))
                .route("/{id}", web::delete().to(category::delete)),
        )
        .service(
            web::scope("/post")
                .route("", web::post().to(post::create))
                .route("", web::get().to(post::find_by_category))
                .route("/{id}", web::get().to(post::find_by_id))
                .route("/{id}", web::put().to(post::update))
                .route("/{id}", web::delete().to(post::delete)),
        );
}
