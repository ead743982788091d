//! Route table for the versioned JSON API.

use actix_web::web;

use super::{auth, lists};

/// Mount all `/api/v1` routes onto `cfg`.
///
/// The caller wraps the surrounding scope with the session middleware, so
/// every route here can rely on the cookie session being available.
///
/// `bucket-lists/recent` is registered before `bucket-lists/{slug}` so the
/// literal segment wins over the slug capture.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout)),
    )
    .service(
        web::scope("/bucket-lists")
            .route("/recent", web::get().to(lists::recent))
            .route("", web::get().to(lists::browse))
            .route("", web::post().to(lists::create))
            .route("/{slug}", web::get().to(lists::fetch))
            .route("/{slug}", web::put().to(lists::update))
            .route("/{slug}", web::delete().to(lists::delete)),
    );
}
