use crate::handlers;
use actix_web::{web, Resource};

pub fn config() -> Resource {
    web::resource("/")
        .route(web::get().to(handlers::index))
        .route(web::post().to(handlers::search))
}
