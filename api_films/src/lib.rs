use actix_web::web;

pub mod routes {
    pub mod film;
}
pub mod services {
    pub mod film;
    pub mod upload;
}
mod dtos {
    pub(crate) mod film;
}

pub use dtos::film::FilmResponse;

/// The catalog listing is the one unauthenticated read.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::film::get_films);
}

pub fn configure_secured(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::film::get_film)
        .service(routes::film::post_upload);
}
