use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}
pub mod routes {
    pub mod auth;
    pub mod user;
}
pub mod services {
    pub mod auth;
    pub mod user;
}
mod dtos {
    pub(crate) mod auth;
}

pub use dtos::auth::UserResponse;

/// Registration and login, mounted outside the bearer-guarded scope.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::auth::post_register)
        .service(routes::auth::post_login);
}

/// Routes that require a validated credential.
pub fn configure_secured(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::user::get_current_user);
}

pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
