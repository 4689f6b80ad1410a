use actix_web::web;

pub mod routes {
    pub mod pay;
    pub mod watch;
}
pub mod services {
    pub mod pay;
    pub mod purchase;
    pub mod stream;
}
mod dtos {
    pub(crate) mod pay;
}
pub mod misc {
    pub mod range;
}

/// Stripe calls this endpoint, not browsers; it authenticates with the
/// webhook signature instead of a bearer credential.
pub fn configure_webhook(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::pay::post_webhook);
}

pub fn configure_secured(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::pay::post_create_payment)
        .service(routes::pay::post_confirm_purchase)
        .service(routes::watch::get_watch)
        .service(routes::watch::get_watch_alias);
}
