use actix_cors::Cors;
use actix_web::http::header;

pub fn middleware(origin: &str) -> Cors {
    Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::RANGE,
        ])
        .allowed_origin(origin)
        .expose_headers(&[header::CONTENT_RANGE, header::ACCEPT_RANGES])
        .supports_credentials()
        .max_age(3600)
}
