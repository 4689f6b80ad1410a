use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage, HttpResponse,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use common::{env_config::Config, jwt};
use futures::future::{Ready, ok};

/// Bearer-credential guard. Extracts the `Authorization: Bearer` token,
/// validates signature and expiry, and inserts the claims into the request
/// extensions for handlers (`web::ReqData<JwtClaims>`). Requests without a
/// valid credential are answered with 401 and never reach the inner service.
pub struct AuthMiddleware {}

impl AuthMiddleware {
    pub fn new() -> Self {
        AuthMiddleware {}
    }
}

impl Default for AuthMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token_value = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(|token| token.to_owned());

        let config = &***req
            .app_data::<web::Data<Arc<Config>>>()
            .expect("Config app_data missing");
        let secret = config.jwt_config.secret.clone();

        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let Some(token) = token_value else {
                let response = HttpResponse::Unauthorized()
                    .json(serde_json::json!({"message": "No authorization token provided"}))
                    .map_into_boxed_body();
                return Ok(req.into_response(response));
            };

            match jwt::validate_jwt(&token, &secret) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Err(_) => {
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({"message": "Invalid token"}))
                        .map_into_boxed_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test};
    use common::env_config::JwtConfig;
    use common::jwt::{ClaimsSpec, JwtClaims, generate_jwt};
    use uuid::Uuid;

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            environment: "development".to_string(),
            database_url: "postgres://localhost/test".to_string(),
            jwt_config: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 24,
            },
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            num_workers: 1,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            console_logging_enabled: false,
            upload_dir: "uploads".to_string(),
            stripe_secret_key: "sk_test".to_string(),
            stripe_webhook_secret: "whsec_test".to_string(),
        })
    }

    async fn echo_user(claims: web::ReqData<JwtClaims>) -> HttpResponse {
        HttpResponse::Ok().body(claims.user_id.to_string())
    }

    macro_rules! secured_app {
        ($config:expr) => {
            test::init_service(
                App::new().app_data(web::Data::new($config)).service(
                    web::scope("")
                        .wrap(AuthMiddleware::new())
                        .route("/secured", web::get().to(echo_user)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn missing_token_is_rejected() {
        let app = secured_app!(test_config());
        let req = test::TestRequest::get().uri("/secured").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn malformed_token_is_rejected() {
        let app = secured_app!(test_config());
        let req = test::TestRequest::get()
            .uri("/secured")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn valid_token_reaches_handler_with_claims() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = generate_jwt(
            ClaimsSpec {
                user_id,
                is_filmmaker: false,
            },
            &config.jwt_config,
        )
        .unwrap();

        let app = secured_app!(config);
        let req = test::TestRequest::get()
            .uri("/secured")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = generate_jwt(
            ClaimsSpec {
                user_id: Uuid::new_v4(),
                is_filmmaker: false,
            },
            &JwtConfig {
                secret: "other-secret".to_string(),
                expiration_hours: 24,
            },
        )
        .unwrap();

        let app = secured_app!(test_config());
        let req = test::TestRequest::get()
            .uri("/secured")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
