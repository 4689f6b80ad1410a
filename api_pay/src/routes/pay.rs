use actix_web::{Responder, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::JwtClaims;
use common::stripe;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::pay::{ConfirmPurchaseRequest, CreatePaymentRequest, CreatePaymentResponse};
use crate::services;

/// Creates a Stripe payment intent for a film.
///
/// # Input
/// - `req`: JSON payload containing the film id
///
/// # Output
/// - Success: 200 OK with the intent's client secret and reference; the
///   frontend completes the card payment with the secret and then calls
///   `/api/confirm-purchase` with the reference
/// - Error: 404 Not Found for an unknown film, 409 Conflict when the buyer
///   already owns it, 502 when Stripe rejects the call
///
/// No purchase row is written here; entitlement is only recorded once the
/// processor reports the payment succeeded.
#[post("/create-payment")]
pub async fn post_create_payment(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreatePaymentRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    let film = db::film::get_film(pg_pool, req.film_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".to_string()))?;

    if db::purchase::exists_purchase(pg_pool, claims.user_id, film.id).await? {
        return Err(AppError::Conflict(
            "Film has already been purchased".to_string(),
        ));
    }

    let client = stripe::create_client(&config.stripe_secret_key);
    let intent =
        services::pay::create_film_payment_intent(&client, &film, claims.user_id).await?;

    let client_secret = intent
        .client_secret
        .ok_or_else(|| AppError::Internal("Payment intent has no client secret".to_string()))?;

    Success::ok(CreatePaymentResponse {
        client_secret,
        payment_reference: intent.id.to_string(),
    })
}

/// Records the entitlement for a completed payment.
///
/// # Input
/// - `req`: JSON payload with the film id and the payment reference returned
///   by `/api/create-payment`
///
/// # Output
/// - Success: 200 OK with the purchase summary; retrying with the same
///   reference returns the same purchase and writes nothing
/// - Error: 404 unknown film, 400 when the intent has not succeeded or the
///   amount is wrong, 403 when the intent belongs to another buyer or film,
///   409 when the film was already purchased under a different reference
#[post("/confirm-purchase")]
pub async fn post_confirm_purchase(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<ConfirmPurchaseRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let client = stripe::create_client(&config.stripe_secret_key);

    let purchase = services::purchase::confirm_purchase(
        pg_pool,
        &client,
        claims.user_id,
        req.film_id,
        &req.payment_reference,
    )
    .await?;

    Success::ok(crate::dtos::pay::PurchaseResponse::from(purchase))
}

/// Handles Stripe webhook events for payment processing.
///
/// # Input
/// - `payload`: Raw string containing the webhook event data
/// - `req`: HTTP request containing Stripe signature in headers
///
/// # Output
/// - Success: Returns 200 OK when the event is processed
/// - Error: Returns 400 Bad Request for a missing or invalid signature
///
/// # Note
/// This endpoint is called by Stripe's servers, not by the frontend.
/// Configure it in the Stripe Dashboard under Webhooks and subscribe to
/// `payment_intent.succeeded`.
#[post("/webhook")]
pub async fn post_webhook(
    payload: String,
    req: actix_web::HttpRequest,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let signature = match req.headers().get("stripe-signature") {
        Some(signature) => signature.to_str().unwrap_or(""),
        None => return Err(AppError::BadRequest("Stripe signature missing".to_string())),
    };

    let event =
        services::pay::construct_event(&payload, signature, &config.stripe_webhook_secret)?;

    let pg_pool: &PgPool = &**pool;
    services::pay::process_webhook_event(pg_pool, event).await?;

    Success::ok("Webhook processed successfully")
}
