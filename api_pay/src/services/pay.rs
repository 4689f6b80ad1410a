use common::error::{AppError, Res};
use db::models::film::Film;
use sqlx::PgPool;
use stripe::{
    Client, CreatePaymentIntent, Currency, Event, EventObject, EventType, PaymentIntent,
    PaymentIntentId, PaymentIntentStatus, Webhook,
};
use uuid::Uuid;

use crate::services::purchase;

/// Creates a payment intent for the film's price in minor units, tagged with
/// the buyer and film so confirmation (and the webhook) can bind the charge
/// to an entitlement. No local state is written here.
pub async fn create_film_payment_intent(
    client: &Client,
    film: &Film,
    user_id: Uuid,
) -> Res<PaymentIntent> {
    let mut params = CreatePaymentIntent::new(film.price_cents, Currency::USD);

    let mut metadata = stripe::Metadata::new();
    metadata.insert("user_id".to_string(), user_id.to_string());
    metadata.insert("film_id".to_string(), film.id.to_string());
    params.metadata = Some(metadata);

    PaymentIntent::create(client, params)
        .await
        .map_err(AppError::from)
}

/// Re-retrieves the intent from Stripe and checks that it actually succeeded
/// for this buyer, this film and this amount. The client's word that payment
/// went through is never taken.
pub async fn verify_confirmed_intent(
    client: &Client,
    payment_reference: &str,
    user_id: Uuid,
    film: &Film,
) -> Res<PaymentIntent> {
    let intent_id = payment_reference
        .parse::<PaymentIntentId>()
        .map_err(|e| AppError::BadRequest(format!("Invalid payment reference: {}", e)))?;

    let intent = PaymentIntent::retrieve(client, &intent_id, &[])
        .await
        .map_err(AppError::from)?;

    if intent.status != PaymentIntentStatus::Succeeded {
        return Err(AppError::BadRequest(
            "Payment has not been completed".to_string(),
        ));
    }

    let bound_user = intent.metadata.get("user_id").map(String::as_str);
    let bound_film = intent.metadata.get("film_id").map(String::as_str);
    if bound_user != Some(user_id.to_string().as_str())
        || bound_film != Some(film.id.to_string().as_str())
    {
        return Err(AppError::Forbidden(
            "Payment does not belong to this purchase".to_string(),
        ));
    }

    if intent.amount != film.price_cents {
        return Err(AppError::BadRequest(
            "Payment amount does not match the film price".to_string(),
        ));
    }

    Ok(intent)
}

/// Creates an event for the webhook based on the request payload and signature.
/// Requires a webhook secret key.
pub fn construct_event(payload: &str, signature: &str, webhook_secret: &str) -> Res<Event> {
    match Webhook::construct_event(payload, signature, webhook_secret) {
        Ok(event) => Ok(event),
        Err(e) => {
            log::error!("Error constructing webhook event: {}", e);
            Err(AppError::BadRequest(format!("Webhook Error: {}", e)))
        }
    }
}

/// Processes the webhook event. Succeeded payment intents with well-formed
/// metadata record the entitlement through the same idempotent insert used
/// by the confirm endpoint; everything else is logged and acknowledged.
pub async fn process_webhook_event(pool: &PgPool, event: Event) -> Res<()> {
    log::info!("Processing webhook event: {}", event.type_);

    match event.type_ {
        EventType::PaymentIntentSucceeded => {
            if let EventObject::PaymentIntent(payment_intent) = event.data.object {
                log::info!("PaymentIntent was successful: {}", payment_intent.id);
                record_entitlement_from_intent(pool, &payment_intent).await?;
            }
        }
        EventType::PaymentIntentPaymentFailed => {
            if let EventObject::PaymentIntent(payment_intent) = event.data.object {
                log::warn!("PaymentIntent failed: {}", payment_intent.id);
            }
        }
        _ => {
            log::info!("Unhandled event type: {}", event.type_);
        }
    }

    Ok(())
}

async fn record_entitlement_from_intent(pool: &PgPool, intent: &PaymentIntent) -> Res<()> {
    let user_id = intent.metadata.get("user_id").and_then(parse_uuid);
    let film_id = intent.metadata.get("film_id").and_then(parse_uuid);

    let (Some(user_id), Some(film_id)) = (user_id, film_id) else {
        // an intent created outside this service; nothing to record
        log::warn!("PaymentIntent {} carries no purchase metadata", intent.id);
        return Ok(());
    };

    purchase::record_entitlement(pool, user_id, film_id, intent.id.as_str()).await
}

fn parse_uuid(value: &String) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_webhook_payload_is_rejected() {
        let result = construct_event(
            r#"{"id": "evt_test", "object": "event"}"#,
            "t=1,v1=deadbeef",
            "whsec_test",
        );
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
