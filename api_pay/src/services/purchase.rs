use common::error::{AppError, Res};
use db::{dtos::purchase::PurchaseCreateRequest, models::purchase::Purchase};
use sqlx::PgPool;
use stripe::Client;
use uuid::Uuid;

use crate::services::pay;

/// Confirms a purchase for the authenticated buyer.
///
/// Retries with the same payment reference return the existing row and write
/// nothing; a different reference for an already-owned film is a conflict.
/// The insert itself is a single `ON CONFLICT DO NOTHING` statement, so a
/// concurrent confirmation loses the race cleanly and is re-read under the
/// same rule.
pub async fn confirm_purchase(
    pool: &PgPool,
    client: &Client,
    user_id: Uuid,
    film_id: Uuid,
    payment_reference: &str,
) -> Res<Purchase> {
    let film = db::film::get_film(pool, film_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".to_string()))?;

    if let Some(existing) = db::purchase::get_purchase(pool, user_id, film_id).await? {
        return idempotent_result(existing, payment_reference);
    }

    pay::verify_confirmed_intent(client, payment_reference, user_id, &film).await?;

    match db::purchase::insert_purchase_if_absent(
        pool,
        &PurchaseCreateRequest {
            user_id,
            film_id,
            payment_reference: payment_reference.to_string(),
        },
    )
    .await?
    {
        Some(purchase) => {
            log::info!("purchase recorded: user {} film {}", user_id, film_id);
            Ok(purchase)
        }
        None => {
            // lost a race with another confirmation for the same pair
            let existing = db::purchase::get_purchase(pool, user_id, film_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal("Purchase vanished after conflicting insert".to_string())
                })?;
            idempotent_result(existing, payment_reference)
        }
    }
}

fn idempotent_result(existing: Purchase, payment_reference: &str) -> Res<Purchase> {
    if existing.payment_reference.as_deref() == Some(payment_reference) {
        Ok(existing)
    } else {
        Err(AppError::Conflict(
            "Film has already been purchased".to_string(),
        ))
    }
}

/// Webhook-side entitlement recording. Duplicates are expected (the client
/// may have confirmed first, and Stripe redelivers events); they are simply
/// not re-inserted.
pub async fn record_entitlement(
    pool: &PgPool,
    user_id: Uuid,
    film_id: Uuid,
    payment_reference: &str,
) -> Res<()> {
    match db::purchase::insert_purchase_if_absent(
        pool,
        &PurchaseCreateRequest {
            user_id,
            film_id,
            payment_reference: payment_reference.to_string(),
        },
    )
    .await?
    {
        Some(purchase) => {
            log::info!(
                "entitlement recorded from webhook: user {} film {} ({})",
                user_id,
                film_id,
                purchase.id
            );
        }
        None => {
            log::debug!(
                "entitlement already recorded for user {} film {}",
                user_id,
                film_id
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn purchase(reference: Option<&str>) -> Purchase {
        Purchase {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            film_id: Uuid::new_v4(),
            payment_reference: reference.map(str::to_string),
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn same_reference_retry_is_idempotent() {
        let existing = purchase(Some("pi_123"));
        let result = idempotent_result(existing.clone(), "pi_123").unwrap();
        assert_eq!(result.id, existing.id);
    }

    #[test]
    fn different_reference_is_a_conflict() {
        let existing = purchase(Some("pi_123"));
        assert!(matches!(
            idempotent_result(existing, "pi_456"),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn reference_free_row_conflicts_with_new_reference() {
        let existing = purchase(None);
        assert!(matches!(
            idempotent_result(existing, "pi_123"),
            Err(AppError::Conflict(_))
        ));
    }
}
