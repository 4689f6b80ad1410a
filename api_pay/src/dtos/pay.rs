use chrono::NaiveDateTime;
use db::models::purchase::Purchase;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub film_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub client_secret: String,
    pub payment_reference: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmPurchaseRequest {
    pub film_id: Uuid,
    pub payment_reference: String,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub id: Uuid,
    pub film_id: Uuid,
    pub payment_reference: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        PurchaseResponse {
            id: purchase.id,
            film_id: purchase.film_id,
            payment_reference: purchase.payment_reference,
            created_at: purchase.created_at,
        }
    }
}
