use uuid::Uuid;

pub struct PurchaseCreateRequest {
    pub user_id: Uuid,
    pub film_id: Uuid,
    pub payment_reference: String,
}
