use uuid::Uuid;

pub struct FilmCreateRequest {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub film_type: String,
    pub file_name: String,
    pub thumbnail_name: Option<String>,
    pub creator_id: Uuid,
}
