use chrono::NaiveDateTime;
use db::models::film::Film;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public film summary. Price is reported in major units; the stored media
/// name is deliberately absent — the asset is only reachable through the
/// gated watch endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub film_type: String,
    pub thumbnail_name: Option<String>,
    pub creator_id: Uuid,
    pub created_at: NaiveDateTime,
}

impl From<Film> for FilmResponse {
    fn from(film: Film) -> Self {
        FilmResponse {
            id: film.id,
            title: film.title,
            description: film.description,
            price: film.price_cents as f64 / 100.0,
            film_type: film.film_type,
            thumbnail_name: film.thumbnail_name,
            creator_id: film.creator_id,
            created_at: film.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedFilmResponse {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn summary_never_exposes_the_stored_media_name() {
        let film = Film {
            id: Uuid::new_v4(),
            title: "Short".to_string(),
            description: "A short film".to_string(),
            price_cents: 999,
            film_type: "short".to_string(),
            file_name: "3f2a.mp4".to_string(),
            thumbnail_name: Some("3f2a.jpg".to_string()),
            creator_id: Uuid::new_v4(),
            created_at: Utc::now().naive_utc(),
        };

        let json = serde_json::to_value(FilmResponse::from(film)).unwrap();
        assert_eq!(json["price"], serde_json::json!(9.99));
        assert!(json.get("file_name").is_none());
        assert!(
            !json.to_string().contains("3f2a.mp4"),
            "media name leaked into the public summary"
        );
    }
}
