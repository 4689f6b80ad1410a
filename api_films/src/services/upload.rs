use actix_multipart::Multipart;
use actix_web::web::Bytes;
use common::error::{AppError, Res};
use futures::StreamExt;
use uuid::Uuid;

// Limits carried over from the original deployment configuration.
const MAX_MEDIA_BYTES: usize = 1024 * 1024 * 1024; // 1 GiB
const MAX_THUMBNAIL_BYTES: usize = 10 * 1024 * 1024; // 10 MiB

/// Parsed multipart upload form. Text fields are collected as strings,
/// file fields as raw bytes with their client-side file names.
#[derive(Default)]
pub struct UploadForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub film_type: Option<String>,
    pub media: Option<(String, Vec<u8>)>,
    pub thumbnail: Option<(String, Vec<u8>)>,
}

pub async fn collect_upload(payload: &mut Multipart) -> Res<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?;

        let name = field.name().to_string();
        match name.as_str() {
            "title" => form.title = Some(read_text_field(&mut field).await?),
            "description" => form.description = Some(read_text_field(&mut field).await?),
            "price" => form.price = Some(read_text_field(&mut field).await?),
            "film_type" => form.film_type = Some(read_text_field(&mut field).await?),
            "file" => {
                let file_name = original_file_name(&field);
                let bytes = read_file_field(&mut field, MAX_MEDIA_BYTES).await?;
                form.media = Some((file_name, bytes));
            }
            "thumbnail" => {
                let file_name = original_file_name(&field);
                let bytes = read_file_field(&mut field, MAX_THUMBNAIL_BYTES).await?;
                form.thumbnail = Some((file_name, bytes));
            }
            // unknown fields are drained and dropped
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| {
                        AppError::BadRequest(format!("Invalid multipart payload: {}", e))
                    })?;
                }
            }
        }
    }

    Ok(form)
}

fn original_file_name(field: &actix_multipart::Field) -> String {
    field
        .content_disposition()
        .get_filename()
        .unwrap_or_default()
        .to_string()
}

async fn read_text_field(field: &mut actix_multipart::Field) -> Res<String> {
    let bytes = read_file_field(field, 64 * 1024).await?;
    String::from_utf8(bytes)
        .map(|s| s.trim().to_string())
        .map_err(|_| AppError::BadRequest("Form field is not valid UTF-8".to_string()))
}

async fn read_file_field(field: &mut actix_multipart::Field, max_bytes: usize) -> Res<Vec<u8>> {
    let mut data: Vec<u8> = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk: Bytes =
            chunk.map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?;
        if data.len() + chunk.len() > max_bytes {
            return Err(AppError::BadRequest(
                "Uploaded file exceeds the size limit".to_string(),
            ));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Persists upload bytes under the configured directory as `<uuid>.<ext>`,
/// keeping only the extension from the client-supplied name. Returns the
/// stored file name.
pub async fn store_file(upload_dir: &str, original_name: &str, bytes: &[u8]) -> Res<String> {
    let extension = original_name
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(char::is_alphanumeric))
        .map(|ext| ext.to_lowercase());

    let stored_name = match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };

    tokio::fs::create_dir_all(upload_dir).await?;
    let path = std::path::Path::new(upload_dir).join(&stored_name);
    tokio::fs::write(&path, bytes).await?;

    Ok(stored_name)
}

/// Converts a major-unit price string ("9.99") to integer cents.
pub fn parse_price_to_cents(price: &str) -> Res<i64> {
    let amount: f64 = price
        .parse()
        .map_err(|_| AppError::BadRequest("Price must be a number".to_string()))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::BadRequest("Price must be positive".to_string()));
    }

    let cents = (amount * 100.0).round() as i64;
    if cents <= 0 {
        return Err(AppError::BadRequest("Price must be positive".to_string()));
    }
    Ok(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_units_to_cents() {
        assert_eq!(parse_price_to_cents("9.99").unwrap(), 999);
        assert_eq!(parse_price_to_cents("10").unwrap(), 1000);
        assert_eq!(parse_price_to_cents("0.01").unwrap(), 1);
    }

    #[test]
    fn rejects_non_positive_prices() {
        assert!(parse_price_to_cents("0").is_err());
        assert!(parse_price_to_cents("-5").is_err());
        assert!(parse_price_to_cents("0.001").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_price_to_cents("abc").is_err());
        assert!(parse_price_to_cents("NaN").is_err());
        assert!(parse_price_to_cents("inf").is_err());
    }
}
