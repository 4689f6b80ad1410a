use std::io::SeekFrom;
use std::path::Path;

use actix_web::{HttpResponse, body::SizedStream, http::header, web::Bytes};
use common::error::{AppError, Res};
use db::models::film::Film;
use futures::Stream;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::misc::range::{ByteRange, RangeOutcome, content_type_for, resolve_range};

const CHUNK_SIZE: u64 = 64 * 1024;

/// Opens the film's stored asset and answers with a chunked body, honoring a
/// single byte-range when the player asks for one. The caller has already
/// proven entitlement; this function only moves bytes.
pub async fn serve_media(upload_dir: &str, film: &Film, range_header: Option<&str>) -> Res<HttpResponse> {
    let path = Path::new(upload_dir).join(&film.file_name);

    let mut file = File::open(&path).await.map_err(|e| {
        log::error!(
            "media asset missing for film {}: {} ({})",
            film.id,
            film.file_name,
            e
        );
        AppError::Internal("Media asset is unavailable".to_string())
    })?;

    let total_size = file.metadata().await?.len();
    let content_type = content_type_for(&film.file_name);

    match resolve_range(range_header, total_size) {
        RangeOutcome::Unsatisfiable => Ok(HttpResponse::RangeNotSatisfiable()
            .insert_header((header::CONTENT_RANGE, format!("bytes */{}", total_size)))
            .finish()),
        RangeOutcome::Full => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, content_type))
            .insert_header((header::ACCEPT_RANGES, "bytes"))
            .body(SizedStream::new(
                total_size,
                chunk_stream(file, total_size),
            ))),
        RangeOutcome::Partial(range) => {
            file.seek(SeekFrom::Start(range.start)).await?;
            Ok(HttpResponse::PartialContent()
                .insert_header((header::CONTENT_TYPE, content_type))
                .insert_header((header::ACCEPT_RANGES, "bytes"))
                .insert_header((
                    header::CONTENT_RANGE,
                    content_range_value(&range, total_size),
                ))
                .body(SizedStream::new(
                    range.length(),
                    chunk_stream(file, range.length()),
                )))
        }
    }
}

fn content_range_value(range: &ByteRange, total_size: u64) -> String {
    format!("bytes {}-{}/{}", range.start, range.end, total_size)
}

/// Reads up to `remaining` bytes from the file in `CHUNK_SIZE` pieces. The
/// whole asset is never buffered; uploads can be around a gigabyte.
fn chunk_stream(file: File, remaining: u64) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
    futures::stream::unfold((file, remaining), |(mut file, remaining)| async move {
        if remaining == 0 {
            return None;
        }
        let capacity = CHUNK_SIZE.min(remaining) as usize;
        let mut buf = vec![0u8; capacity];
        match file.read(&mut buf).await {
            Ok(0) => None,
            Ok(n) => {
                buf.truncate(n);
                let remaining = remaining - n as u64;
                Some((Ok(Bytes::from(buf)), (file, remaining)))
            }
            Err(e) => Some((Err(e), (file, 0))),
        }
    })
}
