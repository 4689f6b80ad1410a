//! HTTP Range header handling for gated media delivery (RFC 7233, single
//! byte-range). Players seek by issuing `bytes=start-end` requests; anything
//! unparsable falls back to the full representation.

/// A resolved byte range within an asset of known total size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Outcome of interpreting an optional `Range` header against a file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No (or malformed) range header: serve the whole file with 200.
    Full,
    /// A satisfiable range: serve 206 with a `Content-Range` header.
    Partial(ByteRange),
    /// Start beyond the end of the file: 416.
    Unsatisfiable,
}

/// Interprets `header` ("bytes=start-end", "bytes=start-" or "bytes=-suffix")
/// against `total_size`. Malformed specs degrade to the full representation
/// rather than erroring, matching how browsers expect servers to behave.
pub fn resolve_range(header: Option<&str>, total_size: u64) -> RangeOutcome {
    if total_size == 0 {
        return RangeOutcome::Full;
    }

    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };

    // suffix form: "bytes=-N" means the final N bytes
    if start_str.is_empty() {
        return match end_str.parse::<u64>() {
            Ok(0) | Err(_) => RangeOutcome::Full,
            Ok(suffix) => {
                let start = total_size.saturating_sub(suffix);
                RangeOutcome::Partial(ByteRange {
                    start,
                    end: total_size - 1,
                })
            }
        };
    }

    let Ok(start) = start_str.parse::<u64>() else {
        return RangeOutcome::Full;
    };

    if start >= total_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        total_size - 1
    } else {
        match end_str.parse::<u64>() {
            Ok(end) => end.min(total_size - 1),
            Err(_) => return RangeOutcome::Full,
        }
    };

    if end < start {
        return RangeOutcome::Full;
    }

    RangeOutcome::Partial(ByteRange { start, end })
}

/// Content type by stored file extension. The upload path controls the
/// extension, so the closed set here is enough.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("m4v") => "video/x-m4v",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("avi") => "video/x-msvideo",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_serves_full_file() {
        assert_eq!(resolve_range(None, 1000), RangeOutcome::Full);
    }

    #[test]
    fn bounded_range() {
        assert_eq!(
            resolve_range(Some("bytes=100-199"), 1000),
            RangeOutcome::Partial(ByteRange {
                start: 100,
                end: 199
            })
        );
    }

    #[test]
    fn open_ended_range_runs_to_eof() {
        assert_eq!(
            resolve_range(Some("bytes=500-"), 1000),
            RangeOutcome::Partial(ByteRange {
                start: 500,
                end: 999
            })
        );
    }

    #[test]
    fn suffix_range_takes_the_tail() {
        assert_eq!(
            resolve_range(Some("bytes=-200"), 1000),
            RangeOutcome::Partial(ByteRange {
                start: 800,
                end: 999
            })
        );
    }

    #[test]
    fn end_is_clamped_to_file_size() {
        assert_eq!(
            resolve_range(Some("bytes=900-5000"), 1000),
            RangeOutcome::Partial(ByteRange {
                start: 900,
                end: 999
            })
        );
    }

    #[test]
    fn start_past_eof_is_unsatisfiable() {
        assert_eq!(
            resolve_range(Some("bytes=1000-"), 1000),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn malformed_specs_degrade_to_full() {
        assert_eq!(resolve_range(Some("bytes=abc-def"), 1000), RangeOutcome::Full);
        assert_eq!(resolve_range(Some("items=0-10"), 1000), RangeOutcome::Full);
        assert_eq!(resolve_range(Some("bytes=200-100"), 1000), RangeOutcome::Full);
    }

    #[test]
    fn partial_length_is_inclusive() {
        let ByteRange { start, end } = match resolve_range(Some("bytes=100-199"), 1000) {
            RangeOutcome::Partial(range) => range,
            other => panic!("expected partial, got {:?}", other),
        };
        assert_eq!(ByteRange { start, end }.length(), 100);
    }

    #[test]
    fn video_content_types() {
        assert_eq!(content_type_for("abc.mp4"), "video/mp4");
        assert_eq!(content_type_for("abc.webm"), "video/webm");
        assert_eq!(content_type_for("abc"), "application/octet-stream");
        assert_eq!(content_type_for("abc.MP4"), "video/mp4");
    }
}
