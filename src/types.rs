//! Common types shared by the gateway and its collaborators.

use mime::Mime;
use serde::{Deserialize, Serialize};

/// Content type stored for posters when the download reports none.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Content type of stored metadata objects.
pub const METADATA_CONTENT_TYPE: &str = "application/json";

/// Body of a successful `GET /api/cache` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterResponse {
    pub poster_url: Option<String>,
    pub year: String,
}

impl PosterResponse {
    /// A result without a cached poster.
    #[must_use]
    pub fn without_poster(year: String) -> Self {
        Self {
            poster_url: None,
            year,
        }
    }
}

/// Title metadata as returned by a metadata provider.
///
/// `year` is already normalized and `poster_url` is `None` when the upstream
/// has no usable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMetadata {
    pub year: String,
    pub poster_url: Option<String>,
}

/// Metadata object persisted next to the poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMetadata {
    pub year: String,
}

/// Downloaded poster image.
#[derive(Debug, Clone)]
pub struct PosterImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object read back from the object store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Resolve the content type to store for a downloaded image.
///
/// The header is kept as received. Falls back to [`DEFAULT_IMAGE_CONTENT_TYPE`]
/// when it is missing or not a valid MIME type.
#[must_use]
pub fn image_content_type(header: Option<&str>) -> String {
    header
        .filter(|value| value.parse::<Mime>().is_ok())
        .map_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_and_null_poster() {
        let response = PosterResponse::without_poster("1999".to_string());
        let json = serde_json::to_value(&response).expect("serializable");
        assert_eq!(json, serde_json::json!({ "posterUrl": null, "year": "1999" }));
    }

    #[test]
    fn content_type_defaults_to_jpeg() {
        assert_eq!(image_content_type(None), "image/jpeg");
        assert_eq!(image_content_type(Some("not a mime")), "image/jpeg");
    }

    #[test]
    fn content_type_is_kept_verbatim() {
        assert_eq!(
            image_content_type(Some("image/png; charset=binary")),
            "image/png; charset=binary"
        );
        assert_eq!(image_content_type(Some("image/webp")), "image/webp");
    }
}
