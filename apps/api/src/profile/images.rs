use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const PRESIGNED_URL_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Profile,
    Cover,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Profile => "profile",
            ImageKind::Cover => "cover",
        }
    }
}

#[derive(Debug)]
pub struct DecodedImage {
    pub content_type: &'static str,
    pub extension: &'static str,
    pub bytes: Bytes,
}

fn image_format(mime: &str) -> Option<(&'static str, &'static str)> {
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => Some(("image/png", "png")),
        "image/jpeg" | "image/jpg" => Some(("image/jpeg", "jpg")),
        "image/gif" => Some(("image/gif", "gif")),
        "image/webp" => Some(("image/webp", "webp")),
        _ => None,
    }
}

/// Decodes `data:image/<fmt>;base64,<payload>`.
pub fn parse_data_url(data_url: &str) -> Result<DecodedImage, AppError> {
    let invalid = || AppError::Validation("Image must be a base64 data URL".to_string());

    let rest = data_url.trim().strip_prefix("data:").ok_or_else(invalid)?;
    let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
    let mime = header.strip_suffix(";base64").ok_or_else(invalid)?;

    let (content_type, extension) = image_format(mime).ok_or_else(|| {
        AppError::Validation(format!("Unsupported image type '{mime}'"))
    })?;

    let bytes = BASE64.decode(payload.trim()).map_err(|_| invalid())?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Image is empty".to_string()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::Validation(format!(
            "Image exceeds the {} MB limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }

    Ok(DecodedImage {
        content_type,
        extension,
        bytes: Bytes::from(bytes),
    })
}

pub fn image_key(user_id: Uuid, kind: ImageKind, extension: &str) -> String {
    format!(
        "profiles/{}/{}-{}.{}",
        user_id,
        kind.as_str(),
        Uuid::new_v4().simple(),
        extension
    )
}

/// Uploads the image and returns its object key.
pub async fn upload_image(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    user_id: Uuid,
    kind: ImageKind,
    image: DecodedImage,
) -> Result<String, AppError> {
    let key = image_key(user_id, kind, image.extension);
    s3.put_object()
        .bucket(s3_bucket)
        .key(&key)
        .body(ByteStream::from(image.bytes))
        .content_type(image.content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("upload failed: {e}")))?;

    info!("Uploaded {} image to s3://{}/{}", kind.as_str(), s3_bucket, key);
    Ok(key)
}

pub async fn presigned_url(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    key: &str,
) -> Result<String, AppError> {
    let config = PresigningConfig::expires_in(PRESIGNED_URL_TTL)
        .map_err(|e| AppError::S3(format!("presigning config: {e}")))?;
    let request = s3
        .get_object()
        .bucket(s3_bucket)
        .key(key)
        .presigned(config)
        .await
        .map_err(|e| AppError::S3(format!("presigning failed: {e}")))?;
    Ok(request.uri().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_png_data_url() {
        let url = format!("data:image/png;base64,{}", BASE64.encode(b"\x89PNG fake"));
        let image = parse_data_url(&url).unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.extension, "png");
        assert_eq!(&image.bytes[..], b"\x89PNG fake");
    }

    #[test]
    fn test_jpg_alias() {
        let url = format!("data:image/jpg;base64,{}", BASE64.encode(b"jpeg"));
        let image = parse_data_url(&url).unwrap();
        assert_eq!(image.content_type, "image/jpeg");
        assert_eq!(image.extension, "jpg");
    }

    #[test]
    fn test_rejects_non_data_urls() {
        assert!(matches!(
            parse_data_url("https://example.com/cat.png"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_data_url("data:image/png,not-base64-flagged"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let url = format!("data:text/html;base64,{}", BASE64.encode(b"<p>"));
        match parse_data_url(&url) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("text/html")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_payload() {
        assert!(parse_data_url("data:image/png;base64,!!!").is_err());
        assert!(parse_data_url("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_key_layout() {
        let user_id = Uuid::nil();
        let key = image_key(user_id, ImageKind::Cover, "webp");
        assert!(key.starts_with(&format!("profiles/{user_id}/cover-")));
        assert!(key.ends_with(".webp"));
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let kind: ImageKind = serde_json::from_str("\"profile\"").unwrap();
        assert_eq!(kind, ImageKind::Profile);
        assert!(serde_json::from_str::<ImageKind>("\"banner\"").is_err());
    }
}
