use crate::acquisition::ImageAsset;
use crate::error::ValidatorError;
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Source of an asset's raw bytes. Reading may suspend (browser blobs are
/// read through a promise) and may fail.
#[allow(async_fn_in_trait)]
pub trait BlobReader {
    async fn read_bytes(&self) -> Result<Vec<u8>, ValidatorError>;
}

impl BlobReader for Vec<u8> {
    async fn read_bytes(&self) -> Result<Vec<u8>, ValidatorError> {
        Ok(self.clone())
    }
}

/// Reads the asset and returns its bytes as plain base64, without any
/// `data:` prefix. Takes the asset by value so the caller's copy is untouched.
pub async fn encode<B: BlobReader>(asset: ImageAsset<B>) -> Result<String, ValidatorError> {
    let bytes = asset.data.read_bytes().await.map_err(|e| {
        log::error!("Failed to read {}: {}", asset.filename, e);
        e
    })?;
    log::debug!("Encoding {} ({} bytes, {})", asset.filename, bytes.len(), asset.mime_type);
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Drops a leading `data:<mime>;base64,` scheme if present.
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(encoded, |(_, payload)| payload),
        None => encoded,
    }
}

/// Splits a base64 data URL into its MIME type and payload.
pub fn split_data_url(url: &str) -> Result<(&str, &str), ValidatorError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ValidatorError::encoding("not a data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ValidatorError::encoding("data URL has no payload"))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| ValidatorError::encoding("data URL is not base64 encoded"))?;
    Ok((mime_type, payload))
}

/// Decodes a base64 data URL (as produced by a canvas snapshot) into bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), ValidatorError> {
    let (mime_type, payload) = split_data_url(url)?;
    let bytes = STANDARD.decode(payload).map_err(ValidatorError::encoding)?;
    Ok((mime_type.to_string(), bytes))
}
