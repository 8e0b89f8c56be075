use gloo_file::{Blob, File as GlooFile, ObjectUrl};
use idcard_shared::encoder::decode_data_url;
use idcard_shared::{BlobReader, ImageAsset, ValidatorError};

/// Browser blob behind an `ImageAsset`. Bytes are read lazily at submit time.
#[derive(Clone, Debug)]
pub struct BrowserBlob(Blob);

impl BlobReader for BrowserBlob {
    async fn read_bytes(&self) -> Result<Vec<u8>, ValidatorError> {
        gloo_file::futures::read_as_bytes(&self.0)
            .await
            .map_err(ValidatorError::encoding)
    }
}

pub fn asset_from_file(file: GlooFile) -> (ImageAsset<BrowserBlob>, ObjectUrl) {
    let asset = ImageAsset::new(
        BrowserBlob((*file).clone()),
        file.name(),
        file.raw_mime_type(),
    );
    (asset, ObjectUrl::from(file))
}

/// Wraps a canvas snapshot as a camera still with its own preview URL.
pub fn asset_from_snapshot(
    data_url: &str,
) -> Result<(ImageAsset<BrowserBlob>, ObjectUrl), ValidatorError> {
    let (mime_type, bytes) = decode_data_url(data_url)?;
    let blob = Blob::new_with_options(bytes.as_slice(), Some(&mime_type));
    let preview = ObjectUrl::from(blob.clone());
    Ok((ImageAsset::camera_still(BrowserBlob(blob)), preview))
}
