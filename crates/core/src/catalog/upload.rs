//! Naming rules for uploaded product images and detail pairs.
//!
//! Pure functions only: nothing here touches the filesystem. The bytes of an
//! [`UploadedImage`] are written later, once the product has an identifier.

use super::error::CatalogError;
use super::types::ProductDetail;

/// A file received in a multipart request. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadedImage {
    /// Filename as sent by the browser.
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(original_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes: bytes.into(),
        }
    }

    /// An upload is empty when no file was chosen or the file has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The filename under which the image is stored.
    ///
    /// Fails when the upload has content but its name reduces to nothing
    /// after cleaning.
    pub fn cleaned_name(&self) -> Result<String, CatalogError> {
        clean_filename(&self.original_name)
            .ok_or_else(|| CatalogError::InvalidFileName(self.original_name.clone()))
    }
}

/// Strips directory and path-traversal segments from an uploaded filename.
///
/// Both `/` and `\` count as separators. `.` and `..` segments are dropped and
/// the last remaining segment is kept verbatim, surrounding whitespace
/// included. Returns `None` when nothing remains.
pub fn clean_filename(original: &str) -> Option<String> {
    original
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .last()
        .map(str::to_string)
}

/// Filename for the primary image, or `None` when the upload is empty.
pub fn main_image_name(image: &UploadedImage) -> Result<Option<String>, CatalogError> {
    if image.is_empty() {
        return Ok(None);
    }
    image.cleaned_name().map(Some)
}

/// Filenames of the non-empty secondary uploads, in upload order.
pub fn extra_image_names(images: &[UploadedImage]) -> Result<Vec<String>, CatalogError> {
    images
        .iter()
        .filter(|image| !image.is_empty())
        .map(UploadedImage::cleaned_name)
        .collect()
}

/// Pairs detail names and values index-wise.
///
/// A pair is kept only when both strings are non-empty. Sequences of
/// different length are rejected.
pub fn pair_details(names: &[String], values: &[String]) -> Result<Vec<ProductDetail>, CatalogError> {
    if names.len() != values.len() {
        return Err(CatalogError::MismatchedDetails {
            names: names.len(),
            values: values.len(),
        });
    }

    Ok(names
        .iter()
        .zip(values)
        .filter(|(name, value)| !name.is_empty() && !value.is_empty())
        .map(|(name, value)| ProductDetail::new(name.as_str(), value.as_str()))
        .collect())
}
