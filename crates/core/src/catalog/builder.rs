//! Assembly of a [`ProductDraft`] from a form submission.
//!
//! The builder takes every collection as a finished batch and hands out an
//! immutable snapshot, so a half-built product is never observable.

use chrono::{DateTime, Utc};

use super::error::CatalogError;
use super::types::{Product, ProductDetail, ProductDraft, ProductFields};
use super::upload::{extra_image_names, main_image_name, pair_details, UploadedImage};

/// Everything the product form posts in one request.
#[derive(Debug, Clone, Default)]
pub struct ProductSubmission {
    pub fields: ProductFields,
    /// `None` when the form had no `fileImage` part at all.
    pub main_image: Option<UploadedImage>,
    pub extra_images: Vec<UploadedImage>,
    pub detail_names: Vec<String>,
    pub detail_values: Vec<String>,
}

impl ProductSubmission {
    pub fn new(fields: ProductFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn with_main_image(mut self, image: UploadedImage) -> Self {
        self.main_image = Some(image);
        self
    }

    pub fn with_extra_image(mut self, image: UploadedImage) -> Self {
        self.extra_images.push(image);
        self
    }

    pub fn with_detail(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.detail_names.push(name.into());
        self.detail_values.push(value.into());
        self
    }

    /// The non-empty primary upload, if any.
    pub fn main_upload(&self) -> Option<&UploadedImage> {
        self.main_image.as_ref().filter(|image| !image.is_empty())
    }

    /// Non-empty secondary uploads in the order they were posted.
    pub fn extra_uploads(&self) -> impl Iterator<Item = &UploadedImage> {
        self.extra_images.iter().filter(|image| !image.is_empty())
    }

    /// Derives the draft to persist.
    ///
    /// `previous` is the stored product when the submission edits one: its
    /// primary image survives unless a new one was uploaded, and new extra
    /// images are appended after the stored ones.
    pub fn to_draft(
        &self,
        previous: Option<&Product>,
        now: DateTime<Utc>,
    ) -> Result<ProductDraft, CatalogError> {
        let main_image = match &self.main_image {
            Some(image) => main_image_name(image)?,
            None => None,
        };
        let extra_images = extra_image_names(&self.extra_images)?;
        let details = pair_details(&self.detail_names, &self.detail_values)?;

        let mut builder = ProductBuilder::new(self.fields.clone());
        if let Some(previous) = previous {
            builder = builder.based_on(previous);
        }

        Ok(builder
            .main_image(main_image)
            .extra_images(extra_images)
            .details(details)
            .build(now))
    }
}

/// Builder for [`ProductDraft`].
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    fields: ProductFields,
    main_image: Option<String>,
    extra_images: Vec<String>,
    details: Vec<ProductDetail>,
    created_at: Option<DateTime<Utc>>,
}

impl ProductBuilder {
    pub fn new(fields: ProductFields) -> Self {
        Self {
            fields,
            main_image: None,
            extra_images: Vec::new(),
            details: Vec::new(),
            created_at: None,
        }
    }

    /// Carries over the stored images and creation time of `previous`.
    pub fn based_on(mut self, previous: &Product) -> Self {
        self.main_image = previous.main_image.clone();
        self.extra_images = previous.extra_images.clone();
        self.created_at = Some(previous.created_at);
        self
    }

    /// Replaces the primary image only when a name is given.
    pub fn main_image(mut self, name: Option<String>) -> Self {
        if name.is_some() {
            self.main_image = name;
        }
        self
    }

    /// Appends a batch of extra image names.
    pub fn extra_images(mut self, names: Vec<String>) -> Self {
        self.extra_images.extend(names);
        self
    }

    /// Replaces the detail pairs.
    pub fn details(mut self, details: Vec<ProductDetail>) -> Self {
        self.details = details;
        self
    }

    /// Finishes the draft. An empty alias is derived from the name.
    pub fn build(self, now: DateTime<Utc>) -> ProductDraft {
        let fields = self.fields;
        let alias = if fields.alias.trim().is_empty() {
            fields.name.trim().replace(' ', "-")
        } else {
            fields.alias
        };
        ProductDraft {
            id: fields.id,
            name: fields.name,
            alias,
            short_description: fields.short_description,
            full_description: fields.full_description,
            price: fields.price,
            enabled: fields.enabled,
            in_stock: fields.in_stock,
            brand_id: fields.brand_id,
            main_image: self.main_image,
            extra_images: self.extra_images,
            details: self.details,
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn fields(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            alias: name.to_lowercase(),
            ..ProductFields::new_product()
        }
    }

    fn stored_product() -> Product {
        ProductBuilder::new(ProductFields {
            id: Some(42),
            ..fields("Laptop")
        })
        .main_image(Some("old.png".to_string()))
        .extra_images(vec!["x.png".to_string()])
        .details(vec![ProductDetail::new("Color", "Grey")])
        .build(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .into_product(42)
    }

    #[test]
    fn test_empty_alias_derived_from_name() {
        let draft = ProductBuilder::new(ProductFields {
            name: "Canon EOS M50".to_string(),
            ..ProductFields::new_product()
        })
        .build(now());

        assert_eq!(draft.alias, "Canon-EOS-M50");
    }

    #[test]
    fn test_new_product_scenario() {
        let submission = ProductSubmission::new(fields("Camera"))
            .with_main_image(UploadedImage::new("photo.JPG", b"jpeg".to_vec()))
            .with_extra_image(UploadedImage::new("a.png", b"png".to_vec()))
            .with_extra_image(UploadedImage::new("", Vec::new()));

        let draft = submission.to_draft(None, now()).unwrap();

        assert_eq!(draft.id, None);
        assert_eq!(draft.main_image.as_deref(), Some("photo.JPG"));
        assert_eq!(draft.extra_images, vec!["a.png".to_string()]);
        assert_eq!(draft.created_at, now());
        assert_eq!(draft.updated_at, now());
    }

    #[test]
    fn test_empty_main_upload_keeps_previous_name() {
        let previous = stored_product();
        let submission = ProductSubmission::new(ProductFields::from(&previous))
            .with_main_image(UploadedImage::new("", Vec::new()));

        let draft = submission.to_draft(Some(&previous), now()).unwrap();

        assert_eq!(draft.main_image.as_deref(), Some("old.png"));
        assert_eq!(draft.created_at, previous.created_at);
        assert_eq!(draft.updated_at, now());
    }

    #[test]
    fn test_new_main_upload_replaces_previous_name() {
        let previous = stored_product();
        let submission = ProductSubmission::new(ProductFields::from(&previous))
            .with_main_image(UploadedImage::new("new.png", b"png".to_vec()));

        let draft = submission.to_draft(Some(&previous), now()).unwrap();

        assert_eq!(draft.main_image.as_deref(), Some("new.png"));
    }

    #[test]
    fn test_extra_images_append_after_stored() {
        let previous = stored_product();
        let submission = ProductSubmission::new(ProductFields::from(&previous))
            .with_extra_image(UploadedImage::new("y.png", b"y".to_vec()));

        let draft = submission.to_draft(Some(&previous), now()).unwrap();

        assert_eq!(
            draft.extra_images,
            vec!["x.png".to_string(), "y.png".to_string()]
        );
    }

    #[test]
    fn test_details_replace_stored() {
        let previous = stored_product();
        let submission = ProductSubmission::new(ProductFields::from(&previous))
            .with_detail("Weight", "2kg")
            .with_detail("", "ignored");

        let draft = submission.to_draft(Some(&previous), now()).unwrap();

        assert_eq!(draft.details, vec![ProductDetail::new("Weight", "2kg")]);
    }

    #[test]
    fn test_mismatched_details_rejected() {
        let mut submission = ProductSubmission::new(fields("Camera"));
        submission.detail_names = vec!["Color".to_string()];

        let result = submission.to_draft(None, now());

        assert!(matches!(
            result,
            Err(CatalogError::MismatchedDetails { names: 1, values: 0 })
        ));
    }

    #[test]
    fn test_uploads_filter_empty_parts() {
        let submission = ProductSubmission::new(fields("Camera"))
            .with_main_image(UploadedImage::new("", Vec::new()))
            .with_extra_image(UploadedImage::new("a.png", b"a".to_vec()))
            .with_extra_image(UploadedImage::new("b.png", Vec::new()));

        assert!(submission.main_upload().is_none());
        assert_eq!(submission.extra_uploads().count(), 1);
    }
}
