//! Attachment packaging
//!
//! The rendered document always goes first. Images follow, owner images
//! before witness images, each keeping its input order. An image that cannot
//! produce a valid attachment is dropped rather than failing the batch.

use crate::sanitize::{mime_subtype, sanitize_file_name, strip_data_uri};
use crate::types::{Attachment, ImageAsset, ImageGroups};
use assessment_pdf::DOCUMENT_FILE_NAME;
use tracing::{debug, warn};

pub const DOCUMENT_CONTENT_TYPE: &str = "application/pdf";

/// Turn one image into an attachment, or `None` if it is unusable.
pub fn package_image(asset: &ImageAsset) -> Option<Attachment> {
    if asset.mime_type.is_empty() || asset.base64.is_empty() {
        debug!(name = %asset.name, "image has no data or type, skipping");
        return None;
    }

    let Some(content) = strip_data_uri(&asset.base64).filter(|c| !c.is_empty()) else {
        warn!(name = %asset.name, "image data URI has no payload, skipping");
        return None;
    };
    let Some(stem) = sanitize_file_name(&asset.name) else {
        warn!(name = %asset.name, "image name has no usable characters, skipping");
        return None;
    };

    Some(Attachment {
        content: content.to_string(),
        name: format!("{}.{}", stem, mime_subtype(&asset.mime_type)),
        content_type: asset.mime_type.clone(),
    })
}

pub fn package_document(pdf_base64: String) -> Attachment {
    Attachment {
        content: pdf_base64,
        name: DOCUMENT_FILE_NAME.to_string(),
        content_type: DOCUMENT_CONTENT_TYPE.to_string(),
    }
}

/// Every valid image in attachment order.
pub fn package_images(images: &ImageGroups) -> Vec<Attachment> {
    images.iter().filter_map(package_image).collect()
}

/// Build the full attachment list.
///
/// Returns `None` when no image survives filtering; the submission must not
/// be sent in that case.
pub fn package(pdf_base64: String, images: &ImageGroups) -> Option<Vec<Attachment>> {
    let image_attachments = package_images(images);
    if image_attachments.is_empty() {
        return None;
    }

    debug!(
        offered = images.len(),
        kept = image_attachments.len(),
        "images packaged"
    );
    let mut attachments = Vec::with_capacity(image_attachments.len() + 1);
    attachments.push(package_document(pdf_base64));
    attachments.extend(image_attachments);
    Some(attachments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_gets_sanitised_name_and_subtype() {
        let attachment = package_image(&ImageAsset::new("AAAA", "image/jpeg", "Owner Sig.JPG")).unwrap();
        assert_eq!(
            attachment,
            Attachment {
                content: "AAAA".into(),
                name: "Owner_Sig.jpeg".into(),
                content_type: "image/jpeg".into(),
            }
        );
    }

    #[test]
    fn test_data_uri_prefix_is_removed() {
        let asset = ImageAsset::new("data:image/png;base64,iVBORw0", "image/png", "sig.png");
        assert_eq!(package_image(&asset).unwrap().content, "iVBORw0");
    }

    #[test]
    fn test_incomplete_images_are_dropped() {
        assert!(package_image(&ImageAsset::new("", "image/png", "a.png")).is_none());
        assert!(package_image(&ImageAsset::new("AAAA", "", "a.png")).is_none());
        assert!(package_image(&ImageAsset::new("AAAA", "image/png", "!!!.png")).is_none());
        assert!(package_image(&ImageAsset::new("data:image/png", "image/png", "a.png")).is_none());
    }

    #[test]
    fn test_data_uri_with_empty_payload_is_dropped() {
        let empty = ImageAsset::new("data:image/png;base64,", "image/png", "sig.png");
        assert!(package_image(&empty).is_none());

        let images = ImageGroups {
            owner: vec![empty],
            witness: vec![],
        };
        assert!(package("PDF".into(), &images).is_none());
    }

    #[test]
    fn test_document_comes_first_then_owner_then_witness() {
        let images = ImageGroups {
            owner: vec![
                ImageAsset::new("o1", "image/png", "owner one.png"),
                ImageAsset::new("", "image/png", "broken.png"),
            ],
            witness: vec![ImageAsset::new("w1", "image/jpeg", "witness.jpg")],
        };

        let attachments = package("PDF".into(), &images).unwrap();
        let names: Vec<&str> = attachments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Guarantor-Assessment-Form.pdf", "owner_one.png", "witness.jpeg"]
        );
        assert_eq!(attachments[0].content_type, "application/pdf");
        assert_eq!(attachments[0].content, "PDF");
    }

    #[test]
    fn test_no_valid_images_aborts() {
        assert!(package("PDF".into(), &ImageGroups::default()).is_none());

        let only_broken = ImageGroups {
            owner: vec![ImageAsset::new("", "", "x.png")],
            witness: vec![],
        };
        assert!(package("PDF".into(), &only_broken).is_none());
    }
}
