//! Image file reading
//!
//! Files in a batch are read concurrently and joined once. The batch fails
//! as a whole on the first failed read, and the reads still in flight are
//! dropped with it.

use crate::error::ReadError;
use crate::types::{ImageAsset, ImageGroups};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Read one image and encode it for attachment.
pub async fn read_image(path: PathBuf) -> Result<ImageAsset, ReadError> {
    let bytes = tokio::fs::read(&path).await.map_err(|source| ReadError::Io {
        path: path.clone(),
        source,
    })?;

    let mime_type = sniff_mime(&bytes)
        .or_else(|| mime_from_extension(&path))
        .ok_or_else(|| ReadError::UnknownType(path.clone()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(path = %path.display(), mime_type, size = bytes.len(), "image read");
    Ok(ImageAsset {
        base64: STANDARD.encode(&bytes),
        mime_type: mime_type.to_string(),
        name,
    })
}

/// Read every file concurrently, keeping input order.
pub async fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageAsset>, ReadError> {
    try_join_all(paths.iter().cloned().map(read_image)).await
}

/// Read owner and witness images as one batch.
#[instrument(skip_all, fields(owner = owner.len(), witness = witness.len()))]
pub async fn read_image_groups(
    owner: &[PathBuf],
    witness: &[PathBuf],
) -> Result<ImageGroups, ReadError> {
    let all: Vec<PathBuf> = owner.iter().chain(witness.iter()).cloned().collect();
    let mut assets = read_images(&all).await?;
    let witness_assets = assets.split_off(owner.len());
    Ok(ImageGroups {
        owner: assets,
        witness: witness_assets,
    })
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_reads_and_encodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owner sig.png");
        fs::write(&path, b"\x89PNG\r\n\x1a\nrest").unwrap();

        let asset = read_image(path).await.unwrap();
        assert_eq!(asset.mime_type, "image/png");
        assert_eq!(asset.name, "owner sig.png");
        assert_eq!(asset.base64, STANDARD.encode(b"\x89PNG\r\n\x1a\nrest"));
    }

    #[tokio::test]
    async fn test_falls_back_to_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.JPG");
        fs::write(&path, b"not really a jpeg").unwrap();
        assert_eq!(read_image(path).await.unwrap().mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_unknown_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();
        assert!(matches!(
            read_image(path).await,
            Err(ReadError::UnknownType(_))
        ));
    }

    #[tokio::test]
    async fn test_groups_keep_order_and_split() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for name in ["a.png", "b.png", "c.gif"] {
            let path = dir.path().join(name);
            fs::write(&path, b"GIF89a").unwrap();
            paths.push(path);
        }

        let groups = read_image_groups(&paths[..2], &paths[2..]).await.unwrap();
        let owner: Vec<&str> = groups.owner.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(owner, vec!["a.png", "b.png"]);
        assert_eq!(groups.witness[0].name, "c.gif");
        assert_eq!(groups.witness[0].mime_type, "image/gif");
    }

    #[tokio::test]
    async fn test_one_missing_file_fails_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        fs::write(&good, b"\x89PNG\r\n\x1a\n").unwrap();
        let missing = dir.path().join("missing.png");

        let result = read_image_groups(&[good], &[missing]).await;
        assert!(matches!(result, Err(ReadError::Io { .. })));
    }

    #[tokio::test]
    async fn test_failed_batch_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let mut paths = vec![missing.clone()];
        for i in 0..8 {
            let path = dir.path().join(format!("{}.png", i));
            fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();
            paths.push(path);
        }

        match read_images(&paths).await {
            Err(ReadError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected io error, got {:?}", other.map(|a| a.len())),
        }
    }

    #[tokio::test]
    async fn test_empty_batch_reads_nothing() {
        assert!(read_images(&[]).await.unwrap().is_empty());
    }

    #[test]
    fn test_sniff_webp() {
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"RIFF"), None);
    }
}
