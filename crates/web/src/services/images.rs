//! Storage for uploaded product images.
//!
//! Files are written under a random UUID-derived name so concurrent uploads
//! can never collide, and the extension reflects the *detected* format, not
//! whatever the browser claimed. The store owns the files it names: callers
//! release the old file whenever a product's image is replaced or the
//! product is deleted.

use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use uuid::Uuid;

/// Maximum accepted upload size (2048 KB, matching the form-side limit).
pub const MAX_IMAGE_BYTES: usize = 2048 * 1024;

/// Accepted image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// File extension used for stored files of this kind.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Why an upload was rejected at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("image must be a JPEG or PNG file")]
    UnsupportedFormat,
    #[error("image must be at most {} KB", MAX_IMAGE_BYTES / 1024)]
    TooLarge,
}

/// Check that `bytes` is an acceptable upload: JPEG or PNG by content
/// (magic bytes), within the size cap.
///
/// # Errors
///
/// Returns [`ImageRejection`] when the bytes are not an accepted image.
pub fn check(bytes: &[u8]) -> Result<ImageKind, ImageRejection> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge);
    }
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => Ok(ImageKind::Jpeg),
        Ok(ImageFormat::Png) => Ok(ImageKind::Png),
        _ => Err(ImageRejection::UnsupportedFormat),
    }
}

/// Filesystem store for product images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory served as static files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under a fresh name and return that name.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the write fails.
    pub async fn store(&self, bytes: &[u8], kind: ImageKind) -> io::Result<String> {
        let name = format!("{}.{}", Uuid::new_v4(), kind.extension());
        tokio::fs::write(self.root.join(&name), bytes).await?;
        Ok(name)
    }

    /// Release a stored file.
    ///
    /// A missing file is not an error (the row is already the source of
    /// truth), and names containing path separators are refused outright:
    /// the store only ever hands out flat names.
    pub async fn remove(&self, name: &str) {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            tracing::warn!(name, "refusing to remove suspicious image name");
            return;
        }
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(name, error = %e, "failed to remove image file");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_check_accepts_png_and_jpeg() {
        assert_eq!(check(PNG_MAGIC), Ok(ImageKind::Png));
        assert_eq!(check(JPEG_MAGIC), Ok(ImageKind::Jpeg));
    }

    #[test]
    fn test_check_rejects_other_content() {
        assert_eq!(check(b"GIF89a....."), Err(ImageRejection::UnsupportedFormat));
        assert_eq!(check(b"not an image"), Err(ImageRejection::UnsupportedFormat));
        assert_eq!(check(b""), Err(ImageRejection::UnsupportedFormat));
    }

    #[test]
    fn test_check_rejects_oversize() {
        let mut big = vec![0_u8; MAX_IMAGE_BYTES + 1];
        big[..PNG_MAGIC.len()].copy_from_slice(PNG_MAGIC);
        assert_eq!(check(&big), Err(ImageRejection::TooLarge));
    }

    #[test]
    fn test_check_accepts_exactly_max_size() {
        let mut at_cap = vec![0_u8; MAX_IMAGE_BYTES];
        at_cap[..PNG_MAGIC.len()].copy_from_slice(PNG_MAGIC);
        assert_eq!(check(&at_cap), Ok(ImageKind::Png));
    }

    #[tokio::test]
    async fn test_store_and_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::open(dir.path()).unwrap();

        let name = store.store(PNG_MAGIC, ImageKind::Png).await.unwrap();
        assert!(name.ends_with(".png"));
        assert!(!name.contains('/'));
        assert!(dir.path().join(&name).exists());

        store.remove(&name).await;
        assert!(!dir.path().join(&name).exists());
    }

    #[tokio::test]
    async fn test_stored_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::open(dir.path()).unwrap();

        let a = store.store(JPEG_MAGIC, ImageKind::Jpeg).await.unwrap();
        let b = store.store(JPEG_MAGIC, ImageKind::Jpeg).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::open(dir.path()).unwrap();
        store.remove("does-not-exist.png").await;
    }

    #[tokio::test]
    async fn test_remove_refuses_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("victim.txt");
        std::fs::write(&outside, b"keep me").unwrap();

        let root = dir.path().join("images");
        let store = ImageStore::open(&root).unwrap();
        store.remove("../victim.txt").await;
        assert!(outside.exists());
    }
}
