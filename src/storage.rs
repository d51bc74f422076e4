use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// File extensions accepted by the image upload endpoint.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Errors surfaced while storing an uploaded image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The original filename carries no recognizable image extension.
    #[error("unsupported image type `{value}`")]
    UnsupportedExtension { value: String },
    /// The file could not be written below the media root.
    #[error("failed to store uploaded file: {0}")]
    Io(#[from] io::Error),
}

/// Filesystem-backed store for uploaded product images.
///
/// Files are written under a generated name so concurrent uploads never
/// collide, and resolved to public URLs below `/media`. A failed upload
/// leaves previously stored objects untouched.
#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the backing directory if it does not exist yet.
    pub fn ensure_root(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Persist `source` (a file already on disk, e.g. a multipart temp
    /// file) under a collision-resistant generated name and return the
    /// public URL it will be served from.
    pub fn store(&self, source: &Path, original_name: &str) -> Result<String, UploadError> {
        let extension = image_extension(original_name)?;
        let stored_name = format!("{}.{extension}", Uuid::new_v4());
        let target = self.root.join(&stored_name);

        fs::copy(source, &target)?;

        Ok(format!("/media/{stored_name}"))
    }
}

/// Extract and validate the lowercased extension of an uploaded filename.
fn image_extension(original_name: &str) -> Result<String, UploadError> {
    let unsupported = || UploadError::UnsupportedExtension {
        value: original_name.to_string(),
    };

    let (_, extension) = original_name.rsplit_once('.').ok_or_else(unsupported)?;
    let extension = extension.to_ascii_lowercase();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(unsupported());
    }

    Ok(extension)
}
