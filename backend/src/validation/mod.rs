//! Upload checks applied before an image reaches the model.
//!
//! The gateway trusts the file name, not the declared content type:
//! the extension must be one of [`ALLOWED_EXTENSIONS`], compared
//! case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use imageclass::validation::{allowed_file, validate_upload};
//!
//! assert!(allowed_file("holiday.JPEG"));
//! assert!(!allowed_file("archive.tar.gz"));
//! assert!(validate_upload("cat.png", 1024, 16 * 1024 * 1024).is_ok());
//! ```

use crate::error::{UploadError, UploadResult};

/// Accepted image extensions.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Whether the file name carries an accepted extension.
pub fn allowed_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type to declare for an accepted file name.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Check name and size of an upload, in the order clients see errors.
pub fn validate_upload(filename: &str, size: u64, limit: u64) -> UploadResult<()> {
    if filename.is_empty() {
        return Err(UploadError::EmptyFileName);
    }
    if !allowed_file(filename) {
        return Err(UploadError::InvalidType);
    }
    if size > limit {
        return Err(UploadError::TooLarge { limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 16 * 1024 * 1024;

    #[test]
    fn test_allowed_file() {
        for name in ["a.png", "b.JPG", "c.jpeg", "d.gif", "e.bmp", "f.WebP", "my.photo.png"] {
            assert!(allowed_file(name), "{} should be allowed", name);
        }
        for name in ["png", "a.tiff", "b.svg", "c.", "notes.txt", ""] {
            assert!(!allowed_file(name), "{} should be rejected", name);
        }
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("x.PNG"), "image/png");
        assert_eq!(content_type_for("x.jpg"), "image/jpeg");
        assert_eq!(content_type_for("x.webp"), "image/webp");
        assert_eq!(content_type_for("x"), "application/octet-stream");
    }

    #[test]
    fn test_validate_upload_order() {
        assert!(matches!(validate_upload("", 10, LIMIT), Err(UploadError::EmptyFileName)));
        assert!(matches!(
            validate_upload("a.txt", LIMIT + 1, LIMIT),
            Err(UploadError::InvalidType)
        ));
        assert!(matches!(
            validate_upload("a.png", LIMIT + 1, LIMIT),
            Err(UploadError::TooLarge { .. })
        ));
        assert!(validate_upload("a.png", LIMIT, LIMIT).is_ok());
    }
}
